// Domain services
pub mod stats;

pub use stats::*;
