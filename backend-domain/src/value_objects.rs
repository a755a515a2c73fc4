// Domain value objects
pub mod brand_filter;
pub mod passcode;

pub use brand_filter::*;
pub use passcode::*;
