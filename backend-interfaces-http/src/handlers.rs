pub mod ops_handlers;
pub mod record_handlers;
pub mod roster_handlers;
pub mod stats_handlers;

pub use ops_handlers::*;
pub use record_handlers::*;
pub use roster_handlers::*;
pub use stats_handlers::*;
