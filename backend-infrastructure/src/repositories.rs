pub mod config_files;
pub mod record_file;

pub use config_files::*;
pub use record_file::*;
