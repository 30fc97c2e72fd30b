pub use config::Config;
pub use entry::{Entry, FileMap};
pub use file_directory::{FileDirectory, Status};

mod config;
mod entry;
mod file_directory;
