pub mod directory;

pub use directory::FileDirectory;
