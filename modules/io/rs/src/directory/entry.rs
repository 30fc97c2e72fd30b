use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::FileType;
use std::path::PathBuf;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// Listed entries keyed by their raw file name, names are not required to be valid UTF-8.
pub type FileMap = BTreeMap<OsString, Entry>;

/// Metadata of a single directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Dissolve, Constructor)]
pub struct Entry {
    /// Full path of the entry, the directory path joined with the file name.
    path: PathBuf,
    /// Type of the entry, symlinks are not followed.
    file_type: FileType,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.file_type.is_file()
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type.is_symlink()
    }
}
