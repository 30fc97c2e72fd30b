use std::ffi::OsStr;

use derive_more::Constructor;

/// Controls which directory entries are listed by a [`FileDirectory`](super::FileDirectory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Constructor)]
pub struct Config {
    /// List hidden entries, i.e. names starting with a dot.
    pub hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::VISIBLE
    }
}

impl Config {
    /// Only entries that are not hidden.
    pub const VISIBLE: Config = Config { hidden: false };

    /// All entries, including hidden ones.
    pub const ALL: Config = Config { hidden: true };

    /// Returns `true` if an entry with the given file name should be listed.
    pub fn lists(&self, name: impl AsRef<OsStr>) -> bool {
        self.hidden || !name.as_ref().as_encoded_bytes().starts_with(b".")
    }
}
