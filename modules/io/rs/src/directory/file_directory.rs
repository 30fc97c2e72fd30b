use std::ffi::OsStr;
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};

use super::config::Config;
use super::entry::{Entry, FileMap};

/// State of a [`FileDirectory`] after the last call to [`FileDirectory::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No directory name was given.
    #[default]
    Unset,
    /// The directory could not be opened, the entry set is empty.
    NotFound,
    /// The directory was listed successfully.
    Open,
}

/// Listing of the entries of a single directory.
///
/// Entries are read once, when the directory is opened, and kept in a map ordered by file name.
/// Hidden entries (names starting with a dot) are skipped unless requested by the [`Config`].
/// The OS directory handle is released before `open` returns.
///
/// Failing to open a directory is not an error: the listing enters [`Status::NotFound`] with an
/// empty entry set and the failure is logged. Use [`try_open`](FileDirectory::try_open) to get
/// the error instead.
#[derive(Debug, Clone, Default)]
pub struct FileDirectory {
    dirname: PathBuf,
    files: FileMap,
    status: Status,
    config: Config,
}

impl FileDirectory {
    /// Opens the given directory with the default [`Config`]. An empty path creates a listing
    /// without a directory name.
    pub fn new(dirname: impl AsRef<Path>) -> Self {
        Self::with_config(dirname, Config::default())
    }

    /// Opens the given directory with a custom [`Config`].
    pub fn with_config(dirname: impl AsRef<Path>, config: Config) -> Self {
        let mut directory = Self {
            config,
            ..Default::default()
        };
        directory.open(dirname);
        directory
    }

    /// Replaces the current listing with the entries of another directory.
    ///
    /// Returns the resulting status, errors are logged and reported as [`Status::NotFound`].
    pub fn open(&mut self, dirname: impl AsRef<Path>) -> Status {
        if let Err(err) = self.try_open(dirname) {
            log::warn!("{err:#}");
        }
        self.status
    }

    /// Same as [`open`](FileDirectory::open), but returns the error that prevented listing
    /// the directory. On success, returns the number of listed entries.
    ///
    /// The listing is left in [`Status::NotFound`] on error.
    pub fn try_open(&mut self, dirname: impl AsRef<Path>) -> Result<usize> {
        self.dirname = dirname.as_ref().to_path_buf();
        self.files.clear();
        self.status = Status::Unset;
        if self.dirname.as_os_str().is_empty() {
            return Ok(0);
        }

        self.status = Status::NotFound;
        self.files = read(&self.dirname, self.config)
            .wrap_err_with(|| format!("Can not open directory {}", self.dirname.display()))?;
        self.status = Status::Open;

        log::debug!(
            "Listed {} entries in {}",
            self.files.len(),
            self.dirname.display()
        );
        Ok(self.files.len())
    }

    /// Entries whose file name contains `pattern` (case-sensitive substring match). Names that
    /// are not valid UTF-8 are matched by their lossy conversion.
    pub fn find(&self, pattern: &str) -> FileMap {
        self.files
            .iter()
            .filter(|(name, _)| name_contains(name, pattern))
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect()
    }

    /// Drops all entries whose file name doesn't contain `pattern` and returns the number of
    /// remaining entries. An empty pattern keeps everything.
    ///
    /// Unlike [`find`](FileDirectory::find), the selection is destructive: dropped entries are
    /// gone until the directory is opened again.
    pub fn select(&mut self, pattern: &str) -> usize {
        if !pattern.is_empty() {
            self.files.retain(|name, _| name_contains(name, pattern));
            log::debug!(
                "Selected {} entries matching {pattern:?} in {}",
                self.files.len(),
                self.dirname.display()
            );
        }
        self.files.len()
    }

    /// Writes the printable summary (see [`Display`]) to the given output.
    pub fn print(&self, mut out: impl Write) -> Result<()> {
        write!(out, "{self}")?;
        out.flush()?;
        Ok(())
    }

    pub fn dirname(&self) -> &Path {
        &self.dirname
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&Entry> {
        self.files.get(name.as_ref())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn is_open(&self) -> bool {
        self.status == Status::Open
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn read(path: &Path, config: Config) -> Result<FileMap> {
    let mut files = FileMap::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name();
        if !config.lists(&name) {
            continue;
        }
        let file_type = entry.file_type().wrap_err_with(|| {
            format!("Failed to query the type of {}", name.to_string_lossy())
        })?;
        files.insert(name, Entry::new(entry.path(), file_type));
    }
    Ok(files)
}

fn name_contains(name: &OsStr, pattern: &str) -> bool {
    name.to_string_lossy().contains(pattern)
}

/// Summary of the listing: the directory name followed by one indented line per entry, or by a
/// banner if the directory was not found or holds no (selected) entries.
impl Display for FileDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.status == Status::Unset {
            return writeln!(f, "***** No directory name. *****");
        }
        writeln!(f, "{}", self.dirname.display())?;
        match self.status {
            Status::NotFound => writeln!(f, "***** Directory not found. *****"),
            _ if self.files.is_empty() => writeln!(f, "***** No files found. *****"),
            _ => {
                for name in self.files.keys() {
                    writeln!(f, "  {}", name.to_string_lossy())?;
                }
                Ok(())
            }
        }
    }
}
