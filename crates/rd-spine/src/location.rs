use std::fmt;
use std::path::PathBuf;

/// Address of one datastore: a workspace directory plus a path inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatastoreLocation {
    pub dir: PathBuf,
    pub relative_path: PathBuf,
}

impl DatastoreLocation {
    pub fn new(dir: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Full path of the SQLite file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.relative_path)
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

impl fmt::Display for DatastoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
