//! Filesystem capability used by every core component.
//!
//! Nothing in the scanner touches `std::fs` directly; it goes through
//! [`FileSystem`] so tests can substitute the in-memory implementation.

use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

/// Result of a successful `stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
}

/// A single directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

pub trait FileSystem {
    /// Open a file for reading. The returned handle should be dropped as soon
    /// as the read completes.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Stat a path; `Err` with `NotFound` when it does not exist.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// List a directory, sorted by entry name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Append `segment` below `base`. Root, `.` and `..` components in the
    /// segment are dropped, so the result never leaves `base`.
    fn join(&self, base: &Path, segment: &str) -> PathBuf {
        let mut joined = base.to_path_buf();
        for component in Path::new(segment).components() {
            if let Component::Normal(part) = component {
                joined.push(part);
            }
        }
        joined
    }

    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_ok()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut handle = self.open(path)?;
        let mut content = String::new();
        handle.read_to_string(&mut content)?;
        Ok(content)
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = std::fs::metadata(path)?;
        Ok(FileStat {
            is_dir: meta.is_dir(),
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            // Follow symlinks: pnpm links store entries into place
            let is_dir = std::fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
pub use memory::MemoryFileSystem;
