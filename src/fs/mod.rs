//! Filesystem abstraction so detectors and parsers are testable without
//! touching the disk.

mod mock;
mod real;

pub use mock::MockFileSystem;
pub use real::RealFileSystem;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Abstraction over the file operations the pipeline needs.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// File size in bytes. Errors are the caller's cue to omit the size.
    fn file_size(&self, path: &Path) -> Result<u64>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents in no particular order. Symlinks are reported
    /// as [`FileType::Symlink`] and never followed.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Read a file that is allowed to be missing or unreadable.
    ///
    /// This is the manifest-reading primitive: every optional input in the
    /// pipeline goes through it, so a missing `package.json` and a permission
    /// error look identical downstream (the feature is simply absent).
    fn read_optional(&self, path: &Path) -> Option<String> {
        if !self.is_file(path) {
            return None;
        }
        self.read_to_string(path).ok()
    }
}
