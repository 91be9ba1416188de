//! Filesystem abstraction for listing images and reading creation times
//!
//! The batch pipeline only needs two things from the filesystem before it
//! starts decoding: the plain files directly inside the input folder, and a
//! creation timestamp for each of them. Both go through [`FileSystem`] so
//! ordering can be tested with fixed timestamps via [`MockFileSystem`].

mod mock;
mod real;

use std::path::Path;
use std::time::SystemTime;

use crate::error::Result;

pub use mock::MockFileSystem;
pub use real::RealFileSystem;

/// Source of directory listings and creation-time metadata
pub trait FileSystem {
    /// Whether `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the regular files directly inside `dir`, in listing order
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// Creation time of the file at `path`
    ///
    /// Falls back to the metadata-change time, then the modification time,
    /// on platforms that do not record creation.
    fn creation_time(&self, path: &Path) -> Result<SystemTime>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        (**self).list_files(dir)
    }

    fn creation_time(&self, path: &Path) -> Result<SystemTime> {
        (**self).creation_time(path)
    }
}
