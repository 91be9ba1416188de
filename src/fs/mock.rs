use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{Duration, SystemTime};

use super::FileSystem;
use crate::error::{Result, SeqResizeError};

#[derive(Debug, Clone)]
struct MockFile {
    name: String,
    created: SystemTime,
}

/// In-memory [`FileSystem`] with caller-chosen creation times
///
/// Files are listed in insertion order, which stands in for the
/// platform's directory order.
pub struct MockFileSystem {
    dirs: RwLock<HashMap<PathBuf, Vec<MockFile>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            dirs: RwLock::new(HashMap::new()),
        }
    }

    pub fn add_dir(&self, dir: impl AsRef<Path>) {
        let mut dirs = self.dirs.write().unwrap();
        dirs.entry(dir.as_ref().to_path_buf()).or_default();
    }

    /// Add a file whose creation time is `secs` after the Unix epoch
    pub fn add_file(&self, dir: impl AsRef<Path>, name: &str, secs: u64) {
        self.add_file_at(dir, name, SystemTime::UNIX_EPOCH + Duration::from_secs(secs));
    }

    pub fn add_file_at(&self, dir: impl AsRef<Path>, name: &str, created: SystemTime) {
        let mut dirs = self.dirs.write().unwrap();
        dirs.entry(dir.as_ref().to_path_buf())
            .or_default()
            .push(MockFile {
                name: name.to_string(),
                created,
            });
    }

    fn find(&self, path: &Path) -> Option<SystemTime> {
        let dir = path.parent()?;
        let name = path.file_name()?.to_str()?;
        let dirs = self.dirs.read().unwrap();
        dirs.get(dir)?
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.created)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains_key(path)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let dirs = self.dirs.read().unwrap();
        let files = dirs
            .get(dir)
            .ok_or_else(|| SeqResizeError::input_folder_not_found(dir))?;
        Ok(files.iter().map(|f| f.name.clone()).collect())
    }

    fn creation_time(&self, path: &Path) -> Result<SystemTime> {
        self.find(path).ok_or_else(|| {
            SeqResizeError::metadata(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such mock file"),
            )
        })
    }
}
