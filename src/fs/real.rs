use std::fs;
use std::path::Path;
use std::time::SystemTime;

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::FileSystem;
use crate::error::{Result, SeqResizeError};

/// [`FileSystem`] backed by the host filesystem
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => SeqResizeError::list_input(dir, io),
                None => SeqResizeError::input_folder_not_found(dir),
            })?;

            // Symlinks count when they resolve to a regular file
            if !entry.path().is_file() {
                continue;
            }

            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!("Skipping non UTF-8 file name: {:?}", entry.path()),
            }
        }

        debug!("Listed {} files in {:?}", names.len(), dir);
        Ok(names)
    }

    fn creation_time(&self, path: &Path) -> Result<SystemTime> {
        let metadata = fs::metadata(path).map_err(|e| SeqResizeError::metadata(path, e))?;

        if let Ok(created) = metadata.created() {
            return Ok(created);
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            use std::time::Duration;

            let secs = metadata.ctime();
            let nanos = metadata.ctime_nsec() as u32;
            if secs >= 0 {
                return Ok(SystemTime::UNIX_EPOCH + Duration::new(secs as u64, nanos));
            }
        }

        metadata.modified().map_err(|e| SeqResizeError::metadata(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("nested.png")).unwrap();
        fs::File::create(base.join("a.png"))
            .unwrap()
            .write_all(b"not really a png")
            .unwrap();
        fs::File::create(base.join("notes.txt"))
            .unwrap()
            .write_all(b"hello")
            .unwrap();
        fs::File::create(base.join("nested.png/inner.jpg")).unwrap();

        dir
    }

    #[test]
    fn test_list_files_is_flat_and_skips_dirs() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let mut names = fs.list_files(temp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.png".to_string(), "notes.txt".to_string()]);
    }

    #[test]
    fn test_list_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.list_files(&temp.path().join("missing")).is_err());
        assert!(!fs.is_dir(&temp.path().join("missing")));
        assert!(fs.is_dir(temp.path()));
    }

    #[test]
    fn test_creation_time() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let created = fs.creation_time(&temp.path().join("a.png")).unwrap();
        assert!(created > SystemTime::UNIX_EPOCH);

        let err = fs.creation_time(&temp.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, SeqResizeError::Metadata { .. }));
    }
}
