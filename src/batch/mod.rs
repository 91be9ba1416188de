//! Sequential batch resizing of one input folder
//!
//! A run lists the eligible images directly inside the input folder, ranks
//! them by creation time, and writes each one resized as
//! `{rank}_{name}{ext}` into the output folder. A file that fails to decode
//! or encode is reported and skipped; only a missing input folder (or an
//! unusable output folder) aborts the run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, SeqResizeError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::processing::{is_supported_filename, sequenced_filename, ProcessingEngine};

pub mod progress;

pub use progress::{ConsoleProgress, ProgressEvent, ProgressSink, SilentProgress};

/// An eligible file and its creation timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFileEntry {
    pub filename: String,
    pub creation_time: SystemTime,
}

/// Outcome of resizing a single file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Resized {
        index: usize,
        filename: String,
        new_filename: String,
        original_dimensions: (u32, u32),
        output_size: u64,
    },
    Failed {
        index: usize,
        filename: String,
        error: String,
    },
}

impl FileOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Resized { index, .. } | Self::Failed { index, .. } => *index,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Resized { filename, .. } | Self::Failed { filename, .. } => filename,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Resized { .. })
    }
}

/// Result of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub output_folder: PathBuf,
    pub outcomes: Vec<FileOutcome>,
    pub duration: Duration,
}

impl BatchReport {
    fn empty(output_folder: PathBuf, duration: Duration) -> Self {
        Self {
            found: 0,
            succeeded: 0,
            failed: 0,
            output_folder,
            outcomes: Vec::new(),
            duration,
        }
    }

    /// No eligible images were found
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Create `path` and any missing ancestors; succeeds if it already exists
pub fn ensure_output_folder(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| SeqResizeError::output_folder(path, e))?;
    debug!("Output folder ready: {:?}", path);
    Ok(())
}

/// Resizes every eligible image of one folder, in creation order
pub struct BatchResizer<F = RealFileSystem> {
    config: Config,
    fs: F,
}

impl BatchResizer<RealFileSystem> {
    pub fn new(config: Config) -> Self {
        Self::with_file_system(config, RealFileSystem::new())
    }
}

impl<F: FileSystem> BatchResizer<F> {
    /// Use a custom listing and timestamp source
    pub fn with_file_system(config: Config, fs: F) -> Self {
        Self { config, fs }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Names of the supported images directly inside the input folder
    pub fn list_eligible_files(&self) -> Result<Vec<String>> {
        let input = &self.config.input_folder;
        if !self.fs.is_dir(input) {
            return Err(SeqResizeError::input_folder_not_found(input));
        }

        let files: Vec<String> = self
            .fs
            .list_files(input)?
            .into_iter()
            .filter(|name| is_supported_filename(name))
            .collect();

        debug!("Eligible files in {:?}: {:?}", input, files);
        Ok(files)
    }

    /// Sort file names by ascending creation time
    ///
    /// Files with equal timestamps keep their listing order.
    pub fn order_by_creation_time(&self, filenames: Vec<String>) -> Result<Vec<String>> {
        let mut entries = filenames
            .into_iter()
            .map(|filename| {
                let path = self.config.input_folder.join(&filename);
                let creation_time = self.fs.creation_time(&path)?;
                Ok(ImageFileEntry { filename, creation_time })
            })
            .collect::<Result<Vec<_>>>()?;

        // sort_by_key is stable
        entries.sort_by_key(|entry| entry.creation_time);

        Ok(entries.into_iter().map(|entry| entry.filename).collect())
    }

    /// Resize one file
    ///
    /// Recoverable failures are captured in the outcome; anything else is
    /// returned as an error.
    pub fn resize_one(
        &self,
        engine: &ProcessingEngine,
        filename: &str,
        index: usize,
    ) -> Result<FileOutcome> {
        let new_filename = sequenced_filename(index, filename);
        let input_path = self.config.input_folder.join(filename);
        let output_path = self.config.output_folder.join(&new_filename);

        match engine.process_file(&input_path, &output_path) {
            Ok(result) => Ok(FileOutcome::Resized {
                index,
                filename: filename.to_string(),
                new_filename,
                original_dimensions: result.original_dimensions,
                output_size: result.output_size,
            }),
            Err(e) if e.is_recoverable() => {
                warn!("Failed to process {:?}: {}", input_path, e);
                Ok(FileOutcome::Failed {
                    index,
                    filename: filename.to_string(),
                    error: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Run the whole batch
    ///
    /// Fails only on the fatal tier: invalid target size, output folder
    /// creation, a missing or unreadable input folder, or unreadable
    /// creation metadata.
    pub fn run(&self, progress: &mut dyn ProgressSink) -> Result<BatchReport> {
        let start_time = Instant::now();
        let engine = ProcessingEngine::new(self.config.target_size)?;

        info!("Input: {:?}", self.config.input_folder);
        info!("Output: {:?}", self.config.output_folder);

        ensure_output_folder(&self.config.output_folder)?;

        let files = self.list_eligible_files()?;
        if files.is_empty() {
            info!("No eligible images in {:?}", self.config.input_folder);
            progress.event(ProgressEvent::NoImages {
                folder: self.config.input_folder.clone(),
            });
            return Ok(BatchReport::empty(
                self.config.output_folder.clone(),
                start_time.elapsed(),
            ));
        }

        let files = self.order_by_creation_time(files)?;
        let total = files.len();

        info!("Found {} files to process", total);
        progress.event(ProgressEvent::Started {
            total,
            target: engine.target(),
        });

        let mut outcomes = Vec::with_capacity(total);
        for (offset, filename) in files.iter().enumerate() {
            let index = offset + 1;
            let outcome = self.resize_one(&engine, filename, index)?;

            progress.event(match &outcome {
                FileOutcome::Resized { new_filename, .. } => ProgressEvent::FileResized {
                    index,
                    total,
                    new_filename: new_filename.clone(),
                },
                FileOutcome::Failed { error, .. } => ProgressEvent::FileFailed {
                    index,
                    total,
                    filename: filename.clone(),
                    error: error.clone(),
                },
            });

            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = total - succeeded;

        info!("Batch finished: {} resized, {} failed", succeeded, failed);
        progress.event(ProgressEvent::Finished {
            succeeded,
            failed,
            output_folder: self.config.output_folder.clone(),
        });

        Ok(BatchReport {
            found: total,
            succeeded,
            failed,
            output_folder: self.config.output_folder.clone(),
            outcomes,
            duration: start_time.elapsed(),
        })
    }
}
