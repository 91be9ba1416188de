//! Progress events for a batch run and their console rendering

use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::config::TargetSize;

/// Progress update event
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started {
        total: usize,
        target: TargetSize,
    },
    /// The input folder holds no eligible images; nothing else follows
    NoImages {
        folder: PathBuf,
    },
    FileResized {
        index: usize,
        total: usize,
        new_filename: String,
    },
    FileFailed {
        index: usize,
        total: usize,
        filename: String,
        error: String,
    },
    Finished {
        succeeded: usize,
        failed: usize,
        output_folder: PathBuf,
    },
}

/// Receiver of progress events during [`BatchResizer::run`](super::BatchResizer::run)
pub trait ProgressSink {
    fn event(&mut self, event: ProgressEvent);
}

/// Collects events, mostly useful in tests
impl ProgressSink for Vec<ProgressEvent> {
    fn event(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn event(&mut self, event: ProgressEvent) {
        debug!("Progress: {:?}", event);
    }
}

/// Console progress reporter
///
/// Per-file lines go to stdout; the optional bar is drawn on stderr below
/// them.
pub struct ConsoleProgress {
    show_bar: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new(show_bar: bool) -> Self {
        Self { show_bar, bar: None }
    }

    fn line(&self, text: String) {
        match &self.bar {
            Some(bar) => bar.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }

    fn start_bar(&mut self, total: usize) {
        if !self.show_bar {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")
        {
            Ok(bar_style) => bar.set_style(bar_style.progress_chars("#>-")),
            Err(e) => debug!("Falling back to default progress style: {}", e),
        }
        self.bar = Some(bar);
    }

    fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn event(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { total, target } => {
                self.line(format!("Found images: {}", style(total).bold()));
                self.line(format!(
                    "Resizing to {}px (numbered by creation time)...\n",
                    target
                ));
                self.start_bar(total);
            }
            ProgressEvent::NoImages { folder } => {
                self.line(format!("No images found in folder '{}'", folder.display()));
            }
            ProgressEvent::FileResized { index, total, new_filename } => {
                self.line(format!(
                    "{} {} - {}",
                    style(format!("[{}/{}]", index, total)).dim(),
                    new_filename,
                    style("done").green()
                ));
                self.tick();
            }
            ProgressEvent::FileFailed { index, total, filename, error } => {
                self.line(format!(
                    "{} {} - {}: {}",
                    style(format!("[{}/{}]", index, total)).dim(),
                    filename,
                    style("error").red().bold(),
                    error
                ));
                self.tick();
            }
            ProgressEvent::Finished { output_folder, .. } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
                self.line(format!(
                    "\nDone! Images saved to folder '{}'",
                    output_folder.display()
                ));
            }
        }
    }
}
