//! SeqResize - Sequential Batch Image Resizer
//!
//! Resizes every image directly inside a folder to one fixed size and
//! writes the copies to another folder, numbered by file creation time.
//!
//! # Output naming
//!
//! The oldest image becomes `1_<name><ext>`, the next `2_<name><ext>`, and
//! so on. Extension case and base name are preserved.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use seqresize::{BatchResizer, Config, ConsoleProgress, TargetSize};
//!
//! let config = Config::new("img", "img_resized", TargetSize::new(100, 100));
//! let report = BatchResizer::new(config).run(&mut ConsoleProgress::new(false))?;
//!
//! println!("{} of {} images resized", report.succeeded, report.found);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod config;
pub mod error;
pub mod fs;
pub mod processing;

// Re-export commonly used types
pub use batch::{
    BatchReport, BatchResizer, ConsoleProgress, FileOutcome, ProgressEvent, ProgressSink,
    SilentProgress,
};
pub use config::{Config, LoggingConfig, TargetSize};
pub use error::{Result, SeqResizeError};
pub use processing::ProcessingEngine;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from `RUST_LOG`
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    if tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
    {
        info!("SeqResize v{} initialized", VERSION);
    }
}

/// Initialize logging with custom configuration
pub fn init_with_config(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.level))
        .with_writer(std::io::stderr);

    let installed = if config.json_format {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        info!("SeqResize v{} initialized with custom config", VERSION);
    }
}

/// Resize all images in `input_folder` into `output_folder`
///
/// Progress is printed to stdout as each file completes.
pub fn resize_images<P, Q>(input_folder: P, output_folder: Q, size: (u32, u32)) -> Result<BatchReport>
where
    P: Into<PathBuf>,
    Q: Into<PathBuf>,
{
    let config = Config::new(input_folder, output_folder, TargetSize::from(size));
    BatchResizer::new(config).run(&mut ConsoleProgress::new(false))
}
