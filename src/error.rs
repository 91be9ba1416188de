//! Error types and handling for SeqResize

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for SeqResize operations
pub type Result<T> = std::result::Result<T, SeqResizeError>;

/// Main error type for SeqResize operations
#[derive(Debug, Error)]
pub enum SeqResizeError {
    /// Input folder missing or not a directory
    #[error("Input folder not found: {path:?}")]
    InputFolderNotFound { path: PathBuf },

    /// Input folder exists but could not be read
    #[error("Cannot list input folder {path:?}: {source}")]
    ListInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output folder could not be created
    #[error("Cannot create output folder {path:?}: {source}")]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creation-time metadata could not be read
    #[error("Cannot read metadata for {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not a decodable image
    #[error("{source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Resized image could not be encoded or written
    #[error("{source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Target size outside the accepted range
    #[error("Invalid target size: {message}")]
    InvalidTargetSize { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    SerdeError(String),
}

impl SeqResizeError {
    /// Create a new input folder error
    pub fn input_folder_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::InputFolderNotFound { path: path.into() }
    }

    /// Create a new input listing error
    pub fn list_input<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::ListInput {
            path: path.into(),
            source,
        }
    }

    /// Create a new output folder error
    pub fn output_folder<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::OutputFolder {
            path: path.into(),
            source,
        }
    }

    /// Create a new metadata error
    pub fn metadata<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }

    /// Create a new decode error
    pub fn decode<P: Into<PathBuf>>(path: P, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Create a new encode error
    pub fn encode<P: Into<PathBuf>>(path: P, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new invalid target size error
    pub fn invalid_target_size<S: Into<String>>(message: S) -> Self {
        Self::InvalidTargetSize {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (the batch can move on to the next file)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // These errors affect a single file
            Self::Decode { .. } | Self::Encode { .. } => true,

            // These errors stop the whole run
            Self::InputFolderNotFound { .. }
            | Self::ListInput { .. }
            | Self::OutputFolder { .. }
            | Self::Metadata { .. }
            | Self::ConfigError { .. }
            | Self::InvalidTargetSize { .. }
            | Self::SerdeError(_) => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InputFolderNotFound { path } => {
                format!("Input folder '{}' does not exist or is not a directory", path.display())
            }
            Self::ListInput { path, source } => {
                format!("Could not read input folder '{}': {}", path.display(), source)
            }
            Self::OutputFolder { path, source } => {
                format!("Could not create output folder '{}': {}", path.display(), source)
            }
            Self::Metadata { path, source } => {
                format!("Could not read the creation time of '{}': {}", path.display(), source)
            }
            Self::Decode { path, source } => {
                format!("Could not read '{}' as an image: {}", path.display(), source)
            }
            Self::Encode { path, source } => {
                format!("Could not write '{}': {}", path.display(), source)
            }
            other => other.to_string(),
        }
    }
}

// Convert serde errors to our error type
impl From<toml::de::Error> for SeqResizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::SerdeError(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for SeqResizeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerdeError(format!("YAML parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SeqResizeError::config("test message");
        assert!(matches!(err, SeqResizeError::ConfigError { .. }));
    }

    #[test]
    fn test_recoverable_errors() {
        let decode = SeqResizeError::decode(
            "broken.png",
            image::ImageError::IoError(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof")),
        );
        assert!(decode.is_recoverable());

        assert!(!SeqResizeError::input_folder_not_found("img").is_recoverable());
        assert!(!SeqResizeError::invalid_target_size("0x0").is_recoverable());
    }

    #[test]
    fn test_listing_failures_are_fatal() {
        let denied = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        let err = SeqResizeError::list_input("img", denied());
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("'img'"));

        assert!(!SeqResizeError::metadata("img/a.png", denied()).is_recoverable());
    }

    #[test]
    fn test_decode_message_is_underlying_error() {
        let source = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err = SeqResizeError::decode("a.png", image::ImageError::IoError(source));
        assert_eq!(err.to_string(), "truncated");
        assert!(err.user_message().contains("'a.png'"));
    }

    #[test]
    fn test_user_messages() {
        let err = SeqResizeError::input_folder_not_found("photos");
        let msg = err.user_message();
        assert!(msg.contains("photos"));
        assert!(msg.contains("not a directory"));
    }
}
