//! Error types and handling for the smart tourism service

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Main error type for the smart tourism service
#[derive(Error, Debug)]
pub enum TourismError {
    /// A file-reading operation was invoked without filesystem access
    #[error("{operation} can only be called on the server")]
    ServerOnlyOperation { operation: String },

    /// A source file is missing or cannot be read
    #[error("Cannot read source file {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file exists but does not parse
    #[error("Malformed source file {}: {message}", path.display())]
    SourceMalformed { path: PathBuf, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Favorites backend errors
    #[error("Favorites error: {message}")]
    Favorites { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

/// Why a source could not be turned into data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceErrorKind {
    SourceUnreadable,
    SourceMalformed,
}

impl TourismError {
    pub fn server_only<S: Into<String>>(operation: S) -> Self {
        Self::ServerOnlyOperation {
            operation: operation.into(),
        }
    }

    pub fn source_unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn source_malformed<S: Into<String>>(path: &Path, message: S) -> Self {
        Self::SourceMalformed {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new favorites backend error
    pub fn favorites<S: Into<String>>(message: S) -> Self {
        Self::Favorites {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Source errors are the ones the loaders swallow into empty results.
    #[must_use]
    pub fn kind(&self) -> Option<SourceErrorKind> {
        match self {
            TourismError::SourceUnreadable { .. } => Some(SourceErrorKind::SourceUnreadable),
            TourismError::SourceMalformed { .. } => Some(SourceErrorKind::SourceMalformed),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourismError::ServerOnlyOperation { .. } => {
                "This operation is only available on the server.".to_string()
            }
            TourismError::SourceUnreadable { .. } | TourismError::SourceMalformed { .. } => {
                "Destination data is currently unavailable.".to_string()
            }
            TourismError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            TourismError::Favorites { .. } => {
                "Unable to reach the favorites service. Please try again later.".to_string()
            }
            TourismError::Validation { message } => format!("Invalid input: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TourismError::server_only("buildRelationshipGraph");
        assert!(matches!(err, TourismError::ServerOnlyOperation { .. }));
        assert!(err.to_string().contains("only be called on the server"));

        let err = TourismError::validation("unknown relation kind");
        assert!(matches!(err, TourismError::Validation { .. }));
        assert!(err.user_message().contains("unknown relation kind"));
    }

    #[test]
    fn test_source_error_kinds() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = TourismError::source_unreadable(Path::new("missing.xml"), io_err);
        assert_eq!(err.kind(), Some(SourceErrorKind::SourceUnreadable));
        assert!(err.to_string().contains("missing.xml"));

        let err = TourismError::source_malformed(Path::new("bad.ttl"), "unexpected token");
        assert_eq!(err.kind(), Some(SourceErrorKind::SourceMalformed));

        assert_eq!(TourismError::config("x").kind(), None);
        assert_eq!(TourismError::server_only("x").kind(), None);
    }
}
