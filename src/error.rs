//! Centralized error handling for the nimbus session core
//!
//! This module provides a unified error type that covers all error scenarios
//! in the crate: workspace path validation, editing-session lookups, remote
//! file-service failures, and configuration I/O.

use log::warn;
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the crate.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Session Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A workspace path or entry name is malformed (root has no parent,
    /// forbidden characters in a name, wrong path kind for the operation).
    InvalidPath { path: String, reason: String },

    /// An editing-session operation referenced a path with no open tab.
    UnknownTab { path: String },

    /// The editor surface has a content load or save in flight; the intent
    /// must be retried after the outstanding operation completes.
    EditorBusy,

    /// The remote file service reported failure. Undifferentiated at this
    /// level: network, conflict, permission, and not-found all arrive as an
    /// opaque human-readable message.
    Remote { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,
}

impl Error {
    /// Shorthand for an [`Error::InvalidPath`].
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`Error::Remote`].
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Session Errors
            Error::InvalidPath { path, reason } => {
                write!(f, "Invalid path '{}': {}", path, reason)
            }
            Error::UnknownTab { path } => {
                write!(f, "No open tab for '{}'", path)
            }
            Error::EditorBusy => {
                write!(f, "The editor is still loading; please retry")
            }
            Error::Remote { message } => {
                write!(f, "Remote workspace operation failed: {}", message)
            }

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::InvalidPath { .. }
            | Error::UnknownTab { .. }
            | Error::EditorBusy
            | Error::Remote { .. }
            | Error::ConfigDirNotFound => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_error() {
        let err = Error::invalid_path("~/", "root has no parent");
        assert!(matches!(err, Error::InvalidPath { path, .. } if path == "~/"));
    }

    #[test]
    fn test_unknown_tab_error() {
        let err = Error::UnknownTab {
            path: "~/main.py".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("~/main.py"));
    }

    #[test]
    fn test_remote_error_display() {
        let err = Error::remote("pod is still preparing");
        let msg = format!("{}", err);
        assert!(msg.contains("pod is still preparing"));
    }

    #[test]
    fn test_editor_busy_display() {
        let msg = format!("{}", Error::EditorBusy);
        assert!(msg.contains("still loading"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_error_source_none_for_session_variants() {
        use std::error::Error as StdError;
        assert!(Error::EditorBusy.source().is_none());
        assert!(Error::remote("boom").source().is_none());
        assert!(Error::invalid_path("x", "y").source().is_none());
    }

    #[test]
    fn test_error_source_config_load() {
        use std::error::Error as StdError;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = Error::ConfigLoad {
            path: PathBuf::from("/test/config.json"),
            source: Box::new(io_err),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> super::Result<i32> {
            Ok(42)
        }

        fn returns_err() -> super::Result<i32> {
            Err(Error::EditorBusy)
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        use super::ResultExt;
        let result: super::Result<i32> = Ok(42);
        let value = result.unwrap_or_warn_default(0, "test context");
        assert_eq!(value, 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        use super::ResultExt;
        let result: super::Result<i32> = Err(Error::EditorBusy);
        let value = result.unwrap_or_warn_default(0, "test context");
        assert_eq!(value, 0);
    }
}
