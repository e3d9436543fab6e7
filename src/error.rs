//! Error types for static-finders
//!
//! All modules use `FinderResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for finder operations
pub type FinderResult<T> = Result<T, FinderError>;

/// All errors that can occur while finding, fetching or compiling statics
#[derive(Error, Debug)]
pub enum FinderError {
    // Configuration errors
    #[error("Missing required setting: {0}")]
    ConfigMissing(String),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown finder: {0}")]
    UnknownFinder(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    PatternInvalid { pattern: String, reason: String },

    // Vendor errors
    #[error("Failed to fetch {url}: {reason}")]
    Download { url: String, reason: String },

    // Compile errors
    #[error("Compile command failed: {command}, exit code: {code}")]
    CompileFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Could not parse command: {0}")]
    CommandParse(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FinderError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a missing setting error
    pub fn config_missing(setting: impl Into<String>) -> Self {
        Self::ConfigMissing(setting.into())
    }

    /// Create an invalid path error
    pub fn path_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PathInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from a compile step
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::CompileFailed { .. } | Self::CommandFailed { .. } | Self::CommandParse(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigMissing(_) => Some("Add the setting to static-finders.toml"),
            Self::UnknownFinder(_) => Some(
                "Supported finders: filesystem, app_directories, vendor, compiled",
            ),
            Self::CommandFailed { .. } => {
                Some("Check that the compile command is installed and on PATH")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FinderError::config_missing("static_finders.vendor_map");
        assert!(err.to_string().contains("static_finders.vendor_map"));
    }

    #[test]
    fn error_hint() {
        let err = FinderError::UnknownFinder("bogus".to_string());
        assert!(err.hint().unwrap().contains("app_directories"));
        assert_eq!(FinderError::Internal("x".to_string()).hint(), None);
    }

    #[test]
    fn compile_errors_are_classified() {
        let err = FinderError::CompileFailed {
            command: "babel".to_string(),
            code: 1,
            stderr: String::new(),
        };
        assert!(err.is_compile_error());
        assert!(!FinderError::config_missing("cache").is_compile_error());
    }
}
