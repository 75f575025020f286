/// Error types for scripts-runner
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scripts-runner operations
#[derive(Error, Debug)]
pub enum ScriptsError {
    /// Another script already uses this name (checked registry-wide)
    #[error("A script named \"{0}\" already exists")]
    DuplicateName(String),

    /// No script with this name in the registry
    #[error("Script not found: {0}")]
    NotFound(String),

    /// No workspace root to work with
    #[error("No workspace folder is open")]
    NoWorkspace,

    /// Refusing to overwrite an existing scripts file
    #[error("Scripts file already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    /// A mutation was attempted but discovery found no file to write to
    #[error("No scripts file to write to")]
    NoPrimaryFile,

    /// Read or write failure on a specific path
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed scripts file content. Absorbed by the parser, never surfaced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File watcher error
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// The shell for a script could not be started
    #[error("Failed to run {label}: {source}")]
    Execution {
        label: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for scripts-runner operations
pub type Result<T> = std::result::Result<T, ScriptsError>;

impl ScriptsError {
    /// Shorthand for wrapping an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScriptsError::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert ScriptsError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ScriptsError::DuplicateName(name) => {
                format!("A script named \"{}\" already exists. Pick another name.", name)
            }
            ScriptsError::NotFound(name) => {
                format!("Script \"{}\" was not found", name)
            }
            ScriptsError::NoWorkspace => {
                "No workspace folder is open. Pass --root <dir>.".to_string()
            }
            ScriptsError::FileAlreadyExists(path) => {
                format!("The scripts file already exists: {}", path.display())
            }
            ScriptsError::NoPrimaryFile => {
                "No scripts file found. Run 'scripts-runner init' to create one.".to_string()
            }
            ScriptsError::Io { path, source } => {
                format!(
                    "File system error on {}. Check permissions. Details: {}",
                    path.display(),
                    source
                )
            }
            ScriptsError::Parse(msg) => format!("Could not parse scripts file: {}", msg),
            ScriptsError::Serialization(e) => format!("Data format error: {}", e),
            ScriptsError::Config(msg) => format!("Configuration issue: {}", msg),
            ScriptsError::Watch(e) => format!("File watching failed. Details: {}", e),
            ScriptsError::Execution { label, source } => {
                format!("Could not start a shell for {}. Details: {}", label, source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = ScriptsError::DuplicateName("build".to_string());
        assert!(err.user_message().contains("build"));

        let err = ScriptsError::FileAlreadyExists(PathBuf::from("/work/.scriptsrc"));
        assert!(err.user_message().contains("/work/.scriptsrc"));

        let err = ScriptsError::NoPrimaryFile;
        assert!(err.user_message().contains("init"));
    }

    #[test]
    fn test_error_display() {
        let err = ScriptsError::NotFound("deploy".to_string());
        assert_eq!(err.to_string(), "Script not found: deploy");

        let err = ScriptsError::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{}", err);
        assert!(display.contains("/tmp/x"));
        assert!(display.contains("denied"));
    }
}
