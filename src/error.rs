//! Top-level error types for the jar2app command.
//!
//! Library failures arrive as [`crate::bundler::Error`]; this module adds the
//! command-line failures and the recovery hints printed next to a fatal error.

use thiserror::Error;

use crate::bundler::{self, ErrorKind};

/// Result type alias for jar2app operations
pub type Result<T> = std::result::Result<T, Jar2AppError>;

/// Main error type for all jar2app operations
#[derive(Error, Debug)]
pub enum Jar2AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] bundler::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The current directory could not be determined
    #[error("Cannot determine the current directory: {source}")]
    WorkingDirectory {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Jar2AppError {
    /// Failure category named in the fatal error line
    pub fn category(&self) -> ErrorKind {
        match self {
            Jar2AppError::Bundler(e) => e.kind(),
            Jar2AppError::Cli(CliError::InvalidArguments { .. }) => ErrorKind::InvalidInput,
            Jar2AppError::Cli(CliError::WorkingDirectory { .. })
            | Jar2AppError::Io(_)
            | Jar2AppError::Json(_) => ErrorKind::FilesystemFailure,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Jar2AppError::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run `jar2app --help` for usage".to_string()]
            }
            Jar2AppError::Bundler(e) => bundler_suggestions(e),
            _ => vec![],
        }
    }
}

fn bundler_suggestions(error: &bundler::Error) -> Vec<String> {
    match error.root_cause() {
        bundler::Error::EnvironmentUnresolved { .. } => vec![
            "Set JAVA_HOME to the root of a JDK or JRE installation".to_string(),
            "Check that `java -XshowSettings:properties -version` prints java.home".to_string(),
        ],
        bundler::Error::InvalidArchive { .. } => {
            vec!["Pass an existing .jar file with -jar <path>".to_string()]
        }
        bundler::Error::MissingEntryClass { .. } => vec![
            "Add a Main-Class entry to META-INF/MANIFEST.MF".to_string(),
            "Rebuild the archive as an executable jar, e.g. `jar --create --main-class <class>`"
                .to_string(),
        ],
        bundler::Error::CommandFailed { .. } => {
            vec!["Install unzip or use --manifest-reader zip".to_string()]
        }
        bundler::Error::HandleBarsError(_)
        | bundler::Error::Template(_)
        | bundler::Error::Plist(_) => {
            vec!["Check the placeholders used by --plist-template".to_string()]
        }
        _ if error.kind() == ErrorKind::FilesystemFailure => vec![
            "Check write permissions for the output directory".to_string(),
            "Re-run with --clean to replace a stale bundle".to_string(),
        ],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Context;
    use std::path::PathBuf;

    #[test]
    fn test_category_follows_bundler_kind() {
        let err: Jar2AppError = bundler::Error::EnvironmentUnresolved {
            reason: "JAVA_HOME is not set".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorKind::EnvironmentUnresolved);

        let err: Jar2AppError = CliError::InvalidArguments {
            reason: "bad".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_suggestions_look_through_context() {
        let inner: bundler::Result<()> = Err(bundler::Error::MissingEntryClass {
            archive: PathBuf::from("/tmp/Lib.jar"),
        });
        let err: Jar2AppError = inner.context("inspecting archive").unwrap_err().into();
        let suggestions = err.recovery_suggestions();
        assert!(suggestions.iter().any(|s| s.contains("Main-Class")));
    }
}
