//! Error types for bundler operations.
//!
//! Provides contextual error chaining, filesystem-specific errors with the
//! offending path attached, and a coarse [`ErrorKind`] classification used by
//! the CLI to name the failure category.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//!
//! # Example
//!
//! ```no_run
//! use jar2app::bundler::{Context, Error, ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_manifest(path: &Path) -> Result<String> {
//!     let text = std::fs::read_to_string(path).fs_context("reading manifest", path)?;
//!     if text.is_empty() {
//!         return Err(Error::InvalidArchive {
//!             path: path.to_path_buf(),
//!             reason: "empty manifest".into(),
//!         });
//!     }
//!     Ok(text)
//! }
//!
//! fn read_both(a: &Path, b: &Path) -> Result<(String, String)> {
//!     let first = read_manifest(a).context("reading first manifest")?;
//!     let second = read_manifest(b).context("reading second manifest")?;
//!     Ok((first, second))
//! }
//! ```

use std::{
    fmt::{self, Display},
    io,
    path::PathBuf,
};
use thiserror::Error as DeriveError;

/// Failure categories reported to the user.
///
/// Every fatal [`Error`] belongs to exactly one category. An invalid icon is
/// never an error; it degrades to the default icon with a warning.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// No usable Java installation could be located.
    EnvironmentUnresolved,
    /// Bad archive path or extension, unreadable manifest, missing entry class,
    /// or unusable configuration.
    InvalidInput,
    /// Directory creation, file creation, copy, or template I/O failed.
    FilesystemFailure,
}

impl ErrorKind {
    /// Short label used in the fatal log line.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::EnvironmentUnresolved => "environment unresolved",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::FilesystemFailure => "filesystem failure",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "creating directory")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// An external program could not be run or exited unsuccessfully.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// No Java installation root could be resolved.
    #[error("could not resolve a Java installation: {reason}")]
    EnvironmentUnresolved {
        /// Why the last candidate was rejected
        reason: String,
    },

    /// The archive path does not point at a usable `.jar` file.
    #[error("invalid archive {path}: {reason}")]
    InvalidArchive {
        /// Archive path as resolved so far
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// The archive manifest does not declare a `Main-Class`.
    #[error("no Main-Class entry in manifest of {archive}")]
    MissingEntryClass {
        /// Archive that was inspected
        archive: PathBuf,
    },

    /// Caller-supplied configuration cannot be used.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A copied file does not match its source byte-for-byte.
    #[error("copy of {path} is corrupt: expected sha256 {expected}, got {actual}")]
    ChecksumMismatch {
        /// Destination that was verified
        path: PathBuf,
        /// Digest of the source file
        expected: String,
        /// Digest of the destination file
        actual: String,
    },

    /// Jar archive read error.
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error walking the bundle directory.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// Rendered manifest is not a valid property list.
    #[error("{0}")]
    Plist(#[from] plist::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Returns the failure category of this error.
    ///
    /// Context wrappers report the category of the error they wrap.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Context(_, inner) => inner.kind(),
            Error::EnvironmentUnresolved { .. } => ErrorKind::EnvironmentUnresolved,
            Error::InvalidArchive { .. }
            | Error::MissingEntryClass { .. }
            | Error::InvalidSettings(_)
            | Error::ZipError(_)
            | Error::CommandFailed { .. } => ErrorKind::InvalidInput,
            Error::Fs { .. }
            | Error::ChecksumMismatch { .. }
            | Error::WalkdirError(_)
            | Error::HandleBarsError(_)
            | Error::Template(_)
            | Error::Plist(_)
            | Error::GenericError(_) => ErrorKind::FilesystemFailure,
        }
    }

    /// Returns the innermost error beneath any context wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Context(_, inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with bundler's Error type.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying archive".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_preserves_kind() {
        let err: Result<()> = Err(Error::MissingEntryClass {
            archive: PathBuf::from("/tmp/app.jar"),
        });
        let err = err.context("inspecting archive").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().starts_with("inspecting archive: "));
        assert!(matches!(err.root_cause(), Error::MissingEntryClass { .. }));
    }

    #[test]
    fn test_fs_context_is_filesystem_failure() {
        let io: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = io.fs_context("creating directory", "/x/y").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FilesystemFailure);
        assert_eq!(err.to_string(), "creating directory /x/y: denied");
    }

    #[test]
    fn test_environment_kind_label() {
        let err = Error::EnvironmentUnresolved {
            reason: "JAVA_HOME unset".into(),
        };
        assert_eq!(err.kind().label(), "environment unresolved");
    }
}
