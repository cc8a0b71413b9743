//! Platform-specific bundle formats.
//!
//! Only the macOS `.app` format is produced.

pub mod macos;
