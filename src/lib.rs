//! # jar2app
//!
//! Package an executable Java archive as a macOS application bundle.
//!
//! The crate resolves everything the bundle needs (Java installation,
//! `Main-Class`, application name, icon) and then writes a standard `.app`
//! layout with a rendered `Info.plist`, a launcher stub and the archive.
//!
//! ## Usage
//!
//! ```bash
//! jar2app -jar Calculator.jar                       # Calculator.app
//! jar2app -jar Calculator.jar -icon calc.icns       # with a custom icon
//! jar2app -jar Calculator.jar -name "Calc Pro" -v 2.0
//! jar2app -jar Calculator.jar --dry-run             # print metadata as JSON
//! ```
//!
//! ## Library
//!
//! ```no_run
//! use jar2app::bundler::{Bundler, SettingsBuilder, SystemHost};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBuilder::new()
//!     .archive("Calculator.jar")
//!     .working_directory(std::env::current_dir()?)
//!     .build()?;
//! let artifact = Bundler::new(settings, SystemHost).bundle().await?;
//! println!("{}", artifact.path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod bundler;
pub mod cli;
pub mod error;

// Re-export main types for public API
pub use bundler::{BundleDescriptor, BundleSettings, BundledArtifact, Bundler};
pub use cli::Args;
pub use error::{CliError, Jar2AppError, Result};
