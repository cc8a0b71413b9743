//! Java archive to macOS application bundle conversion.
//!
//! This module turns an executable `.jar` into a double-clickable `.app`
//! directory. The work is split into resolution stages that only read
//! (Java home, archive manifest, name and icon) and assembly stages that
//! write the bundle tree.
//!
//! # Configuration
//!
//! Everything the pipeline needs is carried by [`BundleSettings`], built with
//! [`SettingsBuilder`]:
//!
//! ```no_run
//! use jar2app::bundler::{ManifestReader, SettingsBuilder};
//!
//! let settings = SettingsBuilder::new()
//!     .archive("Calculator.jar")
//!     .icon("calc.icns")
//!     .identifier("com.example.calc")
//!     .manifest_reader(ManifestReader::Zip)
//!     .working_directory("/Users/me/build")
//!     .build()?;
//! # Ok::<(), jar2app::bundler::Error>(())
//! ```
//!
//! # Host capabilities
//!
//! Environment lookups and external programs go through the [`Host`] trait.
//! [`SystemHost`] uses the real process environment and `PATH`.
//!
//! # Output
//!
//! | Path | Contents |
//! |------|----------|
//! | `Contents/Info.plist` | bundle manifest with the `JavaX` launch dictionary |
//! | `Contents/MacOS/universalJavaApplicationStub` | launcher script, mode 0755 |
//! | `Contents/Java/<archive>.jar` | byte-identical copy of the archive |
//! | `Contents/Resources/<icon>.icns` | custom icon, when one was accepted |

#![warn(missing_docs)]

pub mod archive;
mod builder;
pub mod descriptor;
mod error;
pub mod host;
pub mod identity;
pub mod java_home;
pub(crate) mod platform;
mod resources;
mod settings;
mod utils;

use std::path::PathBuf;

use serde::Serialize;

// Public re-exports
pub use builder::{Bundler, Stage};
pub use descriptor::{BundleDescriptor, IconRef, IconRejection, JavaHome};
pub use error::{Context, Error, ErrorExt, ErrorKind, Result};
pub use host::{CommandOutput, CommandRunner, Environment, Host, SystemHost};
pub use resources::LAUNCHER_NAME;
pub use settings::{
    BundleSettings, DEFAULT_COPYRIGHT, DEFAULT_IDENTIFIER, DEFAULT_INFO, DEFAULT_VERSION,
    ManifestReader, SettingsBuilder, validate_app_name,
};

/// A finished application bundle.
///
/// Returned by [`Bundler::bundle`] and [`Bundler::assemble`] once every file
/// has been written and verified.
///
/// # Examples
///
/// ```no_run
/// use jar2app::bundler::{Bundler, SettingsBuilder, SystemHost};
///
/// # async fn example() -> jar2app::bundler::Result<()> {
/// # let settings = SettingsBuilder::new()
/// #     .archive("Calculator.jar")
/// #     .working_directory("/tmp")
/// #     .build()?;
/// let artifact = Bundler::new(settings, SystemHost).bundle().await?;
/// println!("{}: {} bytes", artifact.path.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct BundledArtifact {
    /// Path to the `<App>.app` directory.
    pub path: PathBuf,
    /// Total size of all files in the bundle, in bytes.
    pub size: u64,
    /// SHA-256 over the bundle's relative paths and file contents.
    pub checksum: String,
}
