//! The bundle descriptor and the per-stage values it is built from.
//!
//! Each resolution stage produces its own value ([`JavaHome`],
//! [`InspectedArchive`], [`Identity`]); [`BundleDescriptor::new`] combines them
//! with the caller's settings once all three succeeded. The assembler only ever
//! sees the finished, read-only descriptor.

use serde::Serialize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::bundler::settings::BundleSettings;

/// Bundle-relative directory the archive is installed into.
pub const CLASS_PATH_PREFIX: &str = "Contents/Java";

/// Root directory of a validated Java installation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JavaHome(PathBuf);

impl JavaHome {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self(path)
    }

    /// Returns the installation root.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Result of archive inspection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InspectedArchive {
    /// Absolute path to the input archive.
    pub path: PathBuf,
    /// Fully-qualified entry-point class.
    pub entry_class: String,
    /// Bundle-relative install path, `Contents/Java/<file name>`.
    pub class_path: String,
}

/// Why a supplied icon was not used.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IconRejection {
    /// The path could not be made absolute.
    Unresolvable {
        /// Path as supplied
        path: String,
        /// Underlying error text
        error: String,
    },
    /// Nothing exists at the path, or it is not a regular file.
    NotFound {
        /// Absolute path that was checked
        path: PathBuf,
    },
    /// The file does not have the `.icns` extension.
    WrongExtension {
        /// Absolute path that was checked
        path: PathBuf,
    },
}

impl fmt::Display for IconRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconRejection::Unresolvable { path, error } => {
                write!(f, "cannot resolve icon path {path}: {error}")
            }
            IconRejection::NotFound { path } => {
                write!(f, "icon file {} does not exist", path.display())
            }
            IconRejection::WrongExtension { path } => {
                write!(f, "icon file {} is not an .icns file", path.display())
            }
        }
    }
}

/// Icon reference carried in the descriptor.
///
/// [`IconRef::Default`] is the "no custom icon" sentinel: the assembler skips
/// icon installation and macOS shows its generic application icon.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconRef {
    /// No custom icon.
    #[default]
    Default,
    /// A validated `.icns` file.
    Custom {
        /// Absolute path to the icon.
        path: PathBuf,
        /// File name without extension, used as `CFBundleIconFile`.
        base_name: String,
    },
}

impl IconRef {
    /// Returns the icon path, or `None` for the sentinel.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IconRef::Default => None,
            IconRef::Custom { path, .. } => Some(path),
        }
    }

    /// Icon base name; empty for the sentinel.
    pub fn base_name(&self) -> &str {
        match self {
            IconRef::Default => "",
            IconRef::Custom { base_name, .. } => base_name,
        }
    }

    /// Whether this is the sentinel.
    pub fn is_default(&self) -> bool {
        matches!(self, IconRef::Default)
    }
}

/// Result of identity derivation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Identity {
    /// Final application name.
    pub app_name: String,
    /// Icon to install, or the sentinel.
    pub icon: IconRef,
    /// Set when a supplied icon was rejected and replaced by the sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_rejection: Option<IconRejection>,
}

/// Everything the assembler needs to produce one bundle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BundleDescriptor {
    /// Absolute path to the input archive.
    pub archive_path: PathBuf,
    /// Fully-qualified entry-point class.
    pub entry_class: String,
    /// Final application name.
    pub app_name: String,
    /// Icon to install, or the sentinel.
    pub icon: IconRef,
    /// Set when a supplied icon was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_rejection: Option<IconRejection>,
    /// Root of the Java installation found on this machine.
    pub java_home: JavaHome,
    /// Bundle-relative path of the installed archive.
    pub class_path: String,
    /// `CFBundleIdentifier`.
    pub identifier: String,
    /// `CFBundleShortVersionString` / `CFBundleVersion`.
    pub version: String,
    /// `NSHumanReadableCopyright`.
    pub copyright: String,
    /// `CFBundleGetInfoString`.
    pub info: String,
    /// Directory the bundle is created in.
    pub output_directory: PathBuf,
}

impl BundleDescriptor {
    /// Combines the stage results with the caller's identity metadata.
    pub fn new(
        settings: &BundleSettings,
        java_home: JavaHome,
        archive: InspectedArchive,
        identity: Identity,
    ) -> Self {
        Self {
            archive_path: archive.path,
            entry_class: archive.entry_class,
            app_name: identity.app_name,
            icon: identity.icon,
            icon_rejection: identity.icon_rejection,
            java_home,
            class_path: archive.class_path,
            identifier: settings.identifier().to_string(),
            version: settings.version_string().to_string(),
            copyright: settings.copyright().to_string(),
            info: settings.info().to_string(),
            output_directory: settings.output_directory().to_path_buf(),
        }
    }

    /// File name of the input archive.
    pub fn archive_file_name(&self) -> String {
        self.archive_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
