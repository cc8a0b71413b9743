//! Configuration structures for bundling operations.
//!
//! [`BundleSettings`] holds everything the caller supplies for one run: the raw
//! archive and icon paths, identity overrides, and assembly switches. It is
//! constructed through [`SettingsBuilder`] and never mutated by the pipeline.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::bundler::error::{Error, Result};

/// Bundle identifier used when the caller does not supply one.
pub const DEFAULT_IDENTIFIER: &str = "app.virts";

/// Copyright line used when the caller does not supply one.
pub const DEFAULT_COPYRIGHT: &str = "Copyright 2025 virts";

/// Application version used when the caller does not supply one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Get-info string used when the caller does not supply one.
pub const DEFAULT_INFO: &str = "Made by virts.";

/// How the `Main-Class` manifest entry is read out of the archive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestReader {
    /// Read `META-INF/MANIFEST.MF` in-process with the `zip` crate.
    #[default]
    Zip,
    /// Run `unzip -p <archive> META-INF/MANIFEST.MF`.
    Unzip,
}

/// Caller-supplied configuration for a single bundling run.
///
/// # Examples
///
/// ```no_run
/// use jar2app::bundler::SettingsBuilder;
///
/// # fn example() -> jar2app::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .archive("build/libs/Calculator.jar")
///     .icon("assets/calculator.icns")
///     .working_directory("/home/me/calculator")
///     .build()?;
/// assert_eq!(settings.identifier(), "app.virts");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BundleSettings {
    archive: String,
    icon: Option<String>,
    app_name: Option<String>,
    identifier: String,
    version: String,
    copyright: String,
    info: String,
    working_directory: PathBuf,
    output_directory: PathBuf,
    manifest_reader: ManifestReader,
    plist_template: Option<PathBuf>,
    clean: bool,
    keep_partial: bool,
}

impl BundleSettings {
    /// Archive path exactly as supplied; may be relative or empty.
    pub fn archive(&self) -> &str {
        &self.archive
    }

    /// Icon path as supplied, if any.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Application name override, if any.
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Returns the bundle identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.version
    }

    /// Returns the copyright string.
    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    /// Returns the get-info string.
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Directory relative paths are resolved against.
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Directory the `.app` bundle is created in.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the manifest reader to use.
    pub fn manifest_reader(&self) -> ManifestReader {
        self.manifest_reader
    }

    /// Custom Info.plist template replacing the embedded one.
    pub fn plist_template(&self) -> Option<&Path> {
        self.plist_template.as_deref()
    }

    /// Whether an existing bundle is removed before assembly.
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// Whether a partially assembled bundle survives a failed run.
    pub fn keep_partial(&self) -> bool {
        self.keep_partial
    }
}

/// Builder for [`BundleSettings`].
///
/// Only the working directory is required. Empty strings for the icon and
/// the application name are treated as "not supplied".
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    archive: String,
    icon: Option<String>,
    app_name: Option<String>,
    identifier: Option<String>,
    version: Option<String>,
    copyright: Option<String>,
    info: Option<String>,
    working_directory: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    manifest_reader: ManifestReader,
    plist_template: Option<PathBuf>,
    clean: bool,
    keep_partial: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the archive path.
    pub fn archive(mut self, path: impl Into<String>) -> Self {
        self.archive = path.into();
        self
    }

    /// Sets the icon path.
    pub fn icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(path.into()).filter(|p: &String| !p.is_empty());
        self
    }

    /// Sets the application name override.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into()).filter(|n: &String| !n.is_empty());
        self
    }

    /// Sets the bundle identifier.
    ///
    /// Default: [`DEFAULT_IDENTIFIER`]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the version string.
    ///
    /// Default: [`DEFAULT_VERSION`]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the copyright string.
    ///
    /// Default: [`DEFAULT_COPYRIGHT`]
    pub fn copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Sets the get-info string.
    ///
    /// Default: [`DEFAULT_INFO`]
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Sets the directory relative paths are resolved against.
    ///
    /// # Required
    pub fn working_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory the bundle is written to.
    ///
    /// Default: the working directory. A relative path is taken relative to it.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Selects how the manifest is read.
    pub fn manifest_reader(mut self, reader: ManifestReader) -> Self {
        self.manifest_reader = reader;
        self
    }

    /// Replaces the embedded Info.plist template with a file.
    pub fn plist_template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.plist_template = Some(path.as_ref().to_path_buf());
        self
    }

    /// Removes an existing bundle before assembly.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Keeps a partially assembled bundle when assembly fails.
    pub fn keep_partial(mut self, keep: bool) -> Self {
        self.keep_partial = keep;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] if the working directory is missing or
    /// relative, or if the application name contains `/` or NUL.
    pub fn build(self) -> Result<BundleSettings> {
        if let Some(name) = self.app_name.as_deref() {
            validate_app_name(name)?;
        }

        let working_directory = self
            .working_directory
            .ok_or_else(|| Error::InvalidSettings("working directory is required".into()))?;
        if !working_directory.is_absolute() {
            return Err(Error::InvalidSettings(format!(
                "working directory {} is not absolute",
                working_directory.display()
            )));
        }

        let output_directory = match self.output_directory {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => working_directory.join(dir),
            None => working_directory.clone(),
        };

        let plist_template = self.plist_template.map(|p| {
            if p.is_absolute() {
                p
            } else {
                working_directory.join(p)
            }
        });

        Ok(BundleSettings {
            archive: self.archive,
            icon: self.icon,
            app_name: self.app_name,
            identifier: self.identifier.unwrap_or_else(|| DEFAULT_IDENTIFIER.into()),
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.into()),
            copyright: self.copyright.unwrap_or_else(|| DEFAULT_COPYRIGHT.into()),
            info: self.info.unwrap_or_else(|| DEFAULT_INFO.into()),
            working_directory,
            output_directory,
            manifest_reader: self.manifest_reader,
            plist_template,
            clean: self.clean,
            keep_partial: self.keep_partial,
        })
    }
}

/// Rejects application names that are not a single path component.
///
/// The name becomes the `<name>.app` directory inside the output directory.
pub fn validate_app_name(name: &str) -> Result<()> {
    if name.contains(['/', '\0']) {
        return Err(Error::InvalidSettings(format!(
            "application name {name:?} must not contain '/'"
        )));
    }
    Ok(())
}
