//! Bundle pipeline orchestration.
//!
//! This module provides the main [`Bundler`] orchestrator that runs the five
//! pipeline stages in order:
//!
//! 1. [`Stage::ResolveEnv`] - locate a Java installation
//! 2. [`Stage::InspectArchive`] - validate the jar and read its `Main-Class`
//! 3. [`Stage::DeriveIdentity`] - application name and icon
//! 4. [`Stage::CreateLayout`] - `<App>.app/Contents/{MacOS,Resources,Java}`
//! 5. [`Stage::PopulateLayout`] - Info.plist, launcher, archive, icon
//!
//! The first stage to fail ends the run; nothing is retried and no stage
//! calls `process::exit`.
//!
//! # Example
//!
//! ```no_run
//! use jar2app::bundler::{Bundler, SettingsBuilder, SystemHost};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBuilder::new()
//!     .archive("Calculator.jar")
//!     .working_directory(std::env::current_dir()?)
//!     .build()?;
//!
//! let bundler = Bundler::new(settings, SystemHost);
//! let artifact = bundler.bundle().await?;
//! println!("Created {} ({} bytes)", artifact.path.display(), artifact.size);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use crate::bundler::{
    BundledArtifact,
    archive::{UnzipManifest, ZipManifest, inspect_archive},
    descriptor::{BundleDescriptor, InspectedArchive},
    error::{Context, Result},
    host::{Host, SystemHost},
    identity::derive_identity,
    java_home::resolve_java_home,
    platform::macos::app::{AssembleOptions, bundle_project},
    settings::{BundleSettings, ManifestReader},
};

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Locate a Java installation.
    ResolveEnv,
    /// Validate the archive and extract its entry class.
    InspectArchive,
    /// Compute the application name and icon.
    DeriveIdentity,
    /// Create the bundle directories.
    CreateLayout,
    /// Write the manifest, launcher, archive and icon.
    PopulateLayout,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolveEnv => "resolving Java home",
            Stage::InspectArchive => "inspecting archive",
            Stage::DeriveIdentity => "deriving app identity",
            Stage::CreateLayout => "creating bundle layout",
            Stage::PopulateLayout => "populating bundle",
        };
        f.write_str(name)
    }
}

/// Main bundler orchestrator.
///
/// Owns the caller's settings and the host capabilities used to inspect the
/// environment. Generic over [`Host`] so tests can run the full pipeline
/// without a real Java installation.
#[derive(Debug)]
pub struct Bundler<H: Host = SystemHost> {
    settings: BundleSettings,
    host: H,
}

impl<H: Host> Bundler<H> {
    /// Creates a bundler for `settings` running against `host`.
    pub fn new(settings: BundleSettings, host: H) -> Self {
        Self { settings, host }
    }

    /// Runs the resolution stages and returns the finished descriptor.
    ///
    /// Touches nothing on disk besides reading the archive and icon.
    pub fn resolve(&self) -> Result<BundleDescriptor> {
        log::debug!("Stage: {}", Stage::ResolveEnv);
        let java_home = resolve_java_home(&self.host, self.settings.working_directory())
            .context(Stage::ResolveEnv)?;
        log::info!("Java home: {}", java_home.path().display());

        log::debug!("Stage: {}", Stage::InspectArchive);
        let archive = self.inspect().context(Stage::InspectArchive)?;
        log::info!("Archive: {}", archive.path.display());
        log::info!("Main class: {}", archive.entry_class);

        log::debug!("Stage: {}", Stage::DeriveIdentity);
        let identity = derive_identity(
            self.settings.app_name(),
            self.settings.icon(),
            &archive.path,
            self.settings.working_directory(),
        );
        log::info!("App name: {}", identity.app_name);

        Ok(BundleDescriptor::new(
            &self.settings,
            java_home,
            archive,
            identity,
        ))
    }

    fn inspect(&self) -> Result<InspectedArchive> {
        let raw = self.settings.archive();
        let cwd = self.settings.working_directory();
        match self.settings.manifest_reader() {
            ManifestReader::Zip => inspect_archive(raw, cwd, &ZipManifest),
            ManifestReader::Unzip => inspect_archive(raw, cwd, &UnzipManifest::new(&self.host)),
        }
    }

    /// Runs the layout and populate stages for an already resolved descriptor.
    pub async fn assemble(&self, descriptor: &BundleDescriptor) -> Result<BundledArtifact> {
        let options = AssembleOptions {
            plist_template: self.settings.plist_template().map(Into::into),
            clean: self.settings.clean(),
            keep_partial: self.settings.keep_partial(),
        };
        let artifact = bundle_project(descriptor, &options).await?;
        log::info!(
            "Bundle {} ({} bytes, sha256 {})",
            artifact.path.display(),
            artifact.size,
            artifact.checksum
        );
        Ok(artifact)
    }

    /// Runs all five stages.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let descriptor = self.resolve()?;
        self.assemble(&descriptor).await
    }
}
