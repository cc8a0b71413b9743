//! Build command implementation.
//!
//! Resolves the bundle metadata, reports it, and assembles the bundle unless
//! `--dry-run` was given.

use crate::bundler::{BundleDescriptor, Bundler, IconRef, SystemHost};
use crate::cli::{Args, OutputManager, RuntimeConfig};
use crate::error::{CliError, Result};

/// Execute the build command
pub(super) async fn execute_build(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    output.banner(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;

    let working_directory =
        std::env::current_dir().map_err(|source| CliError::WorkingDirectory { source })?;
    let settings = args.to_settings(&working_directory).build()?;

    let bundler = Bundler::new(settings, SystemHost);
    let descriptor = bundler.resolve()?;
    report_descriptor(&descriptor, output)?;

    if config.is_dry_run() {
        output.data(&serde_json::to_string_pretty(&descriptor)?)?;
        return Ok(0);
    }

    let artifact = bundler.assemble(&descriptor).await?;
    output.success(&format!("build app {}.app successful!", descriptor.app_name))?;
    output.indent(&format!(
        "{} ({} bytes, sha256 {})",
        artifact.path.display(),
        artifact.size,
        artifact.checksum
    ))?;
    Ok(0)
}

fn report_descriptor(descriptor: &BundleDescriptor, output: &OutputManager) -> std::io::Result<()> {
    output.field("java home", &descriptor.java_home.path().display().to_string())?;
    output.field("jar path", &descriptor.archive_path.display().to_string())?;
    output.field("main class", &descriptor.entry_class)?;
    output.field("app name", &descriptor.app_name)?;

    match (&descriptor.icon, &descriptor.icon_rejection) {
        (IconRef::Custom { path, .. }, _) => {
            output.field("icon path", &path.display().to_string())?;
        }
        (IconRef::Default, Some(rejection)) => {
            output.warn(&format!("icon path  : {rejection}, use default icon."))?;
        }
        (IconRef::Default, None) => {
            output.field("icon path", "none, use default icon")?;
        }
    }
    Ok(())
}
