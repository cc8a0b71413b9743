//! macOS application bundle (.app) assembly.
//!
//! Given a finished [`BundleDescriptor`], creates
//!
//! ```text
//! <App>.app/Contents/Info.plist
//! <App>.app/Contents/MacOS/universalJavaApplicationStub
//! <App>.app/Contents/Java/<archive>.jar
//! <App>.app/Contents/Resources/<icon>.icns   (custom icon only)
//! ```
//!
//! Every failure is fatal. When this run created the bundle root, a failed
//! assembly removes it again unless the caller asked to keep partial output.

use std::path::{Path, PathBuf};

use super::{layout::BundleLayout, plist::write_info_plist};
use crate::bundler::{
    BundledArtifact,
    builder::Stage,
    descriptor::BundleDescriptor,
    error::{Context, Result},
    resources::LAUNCHER_STUB,
    utils::{checksum, fs},
};

/// Switches controlling assembly.
#[derive(Clone, Debug, Default)]
pub struct AssembleOptions {
    /// Custom Info.plist template.
    pub plist_template: Option<PathBuf>,
    /// Remove an existing bundle first.
    pub clean: bool,
    /// Leave a partially assembled bundle behind on failure.
    pub keep_partial: bool,
}

/// Assembles the bundle described by `descriptor`.
///
/// Returns the bundle path with its total size and tree checksum.
pub async fn bundle_project(
    descriptor: &BundleDescriptor,
    options: &AssembleOptions,
) -> Result<BundledArtifact> {
    let layout = BundleLayout::new(&descriptor.output_directory, &descriptor.app_name);
    log::info!(
        "Bundling {}.app at {}",
        descriptor.app_name,
        layout.root().display()
    );

    let existed = !options.clean && layout.root().exists();

    if let Err(e) = assemble(descriptor, &layout, options).await {
        if !existed && !options.keep_partial {
            log::warn!("Removing partial bundle {}", layout.root().display());
            if let Err(cleanup) = fs::remove_dir_all(layout.root()).await {
                log::warn!("Could not remove partial bundle: {cleanup}");
            }
        }
        return Err(e);
    }

    let digest = checksum::tree_sha256(layout.root())
        .await
        .context("hashing finished bundle")?;

    Ok(BundledArtifact {
        path: layout.root().to_path_buf(),
        size: digest.size,
        checksum: digest.sha256,
    })
}

async fn assemble(
    descriptor: &BundleDescriptor,
    layout: &BundleLayout,
    options: &AssembleOptions,
) -> Result<()> {
    create_layout(layout, options.clean)
        .await
        .context(Stage::CreateLayout)?;
    populate_layout(descriptor, layout, options)
        .await
        .context(Stage::PopulateLayout)
}

async fn populate_layout(
    descriptor: &BundleDescriptor,
    layout: &BundleLayout,
    options: &AssembleOptions,
) -> Result<()> {
    write_info_plist(
        descriptor,
        options.plist_template.as_deref(),
        &layout.info_plist(),
    )
    .await?;

    install_launcher(layout).await?;
    copy_archive(descriptor, layout).await?;
    copy_icon(descriptor, layout).await?;
    Ok(())
}

/// Creates `Contents/{MacOS,Resources,Java}`; existing directories are kept.
pub async fn create_layout(layout: &BundleLayout, clean: bool) -> Result<()> {
    if clean {
        fs::remove_dir_all(layout.root()).await?;
    }
    for dir in layout.directories() {
        fs::create_dir_all(&dir).await?;
    }
    Ok(())
}

/// Writes the launcher stub into `Contents/MacOS` with executable permissions.
async fn install_launcher(layout: &BundleLayout) -> Result<()> {
    let launcher = layout.launcher();
    log::debug!("Installing launcher {}", launcher.display());
    fs::write_executable(&launcher, LAUNCHER_STUB)
        .await
        .context("installing launcher stub")
}

/// Copies the archive into `Contents/Java` under its original name.
async fn copy_archive(descriptor: &BundleDescriptor, layout: &BundleLayout) -> Result<()> {
    let dst = layout.java_dir().join(descriptor.archive_file_name());
    copy_verified(&descriptor.archive_path, &dst)
        .await
        .context("copying archive into bundle")
}

/// Copies a custom icon into `Contents/Resources`; the default icon needs nothing.
async fn copy_icon(descriptor: &BundleDescriptor, layout: &BundleLayout) -> Result<()> {
    let Some(icon) = descriptor.icon.path() else {
        log::debug!("No custom icon, keeping the system default");
        return Ok(());
    };
    let Some(file_name) = icon.file_name() else {
        return Ok(());
    };
    let dst = layout.resources_dir().join(file_name);
    copy_verified(icon, &dst)
        .await
        .context("copying icon into bundle")
}

async fn copy_verified(src: &Path, dst: &Path) -> Result<()> {
    fs::copy_file(src, dst).await?;
    let digest = checksum::verify_copy(src, dst).await?;
    log::debug!("Copied {} ({digest})", dst.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        ErrorKind,
        descriptor::{IconRef, JavaHome},
        resources::LAUNCHER_NAME,
    };
    use tempfile::TempDir;

    fn descriptor(temp: &TempDir, icon: IconRef) -> BundleDescriptor {
        let archive_path = temp.path().join("Calculator.jar");
        std::fs::write(&archive_path, b"PK\x03\x04 not really a jar").expect("write jar");
        BundleDescriptor {
            archive_path,
            entry_class: "com.example.Calc".into(),
            app_name: "Calculator".into(),
            icon,
            icon_rejection: None,
            java_home: JavaHome::new(temp.path().to_path_buf()),
            class_path: "Contents/Java/Calculator.jar".into(),
            identifier: "app.virts".into(),
            version: "1.0.0".into(),
            copyright: "Copyright 2025 virts".into(),
            info: "Made by virts.".into(),
            output_directory: temp.path().join("out"),
        }
    }

    #[tokio::test]
    async fn test_bundle_project_layout() {
        let temp = TempDir::new().expect("temp dir");
        let descriptor = descriptor(&temp, IconRef::Default);

        let artifact = bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .expect("bundle");

        let root = temp.path().join("out/Calculator.app");
        assert_eq!(artifact.path, root);
        assert!(root.join("Contents/MacOS").is_dir());
        assert!(root.join("Contents/Resources").is_dir());
        assert!(root.join("Contents/Java").is_dir());
        assert_eq!(
            std::fs::read(root.join("Contents/Java/Calculator.jar")).expect("read"),
            std::fs::read(&descriptor.archive_path).expect("read")
        );
        assert_eq!(
            std::fs::read(root.join("Contents/MacOS").join(LAUNCHER_NAME)).expect("read"),
            LAUNCHER_STUB
        );
        let plist = std::fs::read_to_string(root.join("Contents/Info.plist")).expect("read");
        assert!(plist.contains("com.example.Calc"));
        assert!(artifact.size > 0);
        assert_eq!(artifact.checksum.len(), 64);
    }

    #[tokio::test]
    async fn test_default_icon_copies_nothing() {
        let temp = TempDir::new().expect("temp dir");
        let descriptor = descriptor(&temp, IconRef::Default);

        bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .expect("bundle");

        let resources = temp.path().join("out/Calculator.app/Contents/Resources");
        assert_eq!(std::fs::read_dir(resources).expect("read dir").count(), 0);
    }

    #[tokio::test]
    async fn test_custom_icon_copied_under_original_name() {
        let temp = TempDir::new().expect("temp dir");
        let icon_path = temp.path().join("calc.icns");
        std::fs::write(&icon_path, b"icns\x00\x01").expect("write icon");
        let descriptor = descriptor(
            &temp,
            IconRef::Custom {
                path: icon_path,
                base_name: "calc".into(),
            },
        );

        bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .expect("bundle");

        let copied = temp
            .path()
            .join("out/Calculator.app/Contents/Resources/calc.icns");
        assert_eq!(std::fs::read(copied).expect("read"), b"icns\x00\x01");
    }

    #[tokio::test]
    async fn test_assembly_twice_is_idempotent() {
        let temp = TempDir::new().expect("temp dir");
        let descriptor = descriptor(&temp, IconRef::Default);

        let first = bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .expect("first");
        let second = bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .expect("second");
        assert_eq!(first.checksum, second.checksum);
    }

    #[tokio::test]
    async fn test_archive_already_inside_bundle_survives() {
        let temp = TempDir::new().expect("temp dir");
        let mut descriptor = descriptor(&temp, IconRef::Default);
        let in_place = temp
            .path()
            .join("out/Calculator.app/Contents/Java/Calculator.jar");
        std::fs::create_dir_all(in_place.parent().expect("parent")).expect("mkdir");
        std::fs::rename(&descriptor.archive_path, &in_place).expect("move jar");
        descriptor.archive_path = in_place.clone();

        bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .expect("bundle");
        assert_eq!(
            std::fs::read(&in_place).expect("read"),
            b"PK\x03\x04 not really a jar"
        );
    }

    #[tokio::test]
    async fn test_clean_removes_stale_files() {
        let temp = TempDir::new().expect("temp dir");
        let descriptor = descriptor(&temp, IconRef::Default);
        let stale = temp.path().join("out/Calculator.app/Contents/Resources/old.icns");
        std::fs::create_dir_all(stale.parent().expect("parent")).expect("mkdir");
        std::fs::write(&stale, b"old").expect("write");

        let options = AssembleOptions {
            clean: true,
            ..Default::default()
        };
        bundle_project(&descriptor, &options).await.expect("bundle");
        assert!(!stale.exists());
    }

    #[tokio::test]
    async fn test_failed_assembly_removes_new_bundle() {
        let temp = TempDir::new().expect("temp dir");
        let mut descriptor = descriptor(&temp, IconRef::Default);
        descriptor.archive_path = temp.path().join("vanished.jar");

        let err = bundle_project(&descriptor, &AssembleOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FilesystemFailure);
        assert!(!temp.path().join("out/Calculator.app").exists());
    }

    #[tokio::test]
    async fn test_failed_assembly_keeps_partial_on_request() {
        let temp = TempDir::new().expect("temp dir");
        let mut descriptor = descriptor(&temp, IconRef::Default);
        descriptor.archive_path = temp.path().join("vanished.jar");

        let options = AssembleOptions {
            keep_partial: true,
            ..Default::default()
        };
        assert!(bundle_project(&descriptor, &options).await.is_err());
        assert!(temp.path().join("out/Calculator.app/Contents/Info.plist").exists());
    }

    #[tokio::test]
    async fn test_failed_assembly_never_removes_existing_bundle() {
        let temp = TempDir::new().expect("temp dir");
        let mut descriptor = descriptor(&temp, IconRef::Default);
        let root = temp.path().join("out/Calculator.app");
        std::fs::create_dir_all(&root).expect("mkdir");
        descriptor.archive_path = temp.path().join("vanished.jar");

        assert!(
            bundle_project(&descriptor, &AssembleOptions::default())
                .await
                .is_err()
        );
        assert!(root.is_dir());
    }
}
