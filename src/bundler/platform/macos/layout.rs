//! On-disk layout of a `.app` bundle.

use std::path::{Path, PathBuf};

use crate::bundler::resources::LAUNCHER_NAME;

/// Paths inside `<output>/<app name>.app`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundleLayout {
    root: PathBuf,
}

impl BundleLayout {
    /// Layout for `app_name` created under `output_dir`.
    pub fn new(output_dir: &Path, app_name: &str) -> Self {
        Self {
            root: output_dir.join(format!("{app_name}.app")),
        }
    }

    /// The `.app` directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Contents`.
    pub fn contents(&self) -> PathBuf {
        self.root.join("Contents")
    }

    /// `Contents/MacOS`, holding the launcher.
    pub fn executable_dir(&self) -> PathBuf {
        self.contents().join("MacOS")
    }

    /// `Contents/Resources`, holding the icon.
    pub fn resources_dir(&self) -> PathBuf {
        self.contents().join("Resources")
    }

    /// `Contents/Java`, holding the archive.
    pub fn java_dir(&self) -> PathBuf {
        self.contents().join("Java")
    }

    /// `Contents/Info.plist`.
    pub fn info_plist(&self) -> PathBuf {
        self.contents().join("Info.plist")
    }

    /// `Contents/MacOS/universalJavaApplicationStub`.
    pub fn launcher(&self) -> PathBuf {
        self.executable_dir().join(LAUNCHER_NAME)
    }

    /// The three directories created for every bundle.
    pub fn directories(&self) -> [PathBuf; 3] {
        [self.executable_dir(), self.resources_dir(), self.java_dir()]
    }
}
