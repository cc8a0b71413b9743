//! Command line argument parsing and validation.
//!
//! Flags keep their historical single-dash spelling (`-jar Calculator.jar`,
//! `-v=2.0`). [`normalize_args`] rewrites those to the double-dash form clap
//! expects before parsing, so `--jar` works as well.

use clap::{Parser, ValueEnum};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::bundler::{
    DEFAULT_COPYRIGHT, DEFAULT_IDENTIFIER, DEFAULT_INFO, DEFAULT_VERSION, ManifestReader,
    SettingsBuilder, validate_app_name,
};
use crate::error::CliError;

/// Single-dash flag names and the long flag each one maps to.
const SHORT_STYLE_FLAGS: &[(&str, &str)] = &[
    ("jar", "jar"),
    ("icon", "icon"),
    ("info", "info"),
    ("name", "name"),
    ("id", "id"),
    ("copyright", "copyright"),
    ("v", "app-version"),
    ("app-version", "app-version"),
    ("out-dir", "out-dir"),
    ("manifest-reader", "manifest-reader"),
    ("plist-template", "plist-template"),
];

/// Package a Java archive as a macOS application bundle
#[derive(Parser, Debug)]
#[command(
    name = "jar2app",
    version,
    about = "Package a Java archive as a macOS application bundle",
    long_about = "Package an executable Java archive as a macOS .app bundle.

The bundle is created in the current directory as <name>.app and launches the
archive's Main-Class through the bundled Java application stub.

Usage:
  jar2app -jar Calculator.jar
  jar2app -jar Calculator.jar -icon calc.icns -name \"Calc Pro\" -id com.example.calc
  jar2app -jar Calculator.jar -v 2.1.0 --out-dir dist --clean"
)]
pub struct Args {
    /// Path to the Java archive
    #[arg(long, value_name = "PATH", default_value = "")]
    pub jar: String,

    /// Path to an .icns icon
    #[arg(long, value_name = "PATH", default_value = "")]
    pub icon: String,

    /// Application info string
    #[arg(long, default_value = DEFAULT_INFO)]
    pub info: String,

    /// Application name (defaults to the archive name)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Bundle identifier
    #[arg(long = "id", default_value = DEFAULT_IDENTIFIER)]
    pub identifier: String,

    /// Copyright string
    #[arg(long, default_value = DEFAULT_COPYRIGHT)]
    pub copyright: String,

    /// Application version (`-v`)
    #[arg(long = "app-version", value_name = "VERSION", default_value = DEFAULT_VERSION)]
    pub app_version: String,

    /// Directory to create the bundle in (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// How the archive manifest is read
    #[arg(long, value_enum, default_value_t = ManifestReaderArg::Zip)]
    pub manifest_reader: ManifestReaderArg,

    /// Custom Info.plist handlebars template
    #[arg(long, value_name = "PATH")]
    pub plist_template: Option<PathBuf>,

    /// Remove an existing bundle before assembling
    #[arg(long)]
    pub clean: bool,

    /// Keep a partially assembled bundle when assembly fails
    #[arg(long)]
    pub keep_partial: bool,

    /// Resolve metadata and print it as JSON without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Manifest reader selection on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ManifestReaderArg {
    /// Read the manifest in-process
    #[default]
    Zip,
    /// Shell out to `unzip -p`
    Unzip,
}

impl From<ManifestReaderArg> for ManifestReader {
    fn from(arg: ManifestReaderArg) -> Self {
        match arg {
            ManifestReaderArg::Zip => ManifestReader::Zip,
            ManifestReaderArg::Unzip => ManifestReader::Unzip,
        }
    }
}

impl Args {
    /// Parse arguments after normalizing single-dash flags
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        validate_app_name(&self.name).map_err(|e| CliError::InvalidArguments {
            reason: e.to_string(),
        })
    }

    /// Settings for a run rooted at `working_directory`
    pub fn to_settings(&self, working_directory: &Path) -> SettingsBuilder {
        let mut builder = SettingsBuilder::new()
            .archive(&self.jar)
            .icon(&self.icon)
            .app_name(&self.name)
            .identifier(&self.identifier)
            .version(&self.app_version)
            .copyright(&self.copyright)
            .info(&self.info)
            .working_directory(working_directory)
            .manifest_reader(self.manifest_reader.into())
            .clean(self.clean)
            .keep_partial(self.keep_partial);

        if let Some(dir) = &self.out_dir {
            builder = builder.output_directory(dir);
        }
        if let Some(template) = &self.plist_template {
            builder = builder.plist_template(template);
        }
        builder
    }
}

/// Rewrites `-flag`, `-flag=value` and `--v` into the long form clap parses.
///
/// The program name, values following a flag, anything after `--` and
/// unknown flags pass through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expecting_value = false;
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough || expecting_value {
            expecting_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let Some(flag) = text.strip_prefix("--").or_else(|| text.strip_prefix('-')) else {
            normalized.push(arg);
            continue;
        };
        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (flag, None),
        };

        let Some(long) = long_name(name) else {
            normalized.push(arg);
            continue;
        };
        match value {
            Some(value) => normalized.push(format!("--{long}={value}").into()),
            None => {
                expecting_value = true;
                normalized.push(format!("--{long}").into());
            }
        }
    }

    normalized
}

fn long_name(name: &str) -> Option<&'static str> {
    SHORT_STYLE_FLAGS
        .iter()
        .find(|(flag, _)| *flag == name)
        .map(|(_, long)| *long)
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    dry_run: bool,
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Whether the run stops after resolution
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // JSON on stdout must not be interleaved with status lines.
        Self {
            output: super::OutputManager::new(args.dry_run),
            dry_run: args.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut full = vec!["jar2app"];
        full.extend_from_slice(args);
        Args::try_parse_normalized(full).expect("parse")
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let normalized = normalize_args(["jar2app", "-jar", "a.jar", "-v=2.0", "-id", "x.y"]);
        assert_eq!(
            normalized,
            vec!["jar2app", "--jar", "a.jar", "--app-version=2.0", "--id", "x.y"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let normalized = normalize_args(["jar2app", "-name", "-v", "--", "-jar"]);
        assert_eq!(
            normalized,
            vec!["jar2app", "--name", "-v", "--", "-jar"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["-jar", "Calculator.jar"]);
        assert_eq!(args.jar, "Calculator.jar");
        assert_eq!(args.icon, "");
        assert_eq!(args.name, "");
        assert_eq!(args.identifier, DEFAULT_IDENTIFIER);
        assert_eq!(args.copyright, DEFAULT_COPYRIGHT);
        assert_eq!(args.app_version, DEFAULT_VERSION);
        assert_eq!(args.info, DEFAULT_INFO);
        assert_eq!(args.manifest_reader, ManifestReaderArg::Zip);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_both_spellings_parse() {
        let go_style = parse(&["-jar", "a.jar", "-icon", "a.icns", "-info", "hello", "-v", "3.0"]);
        let long = parse(&[
            "--jar",
            "a.jar",
            "--icon",
            "a.icns",
            "--info",
            "hello",
            "--app-version",
            "3.0",
        ]);
        assert_eq!(go_style.icon, long.icon);
        assert_eq!(go_style.info, "hello");
        assert_eq!(go_style.icon, "a.icns");
        assert_eq!(go_style.app_version, long.app_version);
    }

    #[test]
    fn test_extra_flags() {
        let args = parse(&[
            "-jar",
            "a.jar",
            "--out-dir",
            "dist",
            "--manifest-reader",
            "unzip",
            "--clean",
            "--keep-partial",
            "--dry-run",
        ]);
        assert_eq!(args.out_dir.as_deref(), Some(Path::new("dist")));
        assert_eq!(args.manifest_reader, ManifestReaderArg::Unzip);
        assert!(args.clean && args.keep_partial && args.dry_run);
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = Args::try_parse_normalized(["jar2app", "-bogus", "x"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_validate_rejects_path_like_name() {
        let args = parse(&["-jar", "a.jar", "-name", "../Calc"]);
        assert!(matches!(
            args.validate(),
            Err(CliError::InvalidArguments { .. })
        ));
        assert!(parse(&["-jar", "a.jar", "-name", "Calc Pro"]).validate().is_ok());
    }

    #[test]
    fn test_to_settings_carries_values() {
        let args = parse(&["-jar", "a.jar", "-name", "Calc", "-info", "about", "--out-dir", "dist"]);
        let settings = args
            .to_settings(Path::new("/work"))
            .build()
            .expect("settings");
        assert_eq!(settings.archive(), "a.jar");
        assert_eq!(settings.app_name(), Some("Calc"));
        assert_eq!(settings.icon(), None);
        assert_eq!(settings.info(), "about");
        assert_eq!(settings.output_directory(), Path::new("/work/dist"));
    }
}
