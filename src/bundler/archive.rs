//! Jar inspection: path validation and `Main-Class` extraction.

use path_absolutize::Absolutize;
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use crate::bundler::{
    descriptor::{CLASS_PATH_PREFIX, InspectedArchive},
    error::{Error, Result},
    host::CommandRunner,
};

/// Extension an archive must carry (case-sensitive).
pub const ARCHIVE_EXTENSION: &str = "jar";

/// Location of the manifest inside a jar.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

const MAIN_CLASS_KEY: &str = "Main-Class";

/// Source of the raw manifest text of an archive.
pub trait ManifestSource {
    /// Returns the manifest text of `archive`.
    fn read_manifest(&self, archive: &Path) -> Result<String>;
}

/// Reads the manifest in-process with the `zip` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipManifest;

impl ManifestSource for ZipManifest {
    fn read_manifest(&self, archive: &Path) -> Result<String> {
        let invalid = |reason: String| Error::InvalidArchive {
            path: archive.to_path_buf(),
            reason,
        };
        let file = File::open(archive).map_err(|e| invalid(format!("cannot open: {e}")))?;
        let mut zip = zip::ZipArchive::new(file)?;

        // Entry names in jars are case-sensitive in theory, but some tools
        // write `meta-inf/manifest.mf`.
        let name = zip
            .file_names()
            .find(|n| n.eq_ignore_ascii_case(MANIFEST_ENTRY))
            .map(str::to_owned)
            .ok_or_else(|| invalid(format!("no {MANIFEST_ENTRY} entry")))?;

        let mut entry = zip.by_name(&name)?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| invalid(format!("unreadable {MANIFEST_ENTRY}: {e}")))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reads the manifest by running `unzip -p`.
pub struct UnzipManifest<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> UnzipManifest<'a, R> {
    /// Creates a reader that spawns `unzip` through `runner`.
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ManifestSource for UnzipManifest<'_, R> {
    fn read_manifest(&self, archive: &Path) -> Result<String> {
        let archive_arg = archive.to_string_lossy();
        let args = ["-p", archive_arg.as_ref(), MANIFEST_ENTRY];
        let command = format!("unzip {}", args.join(" "));

        let output = self
            .runner
            .run("unzip", &args)
            .map_err(|error| Error::CommandFailed {
                command: command.clone(),
                error,
            })?;
        if !output.success {
            return Err(Error::CommandFailed {
                command,
                error: std::io::Error::other(format!(
                    "exit status {}: {}",
                    output
                        .code
                        .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                    output.stderr.trim()
                )),
            });
        }
        Ok(output.stdout)
    }
}

/// Resolves `raw` against `working_dir` and checks it names an existing `.jar` file.
pub fn resolve_archive_path(raw: &str, working_dir: &Path) -> Result<PathBuf> {
    if raw.is_empty() {
        return Err(Error::InvalidArchive {
            path: PathBuf::new(),
            reason: "no archive path supplied".into(),
        });
    }

    let path = Path::new(raw)
        .absolutize_from(working_dir)
        .map_err(|e| Error::InvalidArchive {
            path: PathBuf::from(raw),
            reason: e.to_string(),
        })?
        .into_owned();

    if path.extension().and_then(|e| e.to_str()) != Some(ARCHIVE_EXTENSION) {
        return Err(Error::InvalidArchive {
            path,
            reason: format!("expected a .{ARCHIVE_EXTENSION} file"),
        });
    }
    if !path.is_file() {
        return Err(Error::InvalidArchive {
            path,
            reason: "file does not exist".into(),
        });
    }
    Ok(path)
}

/// Extracts the entry class from manifest text.
///
/// Continuation lines (starting with a single space) are joined to the line
/// before them. The key is matched case-insensitively, the first matching
/// entry wins, and the first whitespace-separated token of its value is
/// returned.
pub fn parse_main_class(manifest: &str) -> Option<String> {
    unfold_manifest(manifest).into_iter().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if !key.trim().eq_ignore_ascii_case(MAIN_CLASS_KEY) {
            return None;
        }
        value.split_whitespace().next().map(str::to_owned)
    })
}

fn unfold_manifest(manifest: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in manifest.lines() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        match (raw.strip_prefix(' '), lines.last_mut()) {
            (Some(rest), Some(previous)) => previous.push_str(rest),
            _ => lines.push(raw.to_string()),
        }
    }
    lines
}

/// Validates the archive path and extracts its entry class.
pub fn inspect_archive<M: ManifestSource>(
    raw: &str,
    working_dir: &Path,
    source: &M,
) -> Result<InspectedArchive> {
    let path = resolve_archive_path(raw, working_dir)?;
    let manifest = source.read_manifest(&path)?;

    let entry_class = parse_main_class(&manifest)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::MissingEntryClass {
            archive: path.clone(),
        })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(InspectedArchive {
        class_path: format!("{CLASS_PATH_PREFIX}/{file_name}"),
        path,
        entry_class,
    })
}
