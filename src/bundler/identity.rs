//! Application name and icon derivation.
//!
//! Neither step can fail the run. A supplied name is used verbatim; without
//! one the archive file name minus its extension is used. A supplied icon that
//! cannot be used falls back to [`IconRef::Default`] and the rejection is
//! recorded so the caller can warn about it.

use path_absolutize::Absolutize;
use std::path::Path;

use crate::bundler::descriptor::{IconRef, IconRejection, Identity};

/// Extension an icon must carry (case-sensitive).
pub const ICON_EXTENSION: &str = "icns";

/// Derives the application name.
///
/// `supplied` wins when present and non-empty.
pub fn resolve_app_name(supplied: Option<&str>, archive: &Path) -> String {
    match supplied {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => archive
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Validates the supplied icon path.
///
/// Returns the sentinel with no rejection when no icon was supplied.
pub fn resolve_icon(supplied: Option<&str>, working_dir: &Path) -> (IconRef, Option<IconRejection>) {
    let Some(raw) = supplied.filter(|s| !s.is_empty()) else {
        return (IconRef::Default, None);
    };

    match check_icon(raw, working_dir) {
        Ok(icon) => (icon, None),
        Err(rejection) => {
            log::debug!("Icon rejected: {rejection}");
            (IconRef::Default, Some(rejection))
        }
    }
}

fn check_icon(raw: &str, working_dir: &Path) -> Result<IconRef, IconRejection> {
    let path = Path::new(raw)
        .absolutize_from(working_dir)
        .map_err(|e| IconRejection::Unresolvable {
            path: raw.to_string(),
            error: e.to_string(),
        })?
        .into_owned();

    if !path.is_file() {
        return Err(IconRejection::NotFound { path });
    }
    if path.extension().and_then(|e| e.to_str()) != Some(ICON_EXTENSION) {
        return Err(IconRejection::WrongExtension { path });
    }

    let base_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(IconRef::Custom { path, base_name })
}

/// Runs both derivations.
pub fn derive_identity(
    app_name: Option<&str>,
    icon: Option<&str>,
    archive: &Path,
    working_dir: &Path,
) -> Identity {
    let app_name = resolve_app_name(app_name, archive);
    let (icon, icon_rejection) = resolve_icon(icon, working_dir);
    Identity {
        app_name,
        icon,
        icon_rejection,
    }
}
