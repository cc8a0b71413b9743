//! Info.plist rendering.
//!
//! The template is rendered with handlebars in strict mode, so a placeholder
//! the context does not provide is an error rather than an empty string. The
//! rendered text must parse as a property-list dictionary before it is written.

use handlebars::Handlebars;
use serde::Serialize;
use std::{io::Cursor, path::Path};

use crate::bundler::{
    descriptor::BundleDescriptor,
    error::{Context, Error, ErrorExt, Result},
    resources::{INFO_PLIST_TEMPLATE, LAUNCHER_NAME},
};

const TEMPLATE_NAME: &str = "Info.plist";

/// Values available to the template.
#[derive(Debug, Serialize)]
pub struct PlistContext<'a> {
    executable: &'a str,
    app_name: &'a str,
    main_class: &'a str,
    class_path: &'a str,
    jar_name: String,
    icon_name: &'a str,
    identifier: &'a str,
    version: &'a str,
    copyright: &'a str,
    info: &'a str,
    java_home: String,
}

impl<'a> PlistContext<'a> {
    /// Builds the template context for `descriptor`.
    pub fn new(descriptor: &'a BundleDescriptor) -> Self {
        Self {
            executable: LAUNCHER_NAME,
            app_name: &descriptor.app_name,
            main_class: &descriptor.entry_class,
            class_path: &descriptor.class_path,
            jar_name: descriptor.archive_file_name(),
            icon_name: descriptor.icon.base_name(),
            identifier: &descriptor.identifier,
            version: &descriptor.version,
            copyright: &descriptor.copyright,
            info: &descriptor.info,
            java_home: descriptor.java_home.path().display().to_string(),
        }
    }
}

/// Renders `template` (or the embedded one) for `descriptor`.
pub fn render_info_plist(descriptor: &BundleDescriptor, template: Option<&str>) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_template_string(TEMPLATE_NAME, template.unwrap_or(INFO_PLIST_TEMPLATE))?;

    let rendered = handlebars.render(TEMPLATE_NAME, &PlistContext::new(descriptor))?;
    validate_plist(&rendered)?;
    Ok(rendered)
}

/// Checks that `text` is a property list whose root is a dictionary.
pub fn validate_plist(text: &str) -> Result<()> {
    let value = plist::Value::from_reader_xml(Cursor::new(text.as_bytes()))
        .map_err(Error::Plist)
        .context("rendered Info.plist is not a valid property list")?;
    if value.as_dictionary().is_none() {
        return Err(Error::GenericError(
            "rendered Info.plist root is not a dictionary".into(),
        ));
    }
    Ok(())
}

/// Renders the manifest and writes it to `path`.
pub async fn write_info_plist(
    descriptor: &BundleDescriptor,
    template_path: Option<&Path>,
    path: &Path,
) -> Result<()> {
    let custom = match template_path {
        Some(template_path) => Some(
            tokio::fs::read_to_string(template_path)
                .await
                .fs_context("reading Info.plist template", template_path)?,
        ),
        None => None,
    };

    let rendered = render_info_plist(descriptor, custom.as_deref())
        .context("rendering Info.plist")?;
    tokio::fs::write(path, rendered)
        .await
        .fs_context("writing Info.plist", path)
}
