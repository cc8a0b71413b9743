//! Assets embedded into the binary at build time.
//!
//! | Asset | Source | Installed as |
//! |-------|--------|--------------|
//! | Info.plist template | `assets/Info.plist.hbs` | `Contents/Info.plist` (rendered) |
//! | Launcher stub | `assets/universalJavaApplicationStub` | `Contents/MacOS/universalJavaApplicationStub` |

/// Handlebars template for `Contents/Info.plist`.
///
/// Placeholders: `executable`, `info`, `icon_name`, `identifier`, `app_name`,
/// `version`, `copyright`, `main_class`, `class_path`. The context also carries
/// `java_home` and `jar_name` for custom templates.
pub const INFO_PLIST_TEMPLATE: &str = include_str!("../../../assets/Info.plist.hbs");

/// Launcher executable placed in `Contents/MacOS`.
pub const LAUNCHER_STUB: &[u8] = include_bytes!("../../../assets/universalJavaApplicationStub");

/// File name of the launcher inside `Contents/MacOS`; also `CFBundleExecutable`.
pub const LAUNCHER_NAME: &str = "universalJavaApplicationStub";
