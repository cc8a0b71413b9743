//! macOS application bundle support.
//!
//! Bundles are assembled on any host; nothing here calls macOS-only tools.
//!
//! - [`layout`]: paths inside `<App>.app`
//! - [`plist`]: Info.plist rendering and validation
//! - [`app`]: directory creation, launcher installation and payload copies
//!
//! Code signing and notarization are out of scope.

pub mod app;
pub mod layout;
pub mod plist;
