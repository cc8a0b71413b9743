//! Java installation discovery.
//!
//! `JAVA_HOME` wins when it is set and non-empty. Otherwise the `java` found on
//! `PATH` is asked for its system properties and the `java.home` line is
//! parsed. Whatever candidate comes out is made absolute against the working
//! directory and must be an existing directory.

use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::bundler::{
    descriptor::JavaHome,
    error::{Error, Result},
    host::Host,
};

/// Environment variable consulted first.
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// Program queried when the variable is unset.
const JAVA_PROGRAM: &str = "java";

/// Arguments making `java` print its system properties.
const JAVA_PROPERTY_ARGS: [&str; 2] = ["-XshowSettings:properties", "-version"];

/// Property naming the installation root.
const JAVA_HOME_PROPERTY: &str = "java.home";

/// Resolves the Java installation root.
///
/// A relative candidate is taken relative to `working_dir`.
///
/// # Errors
///
/// Every failure is [`Error::EnvironmentUnresolved`]; there is no retry.
pub fn resolve_java_home<H: Host>(host: &H, working_dir: &Path) -> Result<JavaHome> {
    let candidate = match host.var(JAVA_HOME_VAR).filter(|v| !v.is_empty()) {
        Some(value) => {
            log::debug!("Using {JAVA_HOME_VAR}={value}");
            PathBuf::from(value)
        }
        None => {
            log::warn!("{JAVA_HOME_VAR} is not set, asking {JAVA_PROGRAM} for java.home");
            query_java_home(host)?
        }
    };

    if candidate.as_os_str().is_empty() {
        return Err(Error::EnvironmentUnresolved {
            reason: "empty Java home".into(),
        });
    }
    let home = candidate
        .absolutize_from(working_dir)
        .map_err(|e| Error::EnvironmentUnresolved {
            reason: format!("{}: {e}", candidate.display()),
        })?
        .into_owned();
    validate(&home)?;
    Ok(JavaHome::new(home))
}

fn query_java_home<H: Host>(host: &H) -> Result<PathBuf> {
    let command = format!("{JAVA_PROGRAM} {}", JAVA_PROPERTY_ARGS.join(" "));
    let output = host
        .run(JAVA_PROGRAM, &JAVA_PROPERTY_ARGS)
        .map_err(|e| Error::EnvironmentUnresolved {
            reason: format!("failed to run `{command}`: {e}"),
        })?;

    if !output.success {
        return Err(Error::EnvironmentUnresolved {
            reason: format!(
                "`{command}` exited with status {}",
                output
                    .code
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string())
            ),
        });
    }

    parse_java_home(&output.combined()).ok_or_else(|| Error::EnvironmentUnresolved {
        reason: format!("`{command}` did not report {JAVA_HOME_PROPERTY}"),
    })
}

/// Extracts the value of the `java.home` property from `-XshowSettings` output.
///
/// Lines look like `    java.home = /Library/Java/.../Home`.
pub fn parse_java_home(output: &str) -> Option<PathBuf> {
    output.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        if key.trim() != JAVA_HOME_PROPERTY {
            return None;
        }
        let value = value.trim();
        (!value.is_empty()).then(|| PathBuf::from(value))
    })
}

fn validate(candidate: &Path) -> Result<()> {
    match std::fs::metadata(candidate) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::EnvironmentUnresolved {
            reason: format!("{} is not a directory", candidate.display()),
        }),
        Err(e) => Err(Error::EnvironmentUnresolved {
            reason: format!("{}: {e}", candidate.display()),
        }),
    }
}
