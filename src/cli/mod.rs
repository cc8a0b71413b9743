//! Command line interface for jar2app.
//!
//! Parses arguments (accepting both `-jar` and `--jar` spellings), runs the
//! build command, and reports progress with emoji-tagged colored output.

mod args;
pub mod commands;
mod output;

pub use args::{Args, ManifestReaderArg, RuntimeConfig, normalize_args};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
///
/// Returns the process exit code. Help and version requests exit 0; any
/// other argument error is printed and exits 1.
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse_normalized(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print()?;
            return Ok(code);
        }
    };
    execute_command(args).await
}

