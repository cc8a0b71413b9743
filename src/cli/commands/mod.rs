//! Command execution.
//!
//! jar2app has a single command: build an application bundle from the parsed
//! arguments. Argument validation failures are reported here and turned into
//! exit status 1; every other failure is returned to `main`.

mod build;

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use build::execute_build;

/// Execute the command described by the parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Create output for validation errors (never quiet)
        let output = super::OutputManager::new(false);
        output.error(&format!("{validation_error}"));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);
    execute_build(&args, &config).await
}
