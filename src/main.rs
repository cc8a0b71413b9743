//! jar2app - package a Java archive as a macOS application bundle.

use jar2app::cli;
use jar2app::cli::OutputManager;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false);
            output.error(&format!("{}: {e}", e.category()));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.indent("💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&format!("  {suggestion}"));
                }
            }

            process::exit(1);
        }
    }
}
