//! Kodegen Bundler npm - npm packages for multi-platform release binaries.
//!
//! This binary wraps each platform binary of a release into its own npm
//! package and generates the umbrella package that launches the right one.

use kodegen_bundler_npm::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
