//! Gryadka storefront command-line client

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the binary reports command results on stdout and fatal errors on stderr"
)]

use std::process;

use tracing::error;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let cli = Cli::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = gryadka_client::observability::init(cli.logging()) {
        eprintln!("Logging error: {e}");

        process::exit(1);
    }

    if let Err(message) = cli.run().await {
        error!("{message}");
        eprintln!("{message}");

        process::exit(1);
    }
}
