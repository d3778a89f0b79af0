//! Storefront CLI

use std::process::ExitCode;

use tracing::error;

use crate::cli::{config::StoreConfig, observability};

mod cli;

fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments; clap prints help and
    // usage errors itself
    let config = match StoreConfig::load() {
        Ok(config) => config,
        Err(err) => err.exit(),
    };

    if let Err(err) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {err}");
        }
    }

    match cli::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "storefront command failed");

            #[expect(
                clippy::print_stderr,
                reason = "the blocking message is shown to the shopper, not logged"
            )]
            {
                eprintln!("{}", err.blocking_message());
            }

            ExitCode::FAILURE
        }
    }
}
