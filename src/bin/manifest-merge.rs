//! manifest-merge CLI Binary
//!
//! Merges a directory tree of YAML manifests into a single multi-document file.

use clap::Parser;
use manifest_merge::logging::init_logging;
use manifest_merge::tooling::{Cli, CliContext, DialoguerPrompter};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.logging_config(&cli))) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli, &DialoguerPrompter) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
