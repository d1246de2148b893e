// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and load the layered configuration
// 3. Walk the content tree, printing each file's report as it finishes
// 4. Print the summary (or the JSON report)
// 5. Exit with proper code (0 = all links valid, 1 = broken links, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - link extraction and checking
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - layered configuration
mod error; // src/error.rs - fatal error types
mod logging; // src/logging.rs - tracing setup
mod report; // src/report.rs - results and their rendering
mod walk; // src/walk/ - content tree traversal

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method

use checker::Checker;
use cli::Cli;
use config::Config;

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole anyhow context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every link is valid
//   Ok(1) = at least one broken link or unreadable document
//   Err   = the run couldn't happen (bad config, missing content root, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbosity());

    let config = Config::load(cli.config.as_deref(), cli.overrides())
        .context("could not load configuration")?;
    let checker = Checker::from_config(&config)?;

    if !cli.json {
        println!("🔍 Checking links in {}\n", config.content_root.display());
    }

    let report = walk::check_tree(&config, &checker, |file| {
        if !cli.json {
            println!("{}", report::render_file(file));
        }
    })
    .await
    .with_context(|| format!("could not scan {}", config.content_root.display()))?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report::render_summary(&report));
    }

    Ok(report.exit_code())
}
