// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: the tool does one thing. Every argument is
// optional, so plain `docs-linkcheck` checks ./docs with the defaults.
// Flags given here win over the config file and the environment.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::logging::Verbosity;

// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "docs-linkcheck",
    version,
    about = "Validate the links inside a Markdown/MDX documentation tree",
    long_about = "docs-linkcheck walks a documentation content directory, checks every inline \
                  [text](target) link against the filesystem or the network, and exits non-zero \
                  if any of them is broken. Made to gate CI pipelines."
)]
pub struct Cli {
    /// Content directory to scan (default: docs)
    ///
    /// This is a positional argument (optional)
    pub root: Option<PathBuf>,

    /// Output results in JSON format instead of the per-file report
    #[arg(long)]
    pub json: bool,

    /// Path to a TOML config file (default: ./docs-linkcheck.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Timeout in seconds for each external request
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// How many links of one file may be checked at once (1 = sequential)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// URL prefix the content root is served under, e.g. /docs ("" to disable)
    #[arg(long, value_name = "PREFIX")]
    pub route_prefix: Option<String>,

    /// Increase diagnostics on stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    // The flags that feed into the configuration layers
    pub fn overrides(&self) -> Overrides {
        Overrides {
            content_root: self.root.clone(),
            route_prefix: self.route_prefix.clone(),
            timeout_secs: self.timeout,
            concurrency: self.concurrency,
        }
    }
}
