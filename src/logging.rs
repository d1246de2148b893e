// src/logging.rs
// =============================================================================
// Diagnostics setup.
//
// The report itself goes to stdout with println!, so everything here is
// written to stderr. That keeps `--json` output machine-readable even with
// -vv turned on.
// =============================================================================

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and above. The report already says what happened.
    #[default]
    Normal,
    /// Debug events (one per resolution and HTTP request).
    Verbose,
    /// Everything, including reqwest/hyper internals when RUST_LOG allows it.
    Trace,
}

impl Verbosity {
    /// Convert verbosity to a tracing level.
    #[must_use]
    pub fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("docs_linkcheck={}", verbosity.to_level());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(false)
            .with_line_number(false),
    );

    // A second call (tests) finds a subscriber already set; that's fine.
    let _ = subscriber.try_init();
}
