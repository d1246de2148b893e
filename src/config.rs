// src/config.rs
// =============================================================================
// Run configuration.
//
// Sources, later ones win:
//   1. built-in defaults (check ./docs the way the old script did)
//   2. docs-linkcheck.toml in the working directory, or the --config file
//   3. DOCS_LINKCHECK_* environment variables
//   4. command-line flags
//
// Every field has a default, so running the binary with no arguments at all
// is a valid invocation.
// =============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file looked up in the working directory when --config is absent.
pub const DEFAULT_CONFIG_FILE: &str = "docs-linkcheck.toml";

/// Prefix for environment overrides, e.g. `DOCS_LINKCHECK_TIMEOUT_SECS=10`.
pub const ENV_PREFIX: &str = "DOCS_LINKCHECK_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the documentation sources.
    pub content_root: PathBuf,
    /// URL path the site serves the content root under (`/docs/intro` -> `docs/intro.mdx`).
    /// Empty string disables prefix stripping.
    pub route_prefix: String,
    /// File extensions (without the dot) treated as documents.
    pub extensions: Vec<String>,
    /// Per-request timeout for external links.
    pub timeout_secs: u64,
    /// Redirects followed before an external check gives up.
    pub max_redirects: usize,
    /// How many links of one file may be checked at the same time.
    /// 1 means strictly sequential.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("docs"),
            route_prefix: "/docs".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            timeout_secs: 5,
            max_redirects: 5,
            concurrency: 1,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

impl Config {
    /// Loads and validates configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested config file is missing,
    /// if any layer fails to parse, or if the merged values are invalid.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(Error::ConfigValidation {
                    message: format!("config file {} not found", path.display()),
                });
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Checks value ranges that serde can't express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.concurrency == 0 {
            return Err(Error::ConfigValidation {
                message: "concurrency must be at least 1".to_string(),
            });
        }

        if self.extensions.is_empty() {
            return Err(Error::ConfigValidation {
                message: "extensions must list at least one document extension".to_string(),
            });
        }

        if !self.route_prefix.is_empty() && !self.route_prefix.starts_with('/') {
            return Err(Error::ConfigValidation {
                message: format!(
                    "route_prefix must start with '/' (got {:?})",
                    self.route_prefix
                ),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True if `path` has one of the configured document extensions.
    #[must_use]
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }
}
