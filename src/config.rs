//! Configuration management for davget
//!
//! Centralizes configuration options and provides validation.

use crate::{cli::Args, error::DavError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Operation selected on the command line
    pub operation: Operation,
    /// Target WebDAV URL
    pub url: Url,
    /// Directory downloads are written to
    pub output_dir: PathBuf,
    /// HTTP client configuration
    pub client: ClientConfig,
}

/// The three things davget can do with a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Print the names of a collection's children
    List,
    /// Mirror a collection tree to local disk
    Recursive,
    /// Download a single file
    Get,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    ///
    /// clap already rejects `-l` with `-r`; the check here covers callers
    /// that build `Args` directly.
    pub fn from_args(args: &Args) -> Result<Self, DavError> {
        let operation = match (args.list, args.recursive) {
            (true, true) => {
                return Err(DavError::validation("-l and -r flags are mutually exclusive"));
            }
            (true, false) => Operation::List,
            (false, true) => Operation::Recursive,
            (false, false) => Operation::Get,
        };

        let url = Url::parse(&args.url).map_err(|e| DavError::url_parse(&args.url, e))?;

        let config = Self {
            debug: args.debug,
            operation,
            url,
            output_dir: args.output_dir.clone(),
            client: ClientConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DavError> {
        match self.url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(DavError::validation(format!(
                    "unsupported URL scheme: {other}"
                )));
            }
        }

        if self.url.host_str().is_none() {
            return Err(DavError::validation(format!(
                "URL has no host: {}",
                self.url
            )));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(DavError::validation(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }

        Ok(())
    }
}
