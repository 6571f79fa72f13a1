//! # davget
//!
//! A small WebDAV client. It issues `PROPFIND` requests, tells files from
//! collections using the returned multi-status XML, and either lists a
//! collection, mirrors a remote tree to local disk, or downloads one file.
//!
//! ## Features
//!
//! - Typed decoding of `207 Multi-Status` responses
//! - Relative and absolute href resolution against the request URL
//! - Depth-first mirroring with per-entry failure isolation
//! - Single-file download named after the last URL segment
//!
//! ## Example
//!
//! ```no_run
//! use davget::core::{listing, WebDavClient};
//! use davget::config::ClientConfig;
//!
//! let client = WebDavClient::new(&ClientConfig::default())?;
//! let url = url::Url::parse("http://localhost:8080/dav/")?;
//! println!("{}", listing::list(&client, &url)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// Log lines go to standard error so listing output on standard output
/// stays machine readable.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
