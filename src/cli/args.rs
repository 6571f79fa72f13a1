//! Command-line argument parsing and validation

use clap::Parser;
use std::path::PathBuf;

/// davget - list and download resources from a WebDAV server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "davget")]
pub struct Args {
    /// List contents of the WebDAV URL
    #[arg(short = 'l', conflicts_with = "recursive")]
    pub list: bool,

    /// Recursively download file(s) from the WebDAV URL
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Directory downloads are written to
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// WebDAV URL to operate on
    #[arg(value_name = "URL")]
    pub url: String,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
