//! Command implementations for the CLI

use crate::{
    config::{Config, Operation},
    core::{Mirror, WebDavClient, fetch, listing},
};
use anyhow::Context;
use tracing::{info, instrument};

/// Execute the operation selected by the configuration
#[instrument(skip(config), fields(operation = ?config.operation))]
pub fn execute_command(config: &Config) -> anyhow::Result<()> {
    let client = WebDavClient::new(&config.client).context("Failed to create WebDAV client")?;

    match config.operation {
        Operation::List => execute_list_command(config, &client),
        Operation::Recursive => execute_recursive_command(config, &client),
        Operation::Get => execute_get_command(config, &client),
    }
}

/// Execute the list command
fn execute_list_command(config: &Config, client: &WebDavClient) -> anyhow::Result<()> {
    let output = listing::list(client, &config.url).context("Error listing URL")?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Execute the recursive download command
fn execute_recursive_command(config: &Config, client: &WebDavClient) -> anyhow::Result<()> {
    info!(
        "Mirroring {} into {}",
        config.url,
        config.output_dir.display()
    );

    Mirror::new(client)
        .run(&config.url, &config.output_dir)
        .context("Error downloading recursively")?;

    Ok(())
}

/// Execute the single-file download command
fn execute_get_command(config: &Config, client: &WebDavClient) -> anyhow::Result<()> {
    let path = fetch::download(client, &config.url, &config.output_dir)
        .context("Error downloading file")?;

    info!("Saved {}", path.display());
    Ok(())
}
