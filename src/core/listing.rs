//! Collection listing

use crate::{
    core::{
        client::RemoteSource,
        resolver::{self, NameFallback},
    },
    error::Result,
};
use tracing::{debug, instrument};
use url::Url;

/// List the children of the collection at `url`, one name per line
///
/// Names appear in the order the server returned them; files and
/// collections are not distinguished.
#[instrument(skip_all, fields(url = %url))]
pub fn list<S: RemoteSource + ?Sized>(source: &S, url: &Url) -> Result<String> {
    let multistatus = source.list(url)?;
    let entries = resolver::children(url, &multistatus, NameFallback::RawHref);
    debug!("Listing has {} entries", entries.len());

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    Ok(names.join("\n"))
}
