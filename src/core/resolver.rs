//! Href resolution and name derivation
//!
//! Turns a decoded multi-status into the children of the requested
//! collection: the self-entry is dropped, hrefs are resolved against the
//! request URL and every child gets a display name.

use crate::core::multistatus::Multistatus;
use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

/// What to show when the server sent an empty `displayname`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFallback {
    /// The href exactly as the server sent it (listing)
    RawHref,
    /// The last path segment, percent-decoded (recursive download)
    Basename,
}

/// A child resource of the listed collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Derived display name
    pub name: String,
    /// Href as returned by the server
    pub href: String,
    /// Absolute URL: scheme and host of the request, path and query of the href
    pub url: Url,
    /// Whether the resource is a collection
    pub is_collection: bool,
}

/// Resolve every non-self response of `multistatus`, preserving server order
///
/// Hrefs that cannot be parsed and responses without a propstat are skipped.
pub fn children(request: &Url, multistatus: &Multistatus, fallback: NameFallback) -> Vec<Entry> {
    let request_path = normalized_path(request);

    multistatus
        .response
        .iter()
        .filter_map(|response| {
            let resolved = request.join(&response.href).ok()?;
            if normalized_path(&resolved) == request_path {
                debug!("Skipping self-entry {}", response.href);
                return None;
            }

            let prop = response.first_prop()?;
            let name = if prop.displayname.is_empty() {
                match fallback {
                    NameFallback::RawHref => response.href.clone(),
                    NameFallback::Basename => basename(&resolved),
                }
            } else {
                prop.displayname.clone()
            };

            Some(Entry {
                name,
                href: response.href.clone(),
                url: download_url(request, &resolved),
                is_collection: prop.is_collection(),
            })
        })
        .collect()
}

/// Combine the request's scheme and authority with the href's path and query
pub fn download_url(request: &Url, resolved: &Url) -> Url {
    let mut url = request.clone();
    url.set_path(resolved.path());
    url.set_query(resolved.query());
    url.set_fragment(None);
    url
}

/// Last non-empty path segment, percent-decoded; `/` for the root
pub fn basename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map_or_else(
            || "/".to_string(),
            |segment| percent_decode_str(segment).decode_utf8_lossy().to_string(),
        )
}

/// Percent-decoded path without trailing slashes
///
/// Two URLs naming the same collection map to the same key.
pub fn normalized_path(url: &Url) -> String {
    let decoded = percent_decode_str(url.path()).decode_utf8_lossy();
    decoded.trim_end_matches('/').to_string()
}
