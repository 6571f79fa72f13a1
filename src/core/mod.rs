//! Core WebDAV functionality
//!
//! Contains the PROPFIND client, the multi-status model, href resolution
//! and the three operations built on them: listing, recursive mirroring
//! and single-file download.

pub mod client;
pub mod fetch;
pub mod listing;
pub mod mirror;
pub mod multistatus;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{RemoteSource, WebDavClient};
pub use mirror::{Mirror, MirrorSummary};
pub use multistatus::Multistatus;
pub use resolver::{Entry, NameFallback};
