//! WebDAV HTTP client
//!
//! Sends `PROPFIND` and plain `GET` requests with a blocking `reqwest` client.

use crate::{
    config::ClientConfig,
    core::multistatus::{self, Multistatus},
    error::{DavError, Result},
};
use reqwest::{
    Method, StatusCode,
    blocking::Client,
    header::{CONTENT_TYPE, HeaderValue},
};
use std::io::Read;
use tracing::{debug, instrument};
use url::Url;

/// Request body asking for exactly `displayname` and `resourcetype`
pub const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:displayname/>
    <D:resourcetype/>
  </D:prop>
</D:propfind>"#;

/// Status a successful PROPFIND must return
pub const MULTI_STATUS: StatusCode = StatusCode::MULTI_STATUS;

/// Remote side of every operation: list a collection, open a file
pub trait RemoteSource {
    /// Fetch the immediate children (plus self-entry) of a collection
    fn list(&self, url: &Url) -> Result<Multistatus>;

    /// Open a file for streaming
    fn open(&self, url: &Url) -> Result<Box<dyn Read>>;
}

/// Client talking to a real WebDAV server
#[derive(Debug, Clone)]
pub struct WebDavClient {
    http: Client,
}

impl WebDavClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DavError::request("Failed to build HTTP client", e))?;
        Ok(Self { http })
    }

    fn propfind_method() -> Result<Method> {
        Method::from_bytes(b"PROPFIND")
            .map_err(|e| DavError::request("Invalid PROPFIND method", e))
    }
}

impl RemoteSource for WebDavClient {
    #[instrument(skip_all, fields(url = %url))]
    fn list(&self, url: &Url) -> Result<Multistatus> {
        debug!("Sending PROPFIND");

        let response = self
            .http
            .request(Self::propfind_method()?, url.clone())
            .header("Depth", "1")
            .header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
            .body(PROPFIND_BODY)
            .send()
            .map_err(|e| DavError::transport("PROPFIND", url.as_str(), e))?;

        let status = response.status();
        if status != MULTI_STATUS {
            return Err(DavError::unexpected_status(status.as_u16(), url.as_str()));
        }

        let body = response
            .bytes()
            .map_err(|e| DavError::transport("PROPFIND", url.as_str(), e))?;
        debug!("Received {} byte multi-status body", body.len());

        multistatus::decode(&body)
    }

    #[instrument(skip_all, fields(url = %url))]
    fn open(&self, url: &Url) -> Result<Box<dyn Read>> {
        debug!("Sending GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| DavError::transport("GET", url.as_str(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DavError::unexpected_status(status.as_u16(), url.as_str()));
        }

        Ok(Box::new(response))
    }
}
