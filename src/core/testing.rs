//! In-memory remote used by the operation tests

use crate::{
    core::{client::RemoteSource, multistatus::{self, Multistatus}},
    error::{DavError, Result},
};
use std::{
    cell::RefCell,
    collections::HashMap,
    io::{Cursor, Read},
};
use url::Url;

/// Canned PROPFIND bodies and file contents keyed by URL
#[derive(Default)]
pub struct FakeRemote {
    listings: HashMap<String, std::result::Result<String, u16>>,
    files: HashMap<String, std::result::Result<Vec<u8>, u16>>,
    pub listed: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` as the multi-status for `url`
    pub fn collection(mut self, url: &str, body: &str) -> Self {
        self.listings.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    /// Answer PROPFIND on `url` with `status`
    pub fn collection_status(mut self, url: &str, status: u16) -> Self {
        self.listings.insert(url.to_string(), Err(status));
        self
    }

    pub fn file(mut self, url: &str, content: &[u8]) -> Self {
        self.files.insert(url.to_string(), Ok(content.to_vec()));
        self
    }

    pub fn file_status(mut self, url: &str, status: u16) -> Self {
        self.files.insert(url.to_string(), Err(status));
        self
    }
}

impl RemoteSource for FakeRemote {
    fn list(&self, url: &Url) -> Result<Multistatus> {
        self.listed.borrow_mut().push(url.to_string());
        match self.listings.get(url.as_str()) {
            Some(Ok(body)) => multistatus::decode(body.as_bytes()),
            Some(Err(status)) => Err(DavError::unexpected_status(*status, url.as_str())),
            None => Err(DavError::unexpected_status(404, url.as_str())),
        }
    }

    fn open(&self, url: &Url) -> Result<Box<dyn Read>> {
        self.opened.borrow_mut().push(url.to_string());
        match self.files.get(url.as_str()) {
            Some(Ok(content)) => Ok(Box::new(Cursor::new(content.clone()))),
            Some(Err(status)) => Err(DavError::unexpected_status(*status, url.as_str())),
            None => Err(DavError::unexpected_status(404, url.as_str())),
        }
    }
}

/// Build a `DAV:` multi-status from `(href, displayname, is_collection)` rows
pub fn multistatus_xml(rows: &[(&str, &str, bool)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="utf-8"?><D:multistatus xmlns:D="DAV:">"#,
    );
    for (href, name, collection) in rows {
        let resourcetype = if *collection {
            "<D:resourcetype><D:collection/></D:resourcetype>"
        } else {
            "<D:resourcetype/>"
        };
        xml.push_str(&format!(
            "<D:response><D:href>{href}</D:href><D:propstat><D:prop>\
             <D:displayname>{name}</D:displayname>{resourcetype}</D:prop>\
             <D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>"
        ));
    }
    xml.push_str("</D:multistatus>");
    xml
}
