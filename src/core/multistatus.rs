//! Typed model of a WebDAV `207 Multi-Status` response
//!
//! Elements are matched by local name, so any prefix bound to `DAV:` works
//! (`D:`, `d:`, or a default namespace).

use crate::error::{DavError, Result};
use quick_xml::DeError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Deserialize;
use tracing::debug;

/// Root of a PROPFIND response
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct Multistatus {
    /// Per-resource results in server order
    pub response: Vec<Response>,
}

/// One remote resource
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct Response {
    /// Resource identifier, usually a server-relative path
    pub href: String,
    /// Property groups; only the first one is consulted
    pub propstat: Vec<Propstat>,
}

/// A property group paired with its status line
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct Propstat {
    pub prop: Prop,
    pub status: String,
}

/// The two properties davget asks for
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct Prop {
    pub displayname: String,
    pub resourcetype: ResourceType,
}

/// `<resourcetype>`; only the `<collection/>` marker is interpreted
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct ResourceType {
    pub collection: Option<CollectionMarker>,
}

/// Empty `<collection/>` element
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct CollectionMarker {}

impl Response {
    /// Properties from the first propstat, if the server sent any
    pub fn first_prop(&self) -> Option<&Prop> {
        self.propstat.first().map(|p| &p.prop)
    }
}

impl Prop {
    /// Whether the resource is a collection
    pub const fn is_collection(&self) -> bool {
        self.resourcetype.collection.is_some()
    }
}

/// Decode a multi-status body
///
/// The body must be valid UTF-8 and its root element must be `multistatus`.
pub fn decode(body: &[u8]) -> Result<Multistatus> {
    let text = std::str::from_utf8(body).map_err(|e| {
        DavError::xml_decode(
            "multi-status body is not valid UTF-8",
            DeError::Custom(e.to_string()),
        )
    })?;

    let root = root_name(text)
        .map_err(|e| DavError::xml_decode("invalid multi-status body", e))?;
    if root != "multistatus" {
        return Err(DavError::xml_decode(
            "invalid multi-status body",
            DeError::Custom(format!("expected <multistatus> root, found <{root}>")),
        ));
    }

    let multistatus: Multistatus = quick_xml::de::from_str(text)
        .map_err(|e| DavError::xml_decode("invalid multi-status body", e))?;
    debug!("Decoded multi-status with {} responses", multistatus.response.len());
    Ok(multistatus)
}

/// Local name of the first element in `text`
fn root_name(text: &str) -> std::result::Result<String, DeError> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader
            .read_event()
            .map_err(|e| DeError::Custom(e.to_string()))?
        {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::Eof => return Err(DeError::Custom("document has no root element".into())),
            _ => {}
        }
    }
}
