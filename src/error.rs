//! Error types for the WebDAV client
//!
//! Provides structured error handling with context and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for WebDAV operations
#[derive(Error, Debug)]
pub enum DavError {
    /// The HTTP request could not be constructed
    #[error("Request error: {message}")]
    Request {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network or transport failure while talking to the server
    #[error("Transport error: {method} {url} failed")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status the operation does not accept
    #[error("unexpected status code: {status}")]
    UnexpectedStatus { status: u16, url: String },

    /// The multi-status body is not well-formed or does not match the schema
    #[error("XML decode error: {message}")]
    XmlDecode {
        message: String,
        #[source]
        source: quick_xml::DeError,
    },

    /// A URL or href could not be parsed
    #[error("URL parse error: {input}")]
    UrlParse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl DavError {
    /// Create a new request construction error
    pub fn request(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Request {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new transport error
    pub fn transport(
        method: impl Into<String>,
        url: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::Transport {
            method: method.into(),
            url: url.into(),
            source,
        }
    }

    /// Create a new unexpected status error
    pub fn unexpected_status(status: u16, url: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a new XML decode error
    pub fn xml_decode(message: impl Into<String>, source: quick_xml::DeError) -> Self {
        Self::XmlDecode {
            message: message.into(),
            source,
        }
    }

    /// Create a new URL parse error
    pub fn url_parse(input: impl Into<String>, source: url::ParseError) -> Self {
        Self::UrlParse {
            input: input.into(),
            source,
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DavError>;
