//! Inbound response model and content-type classification

use chrono::{DateTime, Utc};
use std::collections::HashMap;

const BINARY_CONTENT_TYPES: [&str; 3] = [
    "application/zip",
    "application/x-gzip",
    "application/octet-stream",
];

/// Returns true when a body of this media type must be read as raw bytes
pub fn is_binary_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    content_type.starts_with("image/")
        || BINARY_CONTENT_TYPES
            .iter()
            .any(|binary| *binary == content_type)
}

/// Reduces a `Content-Type` header value to its lower-cased media type
pub fn media_type(header_value: &str) -> Option<String> {
    let media = header_value.split(';').next()?.trim();
    if media.is_empty() {
        None
    } else {
        Some(media.to_ascii_lowercase())
    }
}

/// Response body; text and binary are mutually exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Binary(Vec<u8>),
}

/// An HTTP response as returned by an executor
#[derive(Debug, Clone)]
pub struct InboundResponse {
    pub status: u16,
    pub body: ResponseBody,
    /// Header names are lower-cased; repeated headers keep the first value
    pub headers: HashMap<String, String>,
    /// Media type only, lower-cased
    pub content_type: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl InboundResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: ResponseBody) -> Self {
        Self {
            status,
            body,
            headers: HashMap::new(),
            content_type: content_type.and_then(media_type),
            received_at: Utc::now(),
        }
    }

    /// JSON text response
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::new(
            status,
            Some("application/json"),
            ResponseBody::Text(body.into()),
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_binary(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(is_binary_content_type)
    }

    /// Text body, if the body is text
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Body rendered as text for error messages
    pub fn raw_text(&self) -> String {
        match &self.body {
            ResponseBody::Empty => String::new(),
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Binary(bytes) => format!("<{} bytes of binary content>", bytes.len()),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
