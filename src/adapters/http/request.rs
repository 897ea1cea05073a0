//! Outbound request model

use crate::config::SecretString;
use std::fmt;

/// HTTP method used by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file uploaded as one part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name sent on the wire; the server ignores it but requires one
    pub file_name: String,
    /// MIME type of the part, `application/octet-stream` when unknown
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk, naming the attachment after it
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AthenaError::Io`] if the file cannot be read
    pub fn from_path(path: impl AsRef<std::path::Path>) -> crate::domain::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }
}

/// Multipart form with text fields and at most one file part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    /// Wire key and contents of the file part
    pub file: Option<(String, Attachment)>,
}

/// Request body variants
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Content type hint for the body
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
            RequestBody::Multipart(_) => "multipart/form-data",
        }
    }
}

/// Authorization attached to a request
#[derive(Debug, Clone)]
pub enum Authorization {
    Bearer(SecretString),
    Basic {
        username: String,
        password: SecretString,
    },
}

/// A fully built request, handed to an [`HttpExecutor`](super::HttpExecutor)
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub base_url: String,
    /// Path below `base_url`, without a leading slash; may be empty
    pub path: String,
    /// Ordered query parameters with unique keys
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
    pub authorization: Option<Authorization>,
}

impl OutboundRequest {
    pub fn new(method: HttpMethod, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.into(),
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            authorization: None,
        }
    }

    /// Absolute URL without the query string
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(RequestBody::content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_segments() {
        let request = OutboundRequest::new(
            HttpMethod::Get,
            "https://api.example.com/",
            "/v1/195900/patients/1",
        );
        assert_eq!(request.url(), "https://api.example.com/v1/195900/patients/1");
    }

    #[test]
    fn test_url_without_path() {
        let request = OutboundRequest::new(HttpMethod::Post, "https://auth.example.com/token", "");
        assert_eq!(request.url(), "https://auth.example.com/token");
    }

    #[test]
    fn test_content_type_hint() {
        let mut request = OutboundRequest::new(HttpMethod::Post, "https://h", "p");
        assert_eq!(request.content_type(), None);
        request.body = Some(RequestBody::Form(vec![]));
        assert_eq!(
            request.content_type(),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_attachment_from_path() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let attachment = Attachment::from_path(file.path()).unwrap();
        assert_eq!(attachment.bytes, b"%PDF-1.4");
        assert!(!attachment.file_name.is_empty());
    }
}
