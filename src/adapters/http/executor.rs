//! Pluggable HTTP executor and its reqwest implementation

use super::request::{Authorization, OutboundRequest, RequestBody};
use super::response::{is_binary_content_type, media_type, InboundResponse, ResponseBody};
use crate::config::ApiConfig;
use crate::domain::{AthenaError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Method};
use std::collections::HashMap;
use std::time::Duration;

/// Performs a single HTTP exchange
///
/// Every HTTP status, including errors, is an `Ok`. Implementations return
/// `Err(AthenaError::Transport)` when no response was obtained, and
/// `Err(AthenaError::Encode)` when the request cannot be put on the wire
/// (an attachment with an unparseable content type, for example). Nothing
/// is sent in the latter case.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: OutboundRequest) -> Result<InboundResponse>;
}

/// [`HttpExecutor`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Builds a client with the configured timeouts and TLS policy
    ///
    /// # Errors
    ///
    /// Returns [`AthenaError::Configuration`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));

        if !config.tls_verify {
            tracing::warn!(
                base_url = %config.base_url,
                "SECURITY WARNING: TLS certificate verification is DISABLED. \
                Only use this against local or test servers."
            );
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            AthenaError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn multipart_form(form: super::request::MultipartForm) -> Result<Form> {
        let mut multipart = Form::new();
        for (key, value) in form.fields {
            multipart = multipart.text(key, value);
        }
        if let Some((key, attachment)) = form.file {
            let content_type = attachment
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let part = Part::bytes(attachment.bytes)
                .file_name(attachment.file_name)
                .mime_str(&content_type)
                .map_err(|e| {
                    AthenaError::Encode(format!("Invalid attachment content type: {e}"))
                })?;
            multipart = multipart.part(key, part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: OutboundRequest) -> Result<InboundResponse> {
        use secrecy::ExposeSecret;

        let method = match request.method {
            super::HttpMethod::Get => Method::GET,
            super::HttpMethod::Post => Method::POST,
            super::HttpMethod::Put => Method::PUT,
            super::HttpMethod::Delete => Method::DELETE,
        };
        let url = request.url();

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.authorization {
            Some(Authorization::Bearer(token)) => builder.bearer_auth(token.expose_secret().as_str()),
            Some(Authorization::Basic { username, password }) => {
                builder.basic_auth(username, Some(password.expose_secret().as_str()))
            }
            None => builder,
        };
        builder = match request.body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Form(pairs)) => builder.form(&pairs),
            Some(RequestBody::Multipart(form)) => builder.multipart(Self::multipart_form(form)?),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            AthenaError::Transport(format!("{} {url} failed: {e}", request.method))
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(media_type);

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(name.as_str().to_ascii_lowercase())
                    .or_insert_with(|| value.to_string());
            }
        }

        let body = if content_type.as_deref().is_some_and(is_binary_content_type) {
            let bytes = response.bytes().await.map_err(|e| {
                AthenaError::Transport(format!("Failed to read response body: {e}"))
            })?;
            if bytes.is_empty() {
                ResponseBody::Empty
            } else {
                ResponseBody::Binary(bytes.to_vec())
            }
        } else {
            let text = response.text().await.map_err(|e| {
                AthenaError::Transport(format!("Failed to read response body: {e}"))
            })?;
            if text.is_empty() {
                ResponseBody::Empty
            } else {
                ResponseBody::Text(text)
            }
        };

        Ok(InboundResponse {
            status,
            body,
            headers,
            content_type,
            received_at: Utc::now(),
        })
    }
}
