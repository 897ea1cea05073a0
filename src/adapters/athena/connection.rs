//! Request orchestration
//!
//! A [`Connection`] owns the executor, the token manager and the practice
//! context. Facades start a [`Call`] with one of the four verbs, attach a
//! filter or body, and finish with [`Call::send`] or [`Call::send_bytes`].
//!
//! ```no_run
//! use athena_sdk::adapters::athena::Connection;
//! use athena_sdk::config::load_config;
//! use serde_json::Value;
//!
//! # async fn example() -> athena_sdk::domain::Result<()> {
//! let config = load_config("athena.toml")?;
//! let connection = Connection::from_config(&config.api)?;
//! let departments: Value = connection
//!     .fetch("departments")
//!     .param("showalldepartments", true)
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::decoder::DecodeMode;
use super::encoder::{encode_body, encode_query, fields_of, BodyEncoding, FieldValue, RequestShape};
use super::token::TokenManager;
use super::translator::{translate, translate_bytes};
use crate::adapters::http::{HttpExecutor, HttpMethod, InboundResponse, OutboundRequest, ReqwestExecutor};
use crate::config::ApiConfig;
use crate::domain::{ApiVersion, PracticeId, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Shared entry point for every API call
pub struct Connection {
    executor: Arc<dyn HttpExecutor>,
    tokens: TokenManager,
    base_url: String,
    version: ApiVersion,
    practice_id: AtomicU32,
    strict_decoding: bool,
}

impl Connection {
    pub fn new(
        executor: Arc<dyn HttpExecutor>,
        tokens: TokenManager,
        base_url: impl Into<String>,
        version: ApiVersion,
        practice_id: PracticeId,
    ) -> Self {
        Self {
            executor,
            tokens,
            base_url: base_url.into(),
            version,
            practice_id: AtomicU32::new(practice_id.get()),
            strict_decoding: false,
        }
    }

    /// Builds a connection backed by [`ReqwestExecutor`]
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AthenaError::Configuration`] if the HTTP
    /// client or the credentials are invalid.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let executor: Arc<dyn HttpExecutor> = Arc::new(ReqwestExecutor::new(config)?);
        Self::with_executor(config, executor)
    }

    /// Builds a connection around a caller-supplied executor
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::AthenaError::Configuration`] for blank
    /// credentials.
    pub fn with_executor(config: &ApiConfig, executor: Arc<dyn HttpExecutor>) -> Result<Self> {
        let tokens = TokenManager::from_config(Arc::clone(&executor), config)?;
        Ok(Self::new(
            executor,
            tokens,
            config.base_url.clone(),
            config.version,
            config.practice_id,
        )
        .with_strict_decoding(config.strict_decoding))
    }

    pub fn with_strict_decoding(mut self, strict: bool) -> Self {
        self.strict_decoding = strict;
        self
    }

    pub fn practice_id(&self) -> PracticeId {
        // Only ever stored from a PracticeId, so never zero
        PracticeId::new(self.practice_id.load(Ordering::Acquire)).unwrap_or(PracticeId::SANDBOX)
    }

    /// Points subsequent calls at another practice
    pub fn set_practice_id(&self, practice_id: PracticeId) {
        self.practice_id.store(practice_id.get(), Ordering::Release);
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// GET
    pub fn fetch(&self, path: impl Into<String>) -> Call<'_> {
        Call::new(self, HttpMethod::Get, path.into())
    }

    /// POST
    pub fn create(&self, path: impl Into<String>) -> Call<'_> {
        Call::new(self, HttpMethod::Post, path.into())
    }

    /// PUT
    pub fn replace(&self, path: impl Into<String>) -> Call<'_> {
        Call::new(self, HttpMethod::Put, path.into())
    }

    /// DELETE
    pub fn remove(&self, path: impl Into<String>) -> Call<'_> {
        Call::new(self, HttpMethod::Delete, path.into())
    }

    /// `{version}/{practiceid}/{path}`
    pub fn resolve_path(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.version,
            self.practice_id(),
            path.trim_start_matches('/')
        )
    }

    /// Sends a request with a bearer token, refreshing once on 401/403
    async fn dispatch(&self, request: OutboundRequest) -> Result<InboundResponse> {
        let started = Instant::now();
        let token = self.tokens.token().await?;

        let mut attempt = request.clone();
        attempt.authorization = Some(token.authorization());
        let mut outcome = self.executor.execute(attempt).await;

        if let Ok(response) = &outcome {
            if matches!(response.status, 401 | 403) {
                crate::log_auth_retry!(request.path, response.status);
                self.tokens.invalidate(&token).await;
                let fresh = self.tokens.token().await?;

                let mut retry = request.clone();
                retry.authorization = Some(fresh.authorization());
                outcome = self.executor.execute(retry).await;
            }
        }

        if let Ok(response) = &outcome {
            crate::log_api_call!(request.method, request.path, response.status, started.elapsed());
        }
        outcome
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("practice_id", &self.practice_id())
            .field("strict_decoding", &self.strict_decoding)
            .finish_non_exhaustive()
    }
}

/// A single pending API call
#[must_use = "a Call does nothing until `send` or `send_bytes` is awaited"]
pub struct Call<'c> {
    connection: &'c Connection,
    method: HttpMethod,
    path: String,
    query: Vec<(String, FieldValue)>,
    body: Option<(Vec<(String, FieldValue)>, BodyEncoding)>,
    strict: Option<bool>,
}

impl<'c> Call<'c> {
    fn new(connection: &'c Connection, method: HttpMethod, path: String) -> Self {
        Self {
            connection,
            method,
            path,
            query: Vec::new(),
            body: None,
            strict: None,
        }
    }

    /// Adds a filter's fields to the query string
    pub fn query<S: RequestShape>(mut self, shape: &S) -> Self {
        self.query.extend(fields_of(shape));
        self
    }

    /// Adds a filter's fields when one is given
    pub fn query_opt<S: RequestShape>(self, shape: Option<&S>) -> Self {
        match shape {
            Some(shape) => self.query(shape),
            None => self,
        }
    }

    /// Adds a single query parameter
    pub fn param(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Adds a single query parameter when present
    pub fn param_opt<V: Into<FieldValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// JSON body; switches to multipart if the shape carries an attachment
    pub fn body<S: RequestShape>(self, shape: &S) -> Self {
        self.encoded_body(shape, BodyEncoding::Json)
    }

    /// `application/x-www-form-urlencoded` body
    pub fn form<S: RequestShape>(self, shape: &S) -> Self {
        self.encoded_body(shape, BodyEncoding::Form)
    }

    /// `multipart/form-data` body, with or without an attachment
    pub fn multipart<S: RequestShape>(self, shape: &S) -> Self {
        self.encoded_body(shape, BodyEncoding::Multipart)
    }

    fn encoded_body<S: RequestShape>(mut self, shape: &S, encoding: BodyEncoding) -> Self {
        self.body = Some((fields_of(shape), encoding));
        self
    }

    /// Overrides the connection's decoding mode for this call
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    fn build(&mut self) -> Result<OutboundRequest> {
        let connection = self.connection;
        let mut request = OutboundRequest::new(
            self.method,
            connection.base_url.clone(),
            connection.resolve_path(&self.path),
        );
        request.query = encode_query(std::mem::take(&mut self.query))?.into_pairs();
        if let Some((fields, encoding)) = self.body.take() {
            request.body = Some(encode_body(fields, encoding)?);
        }
        Ok(request)
    }

    fn span(&self, request_id: Uuid) -> tracing::Span {
        tracing::debug_span!(
            "athena_call",
            request_id = %request_id,
            method = %self.method,
            path = %self.path,
        )
    }

    /// Sends the call and decodes the response body into `T`
    ///
    /// # Errors
    ///
    /// Any [`crate::domain::AthenaError`]; see the translator rules.
    pub async fn send<T>(mut self) -> Result<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let span = self.span(Uuid::new_v4());
        let mode = DecodeMode::from_strict(self.strict.unwrap_or(self.connection.strict_decoding));
        let connection = self.connection;
        async move {
            let request = self.build()?;
            translate(connection.dispatch(request).await, mode)
        }
        .instrument(span)
        .await
    }

    /// Sends the call and returns the response body bytes unmodified
    ///
    /// # Errors
    ///
    /// Any [`crate::domain::AthenaError`] except `Decode`
    pub async fn send_bytes(mut self) -> Result<Vec<u8>> {
        let span = self.span(Uuid::new_v4());
        let connection = self.connection;
        async move {
            let request = self.build()?;
            translate_bytes(connection.dispatch(request).await)
        }
        .instrument(span)
        .await
    }
}
