//! OAuth2 client-credentials token acquisition and caching
//!
//! [`TokenManager::token`] hands out a cached bearer token while it is fresh
//! and performs a single exchange when it is not, no matter how many callers
//! are waiting. A token rejected by the API is dropped with
//! [`TokenManager::invalidate`] so the next caller exchanges again.

use crate::adapters::http::{Authorization, HttpExecutor, HttpMethod, OutboundRequest, RequestBody};
use crate::config::{secret_string, ApiConfig, SecretString};
use crate::domain::{AthenaError, Result};
use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Upper bound on how early a cached token is treated as expired
const MAX_REFRESH_MARGIN_SECS: i64 = 600;

/// Client identifier and secret used for the exchange
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns [`AthenaError::Configuration`] if either value is blank
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Result<Self> {
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(AthenaError::Configuration(
                "client_id cannot be empty".to_string(),
            ));
        }
        if client_secret.expose_secret().is_empty() {
            return Err(AthenaError::Configuration(
                "client_secret cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// A bearer token and its lifetime
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: SecretString,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: secret_string(value.into()),
            issued_at,
            expires_at,
        }
    }

    pub fn secret(&self) -> &SecretString {
        &self.value
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True while `now` is earlier than `expires_at - margin`
    pub fn is_fresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at
            .checked_sub_signed(margin)
            .is_some_and(|deadline| now < deadline)
    }

    fn same_token(&self, other: &AccessToken) -> bool {
        self.issued_at == other.issued_at
            && self.value.expose_secret().as_str() == other.value.expose_secret().as_str()
    }

    pub(crate) fn authorization(&self) -> Authorization {
        Authorization::Bearer(self.value.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(i64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(&self) -> Option<i64> {
        match self {
            ExpiresIn::Seconds(secs) => Some(*secs),
            ExpiresIn::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: ExpiresIn,
}

/// Caches the bearer token and serializes refreshes
pub struct TokenManager {
    executor: Arc<dyn HttpExecutor>,
    credentials: Credentials,
    token_url: String,
    scope: Option<String>,
    refresh_margin: Duration,
    cached: RwLock<Option<AccessToken>>,
    refresh_gate: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        executor: Arc<dyn HttpExecutor>,
        credentials: Credentials,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            credentials,
            token_url: token_url.into(),
            scope: None,
            refresh_margin: Duration::seconds(60),
            cached: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Builds a manager from the `[api]` configuration section
    ///
    /// The refresh margin is clamped to ten minutes.
    ///
    /// # Errors
    ///
    /// Returns [`AthenaError::Configuration`] for blank credentials
    pub fn from_config(executor: Arc<dyn HttpExecutor>, config: &ApiConfig) -> Result<Self> {
        let credentials = Credentials::new(config.client_id.clone(), config.client_secret.clone())?;
        Ok(Self::new(executor, credentials, config.token_endpoint())
            .with_scope(config.scope.clone())
            .with_refresh_margin(Duration::seconds(
                i64::try_from(config.token_refresh_margin_seconds)
                    .unwrap_or(MAX_REFRESH_MARGIN_SECS)
                    .min(MAX_REFRESH_MARGIN_SECS),
            )))
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Returns a fresh token, exchanging credentials when needed
    ///
    /// # Errors
    ///
    /// Returns [`AthenaError::Auth`] when the exchange fails. Nothing is
    /// cached in that case.
    pub async fn token(&self) -> Result<AccessToken> {
        if let Some(token) = self.fresh_cached().await {
            return Ok(token);
        }

        // Dropping this guard on cancellation lets the next waiter exchange
        let _gate = self.refresh_gate.lock().await;

        if let Some(token) = self.fresh_cached().await {
            tracing::trace!("Token refreshed by a concurrent caller");
            return Ok(token);
        }

        let token = self.exchange().await?;
        *self.cached.write().await = Some(token.clone());
        Ok(token)
    }

    /// Drops the cached token if it is the one that was rejected
    pub async fn invalidate(&self, rejected: &AccessToken) {
        let mut cached = self.cached.write().await;
        if cached
            .as_ref()
            .is_some_and(|current| current.same_token(rejected))
        {
            tracing::debug!(issued_at = %rejected.issued_at, "Invalidating rejected token");
            *cached = None;
        }
    }

    /// Currently cached token, fresh or not
    pub async fn cached(&self) -> Option<AccessToken> {
        self.cached.read().await.clone()
    }

    async fn fresh_cached(&self) -> Option<AccessToken> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|token| token.is_fresh(Utc::now(), self.refresh_margin))
            .cloned()
    }

    async fn exchange(&self) -> Result<AccessToken> {
        tracing::debug!(
            token_url = %self.token_url,
            client_id = %self.credentials.client_id,
            "Requesting access token with client credentials"
        );

        let mut form = vec![(
            "grant_type".to_string(),
            "client_credentials".to_string(),
        )];
        if let Some(scope) = &self.scope {
            form.push(("scope".to_string(), scope.clone()));
        }

        let mut request = OutboundRequest::new(HttpMethod::Post, self.token_url.clone(), "");
        request.body = Some(RequestBody::Form(form));
        request.authorization = Some(Authorization::Basic {
            username: self.credentials.client_id.clone(),
            password: self.credentials.client_secret.clone(),
        });

        let issued_at = Utc::now();
        let response = self.executor.execute(request).await.map_err(|e| AthenaError::Auth {
            status: None,
            message: format!("Token request failed: {e}"),
        })?;

        if !response.is_success() {
            return Err(AthenaError::Auth {
                status: Some(response.status),
                message: format!(
                    "Token request failed with status {}: {}",
                    response.status,
                    response.raw_text()
                ),
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(response.text().unwrap_or_default()).map_err(|e| {
                AthenaError::Auth {
                    status: Some(response.status),
                    message: format!("Failed to parse token response: {e}"),
                }
            })?;

        let expires_in = parsed.expires_in.seconds().ok_or_else(|| AthenaError::Auth {
            status: Some(response.status),
            message: "Token response has a non-numeric expires_in".to_string(),
        })?;

        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| AthenaError::Auth {
                status: Some(response.status),
                message: format!("Token response has an out-of-range expires_in: {expires_in}"),
            })?;
        tracing::info!(expires_at = %expires_at, "Access token acquired");

        Ok(AccessToken::new(parsed.access_token, issued_at, expires_at))
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("client_id", &self.credentials.client_id)
            .field("token_url", &self.token_url)
            .field("refresh_margin", &self.refresh_margin)
            .finish_non_exhaustive()
    }
}
