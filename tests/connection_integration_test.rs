//! Integration tests for the request pipeline over a counting stub executor

use async_trait::async_trait;
use athena_sdk::adapters::athena::{Connection, Credentials, TokenManager};
use athena_sdk::adapters::http::{HttpExecutor, InboundResponse, OutboundRequest};
use athena_sdk::clients::AthenaClient;
use athena_sdk::config::secret_string;
use athena_sdk::domain::{ApiVersion, AthenaError, PracticeId, Result};
use athena_sdk::models::request::GetAppointmentTypesFilter;
use futures::future::join_all;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = dyn Fn(&OutboundRequest, usize) -> InboundResponse + Send + Sync;

/// Issues numbered tokens after a delay and answers API calls via a closure
struct CountingExecutor {
    token_calls: AtomicUsize,
    api_calls: AtomicUsize,
    token_delay: Duration,
    responder: Box<Responder>,
    seen: Mutex<Vec<OutboundRequest>>,
}

impl CountingExecutor {
    fn new(
        token_delay: Duration,
        responder: impl Fn(&OutboundRequest, usize) -> InboundResponse + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            token_calls: AtomicUsize::new(0),
            api_calls: AtomicUsize::new(0),
            token_delay,
            responder: Box::new(responder),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpExecutor for CountingExecutor {
    async fn execute(&self, request: OutboundRequest) -> Result<InboundResponse> {
        if request.base_url.ends_with("/token") {
            let n = self.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.token_delay).await;
            return Ok(InboundResponse::json(
                200,
                format!(r#"{{"access_token":"token-{n}","expires_in":"3600","token_type":"Bearer"}}"#),
            ));
        }
        let n = self.api_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let response = (self.responder)(&request, n);
        self.seen.lock().unwrap().push(request);
        Ok(response)
    }
}

fn connection(executor: Arc<CountingExecutor>) -> Connection {
    let credentials = Credentials::new("client", secret_string("secret".into())).unwrap();
    let tokens = TokenManager::new(executor.clone(), credentials, "https://auth.test/oauth2/v1/token");
    Connection::new(
        executor,
        tokens,
        "https://api.test",
        ApiVersion::V1,
        PracticeId::SANDBOX,
    )
}

#[tokio::test]
async fn test_concurrent_token_requests_share_one_exchange() {
    let executor = CountingExecutor::new(Duration::from_millis(50), |_, _| {
        InboundResponse::json(200, "{}")
    });
    let connection = connection(executor.clone());

    let tokens = join_all((0..16).map(|_| connection.tokens().token())).await;

    assert_eq!(executor.token_calls(), 1);
    for token in tokens {
        let token = token.unwrap();
        assert_eq!(token.issued_at(), connection.tokens().cached().await.unwrap().issued_at());
    }
}

#[tokio::test]
async fn test_cancelled_exchange_leaves_cache_empty() {
    let executor = CountingExecutor::new(Duration::from_millis(200), |_, _| {
        InboundResponse::json(200, "{}")
    });
    let connection = connection(executor.clone());

    let abandoned = tokio::time::timeout(Duration::from_millis(20), connection.tokens().token()).await;
    assert!(abandoned.is_err());
    assert_eq!(executor.token_calls(), 1);
    assert!(connection.tokens().cached().await.is_none());

    let token = connection.tokens().token().await.unwrap();
    assert_eq!(executor.token_calls(), 2);
    assert_eq!(
        connection.tokens().cached().await.unwrap().issued_at(),
        token.issued_at()
    );
}

#[tokio::test]
async fn test_concurrent_calls_share_one_exchange() {
    let executor = CountingExecutor::new(Duration::from_millis(20), |_, _| {
        InboundResponse::json(200, r#"[{"name":"Maine","stateabbreviation":"ME"}]"#)
    });
    let connection = connection(executor.clone());

    let calls = (0..8).map(|_| connection.fetch("states").send::<Value>());
    let results = join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(executor.token_calls(), 1);
    assert_eq!(executor.api_calls(), 8);
}

#[tokio::test]
async fn test_rejected_token_is_refreshed_once() {
    let executor = CountingExecutor::new(Duration::ZERO, |_, n| {
        if n == 1 {
            InboundResponse::json(401, r#"{"error":"Invalid token"}"#)
        } else {
            InboundResponse::json(200, r#"{"totalcount":0,"appointmenttypes":[]}"#)
        }
    });
    let client = AthenaClient::new(connection(executor.clone()));

    let types = client
        .appointments()
        .appointment_types(Some(&GetAppointmentTypesFilter::default()))
        .await
        .unwrap();

    assert_eq!(types.totalcount, 0);
    assert_eq!(executor.token_calls(), 2);
    assert_eq!(executor.api_calls(), 2);
}

#[tokio::test]
async fn test_second_rejection_is_surfaced() {
    let executor = CountingExecutor::new(Duration::ZERO, |_, _| {
        InboundResponse::json(403, r#"{"error":"Forbidden"}"#)
    });
    let connection = connection(executor.clone());

    let err = connection.fetch("states").send::<Value>().await.unwrap_err();

    assert!(matches!(err, AthenaError::Auth { status: Some(403), .. }));
    assert_eq!(executor.api_calls(), 2);
    assert_eq!(executor.token_calls(), 2);
}

#[tokio::test]
async fn test_validation_error_carries_missing_fields() {
    let executor = CountingExecutor::new(Duration::ZERO, |_, _| {
        InboundResponse::json(
            400,
            r#"{"missingfields":["notetext"],"error":"Additional fields are required."}"#,
        )
    });
    let connection = connection(executor.clone());

    let err = connection
        .create("appointments/1/notes")
        .send::<Value>()
        .await
        .unwrap_err();

    assert_eq!(err.missing_fields(), ["notetext".to_string()]);
    assert_eq!(executor.api_calls(), 1);
}

#[tokio::test]
async fn test_empty_get_by_id_array() {
    let executor = CountingExecutor::new(Duration::ZERO, |_, _| InboundResponse::json(200, "[]"));
    let connection = connection(executor.clone());

    let raw: Vec<Value> = connection.fetch("patients/404").send().await.unwrap();
    assert!(raw.is_empty());

    let client = AthenaClient::new(connection);
    let err = client.patients().patient(404, None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_practice_id_and_version_in_path() {
    let executor = CountingExecutor::new(Duration::ZERO, |_, _| InboundResponse::json(200, "[]"));
    let connection = connection(executor.clone());

    connection.set_practice_id(PracticeId::new(1959).unwrap());
    let _: Vec<Value> = connection.fetch("/providers/3").send().await.unwrap();

    let seen = executor.seen.lock().unwrap();
    assert_eq!(seen[0].url(), "https://api.test/v1/1959/providers/3");
}
