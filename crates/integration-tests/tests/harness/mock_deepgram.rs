//! Mock Deepgram `listen` endpoint that records what it receives

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Whether the query string carries `key=value`
    pub fn has_param(&self, key: &str, value: &str) -> bool {
        let wanted = format!("{key}={value}");
        self.query.split('&').any(|pair| pair == wanted)
    }

    /// Whether the query string mentions `key` at all
    pub fn has_key(&self, key: &str) -> bool {
        self.query
            .split('&')
            .any(|pair| pair.split_once('=').map_or(pair, |(k, _)| k) == key)
    }

    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON request body")
    }
}

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    failure: Option<(StatusCode, String)>,
}

/// Mock provider returning a canned transcript
pub struct MockDeepgram {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockDeepgram {
    /// Start a mock that answers every request successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock that answers every request with `status` and `body`
    pub async fn start_failing(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(Some((status, body.to_owned()))).await
    }

    async fn start_inner(failure: Option<(StatusCode, String)>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            failure,
        });

        let app = Router::new()
            .route("/v1/listen", routing::post(handle_listen))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the provider appends `/listen`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockDeepgram {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Payload shaped like a prerecorded Deepgram response
pub fn canned_transcript() -> Value {
    json!({
        "metadata": {
            "request_id": "00000000-0000-0000-0000-000000000000",
            "duration": 3.5,
            "channels": 1
        },
        "results": {
            "channels": [{
                "alternatives": [{
                    "transcript": "hello from the mock",
                    "confidence": 0.99
                }]
            }]
        }
    })
}

async fn handle_listen(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);

    state.requests.lock().unwrap().push(RecordedRequest {
        query: query.unwrap_or_default(),
        content_type: header_text(header::CONTENT_TYPE),
        authorization: header_text(header::AUTHORIZATION),
        body,
    });

    match &state.failure {
        Some((status, message)) => (*status, message.clone()).into_response(),
        None => Json(canned_transcript()).into_response(),
    }
}
