//! Mock text-to-image backend for integration tests
//!
//! Mimics the Hugging Face Inference API: JSON prompt in, image bytes out

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Path the mock model is served on
pub const MODEL_PATH: &str = "/models/stabilityai/stable-diffusion-xl-base-1.0";

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with `image/jpeg` bytes
    Image(Vec<u8>),
    /// Given status with a JSON `{"error": ...}` body
    Error(u16, String),
    /// 200 with a JSON body instead of an image
    JsonOk(serde_json::Value),
    /// 200 with an empty body
    Empty,
}

/// A request as the mock received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Mock inference backend bound to a random local port
pub struct MockInference {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    request_count: AtomicU32,
    last_request: Mutex<Option<RecordedRequest>>,
    response: MockResponse,
    /// When set, every request waits for a permit before answering
    gate: Option<Semaphore>,
}

impl MockInference {
    /// Start a mock that returns the given JPEG bytes
    pub async fn start_with_image(bytes: &[u8]) -> anyhow::Result<Self> {
        Self::start_inner(MockResponse::Image(bytes.to_vec()), false).await
    }

    /// Start a mock that fails every request with `status`
    pub async fn start_failing(status: u16, message: &str) -> anyhow::Result<Self> {
        Self::start_inner(MockResponse::Error(status, message.to_owned()), false).await
    }

    /// Start a mock that answers with `response`
    pub async fn start_with(response: MockResponse) -> anyhow::Result<Self> {
        Self::start_inner(response, false).await
    }

    /// Start a mock that holds each request until [`MockInference::release`]
    pub async fn start_gated(bytes: &[u8]) -> anyhow::Result<Self> {
        Self::start_inner(MockResponse::Image(bytes.to_vec()), true).await
    }

    async fn start_inner(response: MockResponse, gated: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            request_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
            response,
            gate: gated.then(|| Semaphore::new(0)),
        });

        let app = Router::new()
            .route(MODEL_PATH, routing::post(handle_inference))
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

    /// Full endpoint URL for configuring the client
    pub fn endpoint(&self) -> String {
        format!("http://{}{MODEL_PATH}", self.addr)
    }

    /// Number of inference requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.last_request.lock().unwrap().clone()
    }

    /// Let one held request answer
    pub fn release(&self) {
        if let Some(ref gate) = self.state.gate {
            gate.add_permits(1);
        }
    }
}

impl Drop for MockInference {
    fn drop(&mut self) {
        if let Some(ref gate) = self.state.gate {
            gate.close();
        }
        self.shutdown.cancel();
    }
}

async fn handle_inference(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    state.request_count.fetch_add(1, Ordering::SeqCst);

    let header_value = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    *state.last_request.lock().unwrap() = Some(RecordedRequest {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    if let Some(ref gate) = state.gate {
        match gate.acquire().await {
            Ok(permit) => permit.forget(),
            Err(_) => return StatusCode::SERVICE_UNAVAILABLE.into_response(),
        }
    }

    match state.response {
        MockResponse::Image(ref bytes) => ([(header::CONTENT_TYPE, "image/jpeg")], bytes.clone()).into_response(),
        MockResponse::Error(status, ref message) => (
            StatusCode::from_u16(status).expect("mock status must be a valid HTTP status code"),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
        MockResponse::JsonOk(ref value) => Json(value.clone()).into_response(),
        MockResponse::Empty => ([(header::CONTENT_TYPE, "image/jpeg")], Vec::<u8>::new()).into_response(),
    }
}
