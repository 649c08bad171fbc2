//! In-process stub of the dojo REST backend.

use axum::extract::{Multipart, Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One file part as received by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

/// One request as received by the stub.
#[derive(Debug, Clone, Default)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub fields: Vec<(String, String)>,
    pub files: Vec<ReceivedFile>,
    pub body: String,
}

impl Received {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[derive(Default)]
struct Inner {
    collections: Vec<(String, Value)>,
    received: Vec<Received>,
    fail_next: Option<(StatusCode, String)>,
    ack_body: Option<String>,
}

#[derive(Clone, Default)]
pub struct StubState {
    inner: Arc<Mutex<Inner>>,
}

impl StubState {
    pub fn set_collection(&self, name: &str, records: Value) {
        let mut inner = self.inner.lock().expect("stub lock");
        inner.collections.retain(|(existing, _)| existing != name);
        inner.collections.push((name.to_string(), records));
    }

    /// Answer the next request with `status` and a raw `body`.
    pub fn fail_next(&self, status: StatusCode, body: &str) {
        self.inner.lock().expect("stub lock").fail_next = Some((status, body.to_string()));
    }

    /// Override the acknowledgment body of mutating calls.
    pub fn ack_with(&self, body: &str) {
        self.inner.lock().expect("stub lock").ack_body = Some(body.to_string());
    }

    pub fn received(&self) -> Vec<Received> {
        self.inner.lock().expect("stub lock").received.clone()
    }

    pub fn last(&self) -> Received {
        self.received().pop().expect("at least one request")
    }

    fn record(&self, received: Received) -> Option<Response> {
        let mut inner = self.inner.lock().expect("stub lock");
        inner.received.push(received);
        inner
            .fail_next
            .take()
            .map(|(status, body)| (status, body).into_response())
    }

    fn ack(&self, default: Value) -> Response {
        match self.inner.lock().expect("stub lock").ack_body.clone() {
            Some(body) => (StatusCode::OK, body).into_response(),
            None => Json(default).into_response(),
        }
    }
}

async fn read_multipart(mut multipart: Multipart, received: &mut Received) {
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.expect("field bytes");
        if file_name.is_some() {
            received.files.push(ReceivedFile {
                field: name,
                file_name,
                content_type,
                len: bytes.len(),
            });
        } else {
            received
                .fields
                .push((name, String::from_utf8_lossy(&bytes).into_owned()));
        }
    }
}

async fn list(State(state): State<StubState>, Path(collection): Path<String>) -> Response {
    let path = format!("/api/{}", collection);
    if let Some(failure) = state.record(Received {
        method: Method::GET.to_string(),
        path,
        ..Received::default()
    }) {
        return failure;
    }
    let inner = state.inner.lock().expect("stub lock");
    let records = inner
        .collections
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, records)| records.clone())
        .unwrap_or_else(|| json!([]));
    Json(records).into_response()
}

async fn create(
    State(state): State<StubState>,
    Path(collection): Path<String>,
    multipart: Multipart,
) -> Response {
    let mut received = Received {
        method: Method::POST.to_string(),
        path: format!("/api/{}", collection),
        ..Received::default()
    };
    read_multipart(multipart, &mut received).await;
    if let Some(failure) = state.record(received) {
        return failure;
    }
    state.ack(json!({ "Succes": "Registro creado" }))
}

async fn update(
    State(state): State<StubState>,
    Path((collection, id)): Path<(String, i64)>,
    multipart: Multipart,
) -> Response {
    let mut received = Received {
        method: Method::PUT.to_string(),
        path: format!("/api/{}/{}", collection, id),
        ..Received::default()
    };
    read_multipart(multipart, &mut received).await;
    if let Some(failure) = state.record(received) {
        return failure;
    }
    state.ack(json!({ "message": "Registro actualizado" }))
}

async fn action(
    State(state): State<StubState>,
    Path((collection, id, action)): Path<(String, i64, String)>,
    body: String,
) -> Response {
    if let Some(failure) = state.record(Received {
        method: Method::PATCH.to_string(),
        path: format!("/api/{}/{}/{}", collection, id, action),
        body,
        ..Received::default()
    }) {
        return failure;
    }
    state.ack(json!({ "message": format!("{} ok", action) }))
}

/// A running stub bound to an ephemeral loopback port.
pub struct StubBackend {
    pub base_url: String,
    pub state: StubState,
    task: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new()
            .route("/api/:collection", get(list).post(create))
            .route("/api/:collection/:id", put(update))
            .route("/api/:collection/:id/:action", patch(action))
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });
        Self {
            base_url: format!("http://{}/api", addr),
            state,
            task,
        }
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}
