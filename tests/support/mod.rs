//! Stateful in-process backend that applies mutations the way the real API does.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Store {
    clients: Vec<Value>,
    instructors: Vec<Value>,
    next_id: i64,
    fail_next: Option<(StatusCode, Value)>,
    requests: usize,
}

impl Store {
    fn collection_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        match name {
            "clients" => Some(&mut self.clients),
            "instructors" => Some(&mut self.instructors),
            _ => None,
        }
    }

    fn take_failure(&mut self) -> Option<Response> {
        self.requests += 1;
        self.fail_next
            .take()
            .map(|(status, body)| (status, Json(body)).into_response())
    }
}

#[derive(Clone, Default)]
pub struct Backend {
    store: Arc<Mutex<Store>>,
}

impl Backend {
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        let mut store = self.store.lock().expect("store lock");
        let max_id = records
            .iter()
            .filter_map(|record| record["id"].as_i64())
            .max()
            .unwrap_or(0);
        store.next_id = store.next_id.max(max_id);
        *store.collection_mut(collection).expect("known collection") = records;
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        let mut store = self.store.lock().expect("store lock");
        store
            .collection_mut(collection)
            .expect("known collection")
            .clone()
    }

    pub fn record(&self, collection: &str, id: i64) -> Value {
        self.records(collection)
            .into_iter()
            .find(|record| record["id"] == id)
            .expect("record exists")
    }

    /// Change a stored record behind the console's back.
    pub fn edit(&self, collection: &str, id: i64, key: &str, value: Value) {
        let mut store = self.store.lock().expect("store lock");
        let records = store.collection_mut(collection).expect("known collection");
        if let Some(record) = records.iter_mut().find(|record| record["id"] == id) {
            record[key] = value;
        }
    }

    pub fn fail_next(&self, status: StatusCode, body: Value) {
        self.store.lock().expect("store lock").fail_next = Some((status, body));
    }

    pub fn request_count(&self) -> usize {
        self.store.lock().expect("store lock").requests
    }
}

/// Text parts keyed by name; the photo part is stored as its file name.
async fn read_fields(mut multipart: Multipart) -> Map<String, Value> {
    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.expect("field bytes");
        let value = match file_name {
            Some(file_name) => file_name,
            None => String::from_utf8_lossy(&bytes).into_owned(),
        };
        fields.insert(name, Value::String(value));
    }
    fields
}

fn typed(collection: &str, mut fields: Map<String, Value>) -> Map<String, Value> {
    if collection == "instructors" {
        let years = fields
            .get("experience_years")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(0);
        fields.insert("experience_years".to_string(), json!(years));
    }
    fields
}

async fn list(State(backend): State<Backend>, Path(collection): Path<String>) -> Response {
    let mut store = backend.store.lock().expect("store lock");
    if let Some(failure) = store.take_failure() {
        return failure;
    }
    match store.collection_mut(&collection) {
        Some(records) => Json(records.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(backend): State<Backend>,
    Path(collection): Path<String>,
    multipart: Multipart,
) -> Response {
    let fields = typed(&collection, read_fields(multipart).await);
    let mut store = backend.store.lock().expect("store lock");
    if let Some(failure) = store.take_failure() {
        return failure;
    }
    store.next_id += 1;
    let id = store.next_id;
    let mut record = fields;
    record.insert("id".to_string(), json!(id));
    if collection == "instructors" {
        record
            .entry("status")
            .or_insert_with(|| json!("active"));
        record.insert("is_published".to_string(), json!(false));
    }
    match store.collection_mut(&collection) {
        Some(records) => {
            records.push(Value::Object(record));
            Json(json!({ "Succes": "Registro creado" })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update(
    State(backend): State<Backend>,
    Path((collection, id)): Path<(String, i64)>,
    multipart: Multipart,
) -> Response {
    let fields = typed(&collection, read_fields(multipart).await);
    let mut store = backend.store.lock().expect("store lock");
    if let Some(failure) = store.take_failure() {
        return failure;
    }
    let Some(records) = store.collection_mut(&collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(Value::Object(record)) = records.iter_mut().find(|record| record["id"] == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "No existe" }))).into_response();
    };
    record.extend(fields);
    Json(json!({ "message": "Instructor actualizado" })).into_response()
}

async fn action(
    State(backend): State<Backend>,
    Path((collection, id, action)): Path<(String, i64, String)>,
) -> Response {
    let mut store = backend.store.lock().expect("store lock");
    if let Some(failure) = store.take_failure() {
        return failure;
    }
    let Some(records) = store.collection_mut(&collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(record) = records.iter_mut().find(|record| record["id"] == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "No existe" }))).into_response();
    };
    match action.as_str() {
        "publish" => record["is_published"] = json!(true),
        "unpublish" => record["is_published"] = json!(false),
        "inactivar" => record["status"] = json!("inactive"),
        _ => return StatusCode::NOT_FOUND.into_response(),
    }
    Json(json!({ "message": format!("{} ok", action) })).into_response()
}

/// A running backend bound to an ephemeral loopback port.
pub struct TestServer {
    pub base_url: String,
    pub backend: Backend,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Backend::default();
        let app = Router::new()
            .route("/api/:collection", get(list).post(create))
            .route("/api/:collection/:id", put(update))
            .route("/api/:collection/:id/:action", patch(action))
            .with_state(backend.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        Self {
            base_url: format!("http://{}/api", addr),
            backend,
            task,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn instructor_json(id: i64, name: &str, specialty: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "last_name": "Sato",
        "specialty": specialty,
        "belt_level": "Negra",
        "email": format!("{}@dojo.pe", name.to_lowercase()),
        "phone": "912345678",
        "experience_years": 8,
        "status": "active",
        "photo": format!("{}.png", name.to_lowercase()),
        "is_published": false
    })
}

pub fn client_json(id: i64, name: &str, document: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "last_name": "Quispe",
        "document_type": "DNI",
        "document": document,
        "address": "Av. Sol 123",
        "cellphome": "987654321",
        "email": format!("{}@dojo.pe", name.to_lowercase()),
        "gender": "Femenino",
        "birthday": "1990-04-12",
        "photo": format!("{}.png", name.to_lowercase())
    })
}
