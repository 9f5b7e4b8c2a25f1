//! In-process axum backend serving the subscription routes

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde_json::Value;

/// Scripted backend state
#[derive(Clone)]
pub struct Backend {
    pub created: Arc<Mutex<Vec<Value>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
    create_status: StatusCode,
    create_body: String,
    delete_status: StatusCode,
}

impl Backend {
    pub fn new() -> Self {
        Self {
            created: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            create_status: StatusCode::OK,
            create_body: r#"{"id": 1}"#.to_string(),
            delete_status: StatusCode::OK,
        }
    }

    pub fn create_answers(mut self, status: StatusCode, body: &str) -> Self {
        self.create_status = status;
        self.create_body = body.to_string();
        self
    }

    pub fn delete_answers(mut self, status: StatusCode) -> Self {
        self.delete_status = status;
        self
    }
}

async fn create_subscription(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    backend.created.lock().unwrap().push(body);
    (backend.create_status, backend.create_body.clone())
}

async fn delete_subscription(
    State(backend): State<Backend>,
    Path(id): Path<String>,
) -> StatusCode {
    backend.deleted.lock().unwrap().push(id);
    backend.delete_status
}

/// Serve the backend on an ephemeral port and return its base URL
pub async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/subscriptions/zotero", post(create_subscription))
        .route("/api/subscriptions/zotero/{id}", delete(delete_subscription))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
