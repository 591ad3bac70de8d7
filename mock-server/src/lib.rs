//! Test server for the REST client core.
//!
//! Serves a small notes API plus one route per response-classification path
//! the client implements: JSON success, `meta.error` domain failure on HTTP
//! 200, non-JSON error text, malformed JSON, raw query echo, form-body echo,
//! bearer-auth check, and a large streamed body.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Payload served by `/stream`. Long enough that the client reads it in
/// several chunks.
pub fn stream_payload() -> String {
    "0123456789abcdef".repeat(4096)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Deserialize)]
pub struct CreateNote {
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub pinned: Option<bool>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Note>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/search", get(echo_query))
        .route("/echo-form", post(echo_form))
        .route("/whoami", get(whoami))
        .route("/broken", get(domain_error))
        .route("/malformed", get(malformed_json))
        .route("/stream", get(streamed_text))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_notes(State(db): State<Db>) -> Json<Vec<Note>> {
    let notes = db.read().await;
    Json(notes.values().cloned().collect())
}

async fn create_note(
    State(db): State<Db>,
    Json(input): Json<CreateNote>,
) -> (StatusCode, Json<Note>) {
    let note = Note {
        id: Uuid::new_v4(),
        title: input.title,
        pinned: input.pinned,
    };
    db.write().await.insert(note.id, note.clone());
    (StatusCode::CREATED, Json(note))
}

async fn get_note(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let notes = db.read().await;
    match notes.get(&id) {
        Some(note) => Json(note.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_note(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateNote>,
) -> Response {
    let mut notes = db.write().await;
    let Some(note) = notes.get_mut(&id) else {
        return not_found();
    };
    if let Some(title) = input.title {
        note.title = title;
    }
    if let Some(pinned) = input.pinned {
        note.pinned = pinned;
    }
    Json(note.clone()).into_response()
}

async fn delete_note(State(db): State<Db>, Path(id): Path<Uuid>) -> Response {
    let mut notes = db.write().await;
    match notes.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

/// Plain-text 404, exercising the client's non-JSON error path.
fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "note not found").into_response()
}

/// Echo the raw query string so tests can verify bracket encoding on the wire.
async fn echo_query(RawQuery(query): RawQuery) -> Json<serde_json::Value> {
    Json(json!({ "query": query.unwrap_or_default() }))
}

/// Echo the request content type and body so tests can verify form encoding.
async fn echo_form(headers: HeaderMap, body: String) -> Json<serde_json::Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Json(json!({ "content_type": content_type, "body": body }))
}

/// Reflect the Authorization header, or fail with plain text and a 401.
async fn whoami(headers: HeaderMap) -> Response {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) => Json(json!({ "authorization": value })).into_response(),
        None => (StatusCode::UNAUTHORIZED, "missing authorization").into_response(),
    }
}

/// A domain failure on HTTP 200: the error travels in `meta.error`.
async fn domain_error() -> Json<serde_json::Value> {
    Json(json!({
        "meta": {
            "error": {
                "message": "simulated failure",
                "details": { "code": 17 }
            }
        }
    }))
}

/// Claims JSON but is not.
async fn malformed_json() -> Response {
    ([("content-type", "application/json")], "{not json").into_response()
}

async fn streamed_text() -> String {
    stream_payload()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_to_json() {
        let note = Note {
            id: Uuid::nil(),
            title: "Test".to_string(),
            pinned: false,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["pinned"], false);
    }

    #[test]
    fn create_note_defaults_pinned_to_false() {
        let input: CreateNote = serde_json::from_str(r#"{"title":"No pinned field"}"#).unwrap();
        assert_eq!(input.title, "No pinned field");
        assert!(!input.pinned);
    }

    #[test]
    fn create_note_rejects_missing_title() {
        let result: Result<CreateNote, _> = serde_json::from_str(r#"{"pinned":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_note_all_fields_optional() {
        let input: UpdateNote = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.pinned.is_none());
    }
}
