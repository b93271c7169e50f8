// /knowledge - admin CRUD over the knowledge base.

use super::{cors, AppState};
use crate::core::knowledge::{KnowledgeError, KnowledgeInput};
use axum::body::Bytes;
use axum::extract::{rejection::QueryRejection, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

pub fn routes() -> MethodRouter<AppState> {
    get(list_entries)
        .post(create_entry)
        .put(update_entry)
        .delete(delete_entry)
        .options(|| async { cors::preflight(ALLOWED_METHODS) })
        .fallback(cors::method_not_allowed)
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    id: Option<i64>,
}

fn error_body(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// Every admin failure is a 500 with the error text, and is logged.
fn failure(message: impl ToString) -> Response {
    let message = message.to_string();
    tracing::warn!(error = %message, "Rejected knowledge request");
    error_body(message)
}

impl IntoResponse for KnowledgeError {
    fn into_response(self) -> Response {
        match &self {
            KnowledgeError::Storage(message) => {
                tracing::error!(error = %message, "Knowledge store request failed");
                error_body(self.to_string())
            }
            KnowledgeError::Validation(_) => failure(self),
        }
    }
}

// Decoded by hand so a missing or wrong Content-Type is not a separate error class.
fn parse_input(body: &Bytes) -> Result<KnowledgeInput, Response> {
    serde_json::from_slice(body).map_err(failure)
}

async fn list_entries(State(state): State<AppState>) -> Result<Response, KnowledgeError> {
    let entries = state.knowledge.list().await?;
    Ok(Json(entries).into_response())
}

async fn create_entry(State(state): State<AppState>, body: Bytes) -> Response {
    let input = match parse_input(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.knowledge.create(input).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn update_entry(State(state): State<AppState>, body: Bytes) -> Response {
    let input = match parse_input(&body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    // `null` when the id matched nothing.
    match state.knowledge.update(input).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_entry(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return failure(rejection.body_text()),
    };

    match state.knowledge.delete(params.id).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(err) => err.into_response(),
    }
}
