// /telegram - inbound update webhook.
//
// Telegram retries deliveries that are not acknowledged, so every POST is
// answered 200 `{ok: true}` whatever happened while handling it.

use super::{cors, AppState};
use crate::infra::telegram::Update;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde_json::{json, Value};

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

pub fn routes() -> MethodRouter<AppState> {
    get(status)
        .post(receive_update)
        .options(|| async { cors::preflight(ALLOWED_METHODS) })
        .fallback(cors::method_not_allowed)
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "Bot is running" }))
}

async fn receive_update(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let acknowledged = Json(json!({ "ok": true }));

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring undecodable update");
            return acknowledged;
        }
    };

    let update_id = update.update_id;
    match update.into_inbound() {
        Some(message) => {
            state.responder.handle(message).await;
        }
        None => tracing::debug!(?update_id, "Update carries no text message"),
    }

    acknowledged
}
