// Web layer - axum routes for the three HTTP endpoints.
//
// Handlers stay thin: decode the request, call a core service, map the
// result to a status code and JSON body.

mod cors;
mod knowledge_routes;
mod telegram_routes;
mod webhook_routes;

use crate::core::knowledge::{KnowledgeService, KnowledgeStore};
use crate::core::messaging::{Messenger, WebhookRegistrar};
use crate::core::responder::ResponderService;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub knowledge: Arc<KnowledgeService<Arc<dyn KnowledgeStore>>>,
    pub registrar: Arc<WebhookRegistrar<Arc<dyn Messenger>>>,
    pub responder: Arc<ResponderService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/knowledge", knowledge_routes::routes())
        .route("/setup-webhook", webhook_routes::routes())
        .route("/telegram", telegram_routes::routes())
        .layer(cors::allow_any_origin())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
