// /setup-webhook - one-shot registration of the bot's callback URL.

use super::{cors, AppState};
use crate::core::messaging::{MessagingError, RegistrationError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::Json;
use serde_json::json;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

pub fn routes() -> MethodRouter<AppState> {
    get(register_webhook)
        .post(register_webhook)
        .options(|| async { cors::preflight(ALLOWED_METHODS) })
        .fallback(cors::method_not_allowed)
}

async fn register_webhook(State(state): State<AppState>) -> Response {
    match state.registrar.register().await {
        Ok(registration) => Json(json!({
            "success": true,
            "message": "Webhook успешно установлен",
            "webhook_url": registration.webhook_url,
            "bot_info": registration.provider_description,
        }))
        .into_response(),
        Err(err) => {
            let (status, message) = match err {
                RegistrationError::Messaging(MessagingError::Rejected(description)) => {
                    (StatusCode::BAD_REQUEST, description)
                }
                RegistrationError::Messaging(MessagingError::Transport(cause)) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Ошибка при установке webhook: {cause}"),
                ),
                config @ (RegistrationError::MissingWebhookUrl
                | RegistrationError::Messaging(MessagingError::MissingToken)) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, config.to_string())
                }
            };
            tracing::warn!(status = status.as_u16(), error = %message, "Webhook registration failed");

            (status, Json(json!({ "success": false, "error": message }))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::RecordingMessenger;
    use crate::web::test_support::{request, TestApp, WEBHOOK_URL};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_registration_success_body() {
        let app = TestApp::new();
        let (status, headers, body) = app.send(request("POST", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Webhook успешно установлен",
                "webhook_url": WEBHOOK_URL,
                "bot_info": "Webhook was set"
            })
        );
        assert_eq!(app.messenger.webhooks(), vec![WEBHOOK_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_get_registers_too_and_repeats_are_fine() {
        let app = TestApp::new();
        app.send(request("GET", "/setup-webhook", None)).await;
        let (status, _, _) = app.send(request("GET", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.messenger.webhooks().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_refusal_is_400_with_description() {
        let app = TestApp::new().with_messenger(RecordingMessenger::rejecting("Unauthorized"));
        let (status, _, body) = app.send(request("POST", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_missing_webhook_url_is_500() {
        let app = TestApp::new().without_webhook_url();
        let (status, _, body) = app.send(request("POST", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "TELEGRAM_WEBHOOK_URL не установлен");
        assert!(app.messenger.webhooks().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_is_500() {
        let app = TestApp::new().with_messenger(RecordingMessenger::without_token());
        let (status, _, body) = app.send(request("POST", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "error": "TELEGRAM_BOT_TOKEN не установлен" })
        );
    }

    #[tokio::test]
    async fn test_missing_token_wins_over_missing_url() {
        let app = TestApp::new()
            .with_messenger(RecordingMessenger::without_token())
            .without_webhook_url();
        let (status, _, body) = app.send(request("GET", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "TELEGRAM_BOT_TOKEN не установлен");
    }

    #[tokio::test]
    async fn test_transport_failure_is_500_with_cause() {
        let app = TestApp::new().with_messenger(RecordingMessenger::unreachable("timed out"));
        let (status, _, body) = app.send(request("POST", "/setup-webhook", None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Ошибка при установке webhook: timed out" })
        );
    }

    #[tokio::test]
    async fn test_preflight_and_405() {
        let app = TestApp::new();
        let (status, headers, _) = app.send(request("OPTIONS", "/setup-webhook", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");

        let (status, _, body) = app.send(request("DELETE", "/setup-webhook", None)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}
