// Browser access: the admin UI is served from another origin.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;

/// Adds `Access-Control-Allow-Origin: *` to every response.
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
}

/// Answer to an `OPTIONS` preflight: 200, empty body.
pub fn preflight(allow_methods: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_METHODS, allow_methods),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
        (),
    )
        .into_response()
}

pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
