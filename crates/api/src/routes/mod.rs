//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use budgetlens_shared::AppError;

use crate::{AppState, middleware::auth_middleware};

pub mod actual_entries;
pub mod drilldown;
pub mod health;
pub mod visualization;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(drilldown::routes())
        .merge(visualization::routes())
        .merge(actual_entries::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Renders an application error as `{ "error", "message" }`.
///
/// Store and internal failures are logged and answered with a generic message.
pub fn error_response(e: AppError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if e.is_internal() {
        error!(error = %e, "Request failed");
        "An error occurred".to_string()
    } else {
        e.to_string()
    };

    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": message
        })),
    )
        .into_response()
}

/// Renders a malformed query, path or body as an invalid-argument error.
pub fn rejection_response(rejection: impl std::fmt::Display) -> Response {
    error_response(AppError::InvalidArgument(rejection.to_string()))
}
