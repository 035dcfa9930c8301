//! Actual entry routes.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use super::{error_response, rejection_response};
use crate::{AppState, middleware::AuthUser};
use budgetlens_core::entry::{EntryListQuery, NewActualEntry};
use budgetlens_shared::AppError;
use budgetlens_shared::types::UserId;

/// Creates the actual entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/budget/actual-entries",
        get(list_entries).post(record_entry),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budget/actual-entries` - Entries of a fiscal year in fiscal month order.
async fn list_entries(
    State(state): State<AppState>,
    query: Result<Query<EntryListQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.entries.list(query).await {
        Ok(entries) => (StatusCode::OK, Json(json!({ "entries": entries }))).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// POST `/budget/actual-entries` - Append one actual entry.
async fn record_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NewActualEntry>, JsonRejection>,
) -> impl IntoResponse {
    if !auth.role().can_record_actuals() {
        return error_response(AppError::Forbidden(
            "operator or admin role required".to_string(),
        ));
    }

    let Json(mut new) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    new.recorded_by = UserId::from_uuid(auth.user_id());

    match state.entries.record(new).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => error_response(e.into()),
    }
}
