//! Drill-down routes.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use super::{error_response, rejection_response};
use crate::AppState;
use budgetlens_core::drilldown::DrillDownQuery;
use budgetlens_core::hierarchy::CategoryType;

/// Creates the drill-down routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget/drill-down", get(drill_down))
        .route("/budget/levels/{level}", get(level_overview))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for the flat level listing.
#[derive(Debug, Deserialize)]
pub struct LevelQuery {
    /// Fiscal year (Buddhist Era).
    pub fiscal_year: i32,
    /// Only revenue or only expense categories.
    pub category_type: Option<CategoryType>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budget/drill-down` - Rows one level below a parent.
async fn drill_down(
    State(state): State<AppState>,
    query: Result<Query<DrillDownQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.drill_down.drill_down(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET `/budget/levels/{level}` - Every category at one level.
async fn level_overview(
    State(state): State<AppState>,
    level: Result<Path<i32>, PathRejection>,
    query: Result<Query<LevelQuery>, QueryRejection>,
) -> impl IntoResponse {
    let (Path(level), Query(query)) = match (level, query) {
        (Ok(level), Ok(query)) => (level, query),
        (Err(rejection), _) => return rejection_response(rejection),
        (_, Err(rejection)) => return rejection_response(rejection),
    };

    match state
        .drill_down
        .level_overview(query.fiscal_year, level, query.category_type)
        .await
    {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => error_response(e.into()),
    }
}
