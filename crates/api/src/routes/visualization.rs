//! Treemap, heatmap and trend routes.

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
use budgetlens_core::visualization::{HeatmapBuilder, TreemapBuilder, TrendBuilder};
use budgetlens_shared::types::CategoryId;

/// Level used by the heatmap when the caller does not pick one.
const DEFAULT_HEATMAP_LEVEL: i32 = 3;

/// Creates the visualization routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget/treemap", get(treemap))
        .route("/budget/heatmap", get(heatmap))
        .route("/budget/categories/{id}/trend", get(trend))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for the treemap.
#[derive(Debug, Deserialize)]
pub struct TreemapQuery {
    /// Fiscal year (Buddhist Era).
    pub fiscal_year: i32,
    /// Build only below this category.
    pub root_id: Option<CategoryId>,
}

/// Query parameters for the heatmap.
#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    /// Fiscal year (Buddhist Era).
    pub fiscal_year: i32,
    /// Category level to rank, 1-5.
    pub level: Option<i32>,
}

/// Query parameters for a trend.
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    /// Last fiscal year of the series.
    pub fiscal_year: i32,
    /// Number of years, 1-5.
    pub years: Option<u32>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budget/treemap` - Plan/actual tree with bottom-up sums.
async fn treemap(
    State(state): State<AppState>,
    query: Result<Query<TreemapQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };

    match TreemapBuilder::new(&state.drill_down)
        .build(query.fiscal_year, query.root_id)
        .await
    {
        Ok(nodes) => (StatusCode::OK, Json(nodes)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET `/budget/heatmap` - Top-spend categories by fiscal month.
async fn heatmap(
    State(state): State<AppState>,
    query: Result<Query<HeatmapQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection),
    };

    match HeatmapBuilder::new(&state.drill_down)
        .build(
            query.fiscal_year,
            query.level.unwrap_or(DEFAULT_HEATMAP_LEVEL),
        )
        .await
    {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET `/budget/categories/{id}/trend` - Quarterly actuals over several years.
async fn trend(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> impl IntoResponse {
    let (Path(id), Query(query)) = match (id, query) {
        (Ok(id), Ok(query)) => (id, query),
        (Err(rejection), _) => return rejection_response(rejection),
        (_, Err(rejection)) => return rejection_response(rejection),
    };

    match TrendBuilder::new(&state.drill_down)
        .quarterly(query.fiscal_year, id, query.years)
        .await
    {
        Ok(series) => (StatusCode::OK, Json(series)).into_response(),
        Err(e) => error_response(e.into()),
    }
}
