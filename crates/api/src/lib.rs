//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes over the drill-down, visualization and entry services
//! - Bearer token middleware
//! - Error response mapping

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use budgetlens_core::drilldown::DrillDownService;
use budgetlens_core::entry::ActualEntryService;
use budgetlens_core::hierarchy::CategoryTreeCache;
use budgetlens_core::store::BudgetStore;
use budgetlens_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-side aggregation over the category hierarchy.
    pub drill_down: DrillDownService,
    /// Actual entry recording.
    pub entries: ActualEntryService,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Wires the services over one store and one shared tree cache.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>, trees: CategoryTreeCache, jwt_service: Arc<JwtService>) -> Self {
        Self {
            drill_down: DrillDownService::new(Arc::clone(&store), trees.clone()),
            entries: ActualEntryService::new(store, trees),
            jwt_service,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
