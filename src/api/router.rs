//! Router construction for the portal.

use axum::http::{header, HeaderValue};
use axum::{middleware as axum_mw, routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::require_admission;
use super::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Pages behind the access gate
    let gated = Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .route("/profile", get(handlers::profile))
        .route("/payroll", get(handlers::payroll))
        .route("/payroll/details", get(handlers::payroll_details))
        .route("/contracts", get(handlers::contracts))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            require_admission,
        ));

    // Public pages
    let public = Router::new()
        .route("/", get(handlers::index))
        .route("/signin", get(handlers::signin))
        .route("/denied", get(handlers::denied));

    public
        .merge(gated)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
}
