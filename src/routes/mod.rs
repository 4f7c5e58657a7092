//! Route tables and the assembled application router.

mod common;
mod company;
mod invoice;

pub use common::common_routes;
pub use company::company_routes;
pub use invoice::invoice_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

async fn fallback() -> AppError {
    AppError::NotFound("Not Found".into())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method Not Allowed".into())
}

/// All routes with JSON error bodies for unmatched paths and methods, a request body cap
/// enforced by the JSON extractor, and HTTP tracing.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(company_routes(state.clone()))
        .merge(invoice_routes(state))
        // Applies to the routes registered above, so it must follow the merges.
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
