//! Company routes: `/companies` and `/companies/:code`.

use crate::handlers::company::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn company_routes(state: AppState) -> Router {
    Router::new()
        .route("/companies", get(list).post(create))
        .route("/companies/:code", get(read).put(update).delete(delete))
        .with_state(state)
}
