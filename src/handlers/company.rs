//! Company handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::response::{created, ok, CompaniesBody, CompanyBody, StatusBody};
use crate::service::{body_to_map, CompanyService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// GET /companies
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let companies = CompanyService::list(state.store.as_ref()).await?;
    Ok(ok(CompaniesBody { companies }))
}

/// GET /companies/:code
pub async fn read(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let company = CompanyService::get(state.store.as_ref(), &code).await?;
    Ok(ok(CompanyBody { company }))
}

/// POST /companies
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let body = body_to_map(body)?;
    let company = CompanyService::create(state.store.as_ref(), &body).await?;
    Ok(created(CompanyBody { company }))
}

/// PUT /companies/:code
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let body = body_to_map(body)?;
    let company = CompanyService::update(state.store.as_ref(), &code, &body).await?;
    Ok(ok(CompanyBody { company }))
}

/// DELETE /companies/:code
pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    CompanyService::delete(state.store.as_ref(), &code).await?;
    Ok(ok(StatusBody { status: "Deleted" }))
}
