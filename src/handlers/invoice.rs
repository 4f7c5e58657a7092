//! Invoice handlers. Path ids arrive as strings and are parsed by the service.

use crate::error::AppError;
use crate::response::{created, ok, InvoiceBody, InvoicesBody, StatusBody};
use crate::service::{body_to_map, InvoiceService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let invoices = InvoiceService::list(state.store.as_ref()).await?;
    Ok(ok(InvoicesBody { invoices }))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = InvoiceService::get(state.store.as_ref(), &id).await?;
    Ok(ok(InvoiceBody { invoice }))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let body = body_to_map(body)?;
    let invoice = InvoiceService::create(state.store.as_ref(), &body).await?;
    Ok(created(InvoiceBody { invoice }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let body = body_to_map(body)?;
    let invoice = InvoiceService::update(state.store.as_ref(), &id, &body).await?;
    Ok(ok(InvoiceBody { invoice }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    InvoiceService::delete(state.store.as_ref(), &id).await?;
    Ok(ok(StatusBody { status: "deleted" }))
}
