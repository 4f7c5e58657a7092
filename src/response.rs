//! Response envelopes: every body is a single-key object naming the resource.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct CompaniesBody<T> {
    pub companies: Vec<T>,
}

#[derive(Serialize)]
pub struct CompanyBody<T> {
    pub company: T,
}

#[derive(Serialize)]
pub struct InvoicesBody<T> {
    pub invoices: Vec<T>,
}

#[derive(Serialize)]
pub struct InvoiceBody<T> {
    pub invoice: T,
}

/// Confirmation marker for deletes.
#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

pub fn ok<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(body))
}

pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}
