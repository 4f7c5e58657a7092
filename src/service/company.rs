//! Company operations.

use super::validation::{present_str, Body};
use crate::error::AppError;
use crate::models::{Company, CompanyDetail, CompanySummary};
use crate::store::{Store, StoreError};

pub struct CompanyService;

fn not_found(code: &str) -> AppError {
    AppError::NotFound(format!("No company with code '{}'", code))
}

fn map_write_error(e: StoreError) -> AppError {
    match e {
        StoreError::Duplicate(_) => AppError::Conflict("Company code or name already exists.".into()),
        other => AppError::Store(other),
    }
}

impl CompanyService {
    pub async fn list(store: &dyn Store) -> Result<Vec<CompanySummary>, AppError> {
        Ok(store.list_companies().await?)
    }

    /// The company plus its invoice ids. Two round-trips, not one transaction.
    pub async fn get(store: &dyn Store, code: &str) -> Result<CompanyDetail, AppError> {
        let company = store.get_company(code).await?.ok_or_else(|| not_found(code))?;
        let invoices = store.invoice_ids_for_company(code).await?;
        Ok(CompanyDetail::new(company, invoices))
    }

    pub async fn create(store: &dyn Store, body: &Body) -> Result<Company, AppError> {
        let (code, name, description) = match (
            present_str(body, "code"),
            present_str(body, "name"),
            present_str(body, "description"),
        ) {
            (Some(c), Some(n), Some(d)) => (c, n, d),
            _ => {
                return Err(AppError::BadRequest(
                    "Code, Name, and Description data required.".into(),
                ))
            }
        };
        let company = Company {
            code: code.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
        };
        let created = store.insert_company(&company).await.map_err(map_write_error)?;
        tracing::info!(code = %created.code, "company created");
        Ok(created)
    }

    pub async fn update(store: &dyn Store, code: &str, body: &Body) -> Result<Company, AppError> {
        let (name, description) = match (present_str(body, "name"), present_str(body, "description")) {
            (Some(n), Some(d)) => (n, d),
            _ => return Err(AppError::BadRequest("Name and Description data required.".into())),
        };
        store
            .update_company(code, name, description)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| not_found(code))
    }

    /// Invoices of the company go with it (store-level cascade).
    pub async fn delete(store: &dyn Store, code: &str) -> Result<(), AppError> {
        if !store.delete_company(code).await? {
            return Err(not_found(code));
        }
        tracing::info!(code = %code, "company deleted");
        Ok(())
    }
}
