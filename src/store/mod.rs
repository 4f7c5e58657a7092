//! Data access contract for companies and invoices, with Postgres and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

use crate::models::{Company, CompanySummary, Invoice, InvoiceSummary};
use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by a store. Constraint violations are classified so
/// callers can map them to request-level errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
    #[error("check violation: {0}")]
    Check(String),
    #[error("backend: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;
        if let sqlx::Error::Database(db) = &e {
            let message = db.message().to_string();
            match db.kind() {
                ErrorKind::UniqueViolation => return StoreError::Duplicate(message),
                ErrorKind::ForeignKeyViolation => return StoreError::ForeignKey(message),
                ErrorKind::CheckViolation => return StoreError::Check(message),
                _ => {}
            }
        }
        StoreError::Backend(e.to_string())
    }
}

/// Each method is a single store round-trip. Absence of a target row is
/// reported through `Option`/`bool`, never as an error.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe used by the readiness route.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_companies(&self) -> Result<Vec<CompanySummary>, StoreError>;
    async fn get_company(&self, code: &str) -> Result<Option<Company>, StoreError>;
    /// Ids of invoices whose `comp_code` is `code`, ascending.
    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, StoreError>;
    async fn insert_company(&self, company: &Company) -> Result<Company, StoreError>;
    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, StoreError>;
    /// Removes the company and, by cascade, its invoices. Returns false when no row matched.
    async fn delete_company(&self, code: &str) -> Result<bool, StoreError>;

    /// All invoices ordered by id.
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, StoreError>;
    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, StoreError>;
    /// The company joined to invoice `id`.
    async fn company_for_invoice(&self, id: i32) -> Result<Option<Company>, StoreError>;
    /// Inserts with a store-assigned id, `paid = false`, `add_date = today`, `paid_date = NULL`.
    async fn insert_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, StoreError>;
    async fn update_invoice_amt(&self, id: i32, amt: f64) -> Result<Option<Invoice>, StoreError>;
    async fn delete_invoice(&self, id: i32) -> Result<bool, StoreError>;
}
