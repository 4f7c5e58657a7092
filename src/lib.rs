//! Biztime: REST backend for companies and their invoices.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use models::{Company, CompanyDetail, CompanySummary, Invoice, InvoiceDetail, InvoiceSummary};
pub use routes::{app, common_routes, company_routes, invoice_routes};
pub use service::{CompanyService, InvoiceService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, MemoryStore, PgStore, Store, StoreError};
