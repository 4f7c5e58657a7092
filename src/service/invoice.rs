//! Invoice operations, including the embedded-company read.

use super::validation::{present_amount, present_str, Body};
use crate::error::AppError;
use crate::models::{Invoice, InvoiceDetail, InvoiceSummary};
use crate::store::{Store, StoreError};

pub struct InvoiceService;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("No invoice with id '{}'", id))
}

fn company_not_found(code: &str) -> AppError {
    AppError::NotFound(format!("No company with code '{}'", code))
}

/// Path ids that are not 32-bit integers cannot name a row.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.trim().parse().map_err(|_| not_found(id_str))
}

fn map_amount_error(e: StoreError) -> AppError {
    match e {
        StoreError::Check(_) => AppError::BadRequest("amt must be greater than zero".into()),
        other => AppError::Store(other),
    }
}

impl InvoiceService {
    pub async fn list(store: &dyn Store) -> Result<Vec<InvoiceSummary>, AppError> {
        Ok(store.list_invoices().await?)
    }

    /// The invoice with its company embedded. If the company disappears between the
    /// two reads, `company` is `None`.
    pub async fn get(store: &dyn Store, id_str: &str) -> Result<InvoiceDetail, AppError> {
        let id = parse_id(id_str)?;
        let invoice = store.get_invoice(id).await?.ok_or_else(|| not_found(id_str))?;
        let company = store.company_for_invoice(id).await?;
        if company.is_none() {
            tracing::warn!(id, comp_code = %invoice.comp_code, "invoice company vanished during read");
        }
        Ok(InvoiceDetail::new(invoice, company))
    }

    /// Checks that the company exists first; a foreign-key failure racing a
    /// company delete is reported the same way.
    pub async fn create(store: &dyn Store, body: &Body) -> Result<Invoice, AppError> {
        let (comp_code, amt) = match (present_str(body, "comp_code"), present_amount(body, "amt")?) {
            (Some(c), Some(a)) => (c, a),
            _ => return Err(AppError::BadRequest("comp_code and amt data required".into())),
        };
        if store.get_company(comp_code).await?.is_none() {
            return Err(company_not_found(comp_code));
        }
        let invoice = store.insert_invoice(comp_code, amt).await.map_err(|e| match e {
            StoreError::ForeignKey(_) => company_not_found(comp_code),
            other => map_amount_error(other),
        })?;
        tracing::info!(id = invoice.id, comp_code = %comp_code, "invoice created");
        Ok(invoice)
    }

    /// Changes `amt` only.
    pub async fn update(store: &dyn Store, id_str: &str, body: &Body) -> Result<Invoice, AppError> {
        let amt = present_amount(body, "amt")?
            .ok_or_else(|| AppError::BadRequest("amt data required".into()))?;
        let id = parse_id(id_str)?;
        store
            .update_invoice_amt(id, amt)
            .await
            .map_err(map_amount_error)?
            .ok_or_else(|| not_found(id_str))
    }

    pub async fn delete(store: &dyn Store, id_str: &str) -> Result<(), AppError> {
        let id = parse_id(id_str)?;
        if !store.delete_invoice(id).await? {
            return Err(not_found(id_str));
        }
        tracing::info!(id, "invoice deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Company;
    use crate::service::body_to_map;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn body(v: serde_json::Value) -> Body {
        body_to_map(v).unwrap()
    }

    async fn store_with_apple() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_company(&Company {
                code: "apple".into(),
                name: "Apple Computer".into(),
                description: Some("Maker of OSX.".into()),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn create_sets_store_defaults() {
        let store = store_with_apple().await;
        let inv = InvoiceService::create(&store, &body(json!({"comp_code": "apple", "amt": 100})))
            .await
            .unwrap();
        assert!(inv.id > 0);
        assert_eq!(inv.amt, 100.0);
        assert!(!inv.paid);
        assert_eq!(inv.paid_date, None);
        assert_eq!(inv.add_date, chrono::Utc::now().date_naive());
    }

    #[tokio::test]
    async fn unknown_company_is_not_found() {
        let store = store_with_apple().await;
        let err = InvoiceService::create(&store, &body(json!({"comp_code": "ghost", "amt": 5})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(InvoiceService::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_amount_is_bad_request() {
        let store = store_with_apple().await;
        let err = InvoiceService::create(&store, &body(json!({"comp_code": "apple", "amt": -3})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn get_embeds_company() {
        let store = store_with_apple().await;
        let inv = store.insert_invoice("apple", 42.0).await.unwrap();
        let detail = InvoiceService::get(&store, &inv.id.to_string()).await.unwrap();
        assert_eq!(detail.amt, 42.0);
        assert_eq!(detail.company.unwrap().code, "apple");
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let store = store_with_apple().await;
        assert!(matches!(InvoiceService::get(&store, "abc").await, Err(AppError::NotFound(_))));
        assert!(matches!(InvoiceService::delete(&store, "1.5").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_requires_amt_before_lookup() {
        let store = store_with_apple().await;
        let err = InvoiceService::update(&store, "999", &body(json!({}))).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "amt data required"));
        let err = InvoiceService::update(&store, "999", &body(json!({"amt": 5}))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
