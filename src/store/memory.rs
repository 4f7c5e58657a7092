//! In-process store with the same constraints as the Postgres schema: unique company code
//! and name, invoice foreign key with cascading delete, serial invoice ids, positive amounts.

use super::{Store, StoreError};
use crate::models::{Company, CompanySummary, Invoice, InvoiceSummary};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    /// Insertion order stands in for the store-default ordering of `companies`.
    companies: Vec<Company>,
    invoices: BTreeMap<i32, Invoice>,
    next_invoice_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

fn check_amt(amt: f64) -> Result<(), StoreError> {
    if amt > 0.0 {
        Ok(())
    } else {
        Err(StoreError::Check("invoices_amt_check".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>, StoreError> {
        let t = self.read()?;
        Ok(t.companies
            .iter()
            .map(|c| CompanySummary {
                code: c.code.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, StoreError> {
        let t = self.read()?;
        Ok(t.companies.iter().find(|c| c.code == code).cloned())
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, StoreError> {
        let t = self.read()?;
        Ok(t.invoices
            .values()
            .filter(|i| i.comp_code == code)
            .map(|i| i.id)
            .collect())
    }

    async fn insert_company(&self, company: &Company) -> Result<Company, StoreError> {
        let mut t = self.write()?;
        if t.companies.iter().any(|c| c.code == company.code) {
            return Err(StoreError::Duplicate(format!("companies_pkey: {}", company.code)));
        }
        if t.companies.iter().any(|c| c.name == company.name) {
            return Err(StoreError::Duplicate(format!("companies_name_key: {}", company.name)));
        }
        t.companies.push(company.clone());
        Ok(company.clone())
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, StoreError> {
        let mut t = self.write()?;
        if t.companies.iter().any(|c| c.name == name && c.code != code) {
            return Err(StoreError::Duplicate(format!("companies_name_key: {}", name)));
        }
        Ok(t.companies.iter_mut().find(|c| c.code == code).map(|c| {
            c.name = name.to_string();
            c.description = Some(description.to_string());
            c.clone()
        }))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, StoreError> {
        let mut t = self.write()?;
        let before = t.companies.len();
        t.companies.retain(|c| c.code != code);
        if t.companies.len() == before {
            return Ok(false);
        }
        t.invoices.retain(|_, i| i.comp_code != code);
        Ok(true)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, StoreError> {
        let t = self.read()?;
        Ok(t.invoices
            .values()
            .map(|i| InvoiceSummary {
                id: i.id,
                comp_code: i.comp_code.clone(),
            })
            .collect())
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, StoreError> {
        let t = self.read()?;
        Ok(t.invoices.get(&id).cloned())
    }

    async fn company_for_invoice(&self, id: i32) -> Result<Option<Company>, StoreError> {
        let t = self.read()?;
        Ok(t.invoices
            .get(&id)
            .and_then(|i| t.companies.iter().find(|c| c.code == i.comp_code))
            .cloned())
    }

    async fn insert_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, StoreError> {
        check_amt(amt)?;
        let mut t = self.write()?;
        if !t.companies.iter().any(|c| c.code == comp_code) {
            return Err(StoreError::ForeignKey(format!("invoices_comp_code_fkey: {}", comp_code)));
        }
        t.next_invoice_id += 1;
        let invoice = Invoice {
            id: t.next_invoice_id,
            comp_code: comp_code.to_string(),
            amt,
            paid: false,
            add_date: chrono::Utc::now().date_naive(),
            paid_date: None,
        };
        t.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update_invoice_amt(&self, id: i32, amt: f64) -> Result<Option<Invoice>, StoreError> {
        check_amt(amt)?;
        let mut t = self.write()?;
        Ok(t.invoices.get_mut(&id).map(|i| {
            i.amt = amt;
            i.clone()
        }))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, StoreError> {
        let mut t = self.write()?;
        Ok(t.invoices.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(code: &str, name: &str) -> Company {
        Company {
            code: code.into(),
            name: name.into(),
            description: Some(format!("{} description", name)),
        }
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let store = MemoryStore::new();
        store.insert_company(&company("apple", "Apple")).await.unwrap();
        let err = store.insert_company(&company("apple", "Apple Two")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.list_companies().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invoice_requires_existing_company() {
        let store = MemoryStore::new();
        let err = store.insert_invoice("nope", 10.0).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn non_positive_amount_violates_check() {
        let store = MemoryStore::new();
        store.insert_company(&company("apple", "Apple")).await.unwrap();
        assert!(matches!(store.insert_invoice("apple", -5.0).await, Err(StoreError::Check(_))));
    }

    #[tokio::test]
    async fn invoice_ids_are_serial_and_survive_deletes() {
        let store = MemoryStore::new();
        store.insert_company(&company("apple", "Apple")).await.unwrap();
        let first = store.insert_invoice("apple", 1.0).await.unwrap();
        assert!(store.delete_invoice(first.id).await.unwrap());
        let second = store.insert_invoice("apple", 2.0).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn deleting_company_cascades_to_invoices() {
        let store = MemoryStore::new();
        store.insert_company(&company("apple", "Apple")).await.unwrap();
        store.insert_company(&company("ibm", "IBM")).await.unwrap();
        store.insert_invoice("apple", 100.0).await.unwrap();
        let kept = store.insert_invoice("ibm", 200.0).await.unwrap();

        assert!(store.delete_company("apple").await.unwrap());
        let remaining = store.list_invoices().await.unwrap();
        assert_eq!(remaining, vec![InvoiceSummary { id: kept.id, comp_code: "ibm".into() }]);
        assert!(!store.delete_company("apple").await.unwrap());
    }

    #[tokio::test]
    async fn joins_invoice_to_company() {
        let store = MemoryStore::new();
        store.insert_company(&company("ibm", "IBM")).await.unwrap();
        let inv = store.insert_invoice("ibm", 200.0).await.unwrap();
        let joined = store.company_for_invoice(inv.id).await.unwrap().unwrap();
        assert_eq!(joined.code, "ibm");
        assert_eq!(store.company_for_invoice(inv.id + 1).await.unwrap(), None);
    }
}
