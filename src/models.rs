//! Company and invoice records plus the shapes returned by the API.

use chrono::NaiveDate;
use serde::Serialize;

/// One row of `companies`.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// A company together with the ids of its invoices, ordered by id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<i32>,
}

impl CompanyDetail {
    pub fn new(company: Company, invoices: Vec<i32>) -> Self {
        CompanyDetail {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
        }
    }
}

/// One row of `invoices`. `paid` and `paid_date` are store-managed.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// An invoice with its owning company embedded in place of `comp_code`.
///
/// `company` is `None` only when the company row vanished between the two
/// reads that build this value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: Option<Company>,
}

impl InvoiceDetail {
    pub fn new(invoice: Invoice, company: Option<Company>) -> Self {
        InvoiceDetail {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        }
    }
}
