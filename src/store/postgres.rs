//! PostgreSQL store: parameterized statements against `companies` and `invoices`, plus bootstrap DDL.

use super::{Store, StoreError};
use crate::models::{Company, CompanySummary, Invoice, InvoiceSummary};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<CompanySummary>, StoreError> {
        let sql = "SELECT code, name FROM companies";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, CompanySummary>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, StoreError> {
        let sql = "SELECT code, name, description FROM companies WHERE code = $1";
        tracing::debug!(sql = %sql, code = %code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, StoreError> {
        let sql = "SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id";
        tracing::debug!(sql = %sql, code = %code, "query");
        let ids = sqlx::query_scalar::<_, i32>(sql)
            .bind(code)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn insert_company(&self, company: &Company) -> Result<Company, StoreError> {
        let sql = "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) \
                   RETURNING code, name, description";
        tracing::debug!(sql = %sql, code = %company.code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(&company.code)
            .bind(&company.name)
            .bind(&company.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Company>, StoreError> {
        let sql = "UPDATE companies SET name = $1, description = $2 WHERE code = $3 \
                   RETURNING code, name, description";
        tracing::debug!(sql = %sql, code = %code, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(name)
            .bind(description)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_company(&self, code: &str) -> Result<bool, StoreError> {
        let sql = "DELETE FROM companies WHERE code = $1";
        tracing::debug!(sql = %sql, code = %code, "query");
        let result = sqlx::query(sql).bind(code).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, StoreError> {
        let sql = "SELECT id, comp_code FROM invoices ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, InvoiceSummary>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_invoice(&self, id: i32) -> Result<Option<Invoice>, StoreError> {
        let sql = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn company_for_invoice(&self, id: i32) -> Result<Option<Company>, StoreError> {
        let sql = "SELECT c.code, c.name, c.description \
                   FROM companies AS c \
                   JOIN invoices AS i ON i.comp_code = c.code \
                   WHERE i.id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Company>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, StoreError> {
        let sql = format!(
            "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) RETURNING {}",
            INVOICE_COLUMNS
        );
        tracing::debug!(sql = %sql, comp_code = %comp_code, amt, "query");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(comp_code)
            .bind(amt)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_invoice_amt(&self, id: i32, amt: f64) -> Result<Option<Invoice>, StoreError> {
        let sql = format!(
            "UPDATE invoices SET amt = $1 WHERE id = $2 RETURNING {}",
            INVOICE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, amt, "query");
        let row = sqlx::query_as::<_, Invoice>(&sql)
            .bind(amt)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, StoreError> {
        let sql = "DELETE FROM invoices WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Create `companies` and `invoices` if they do not exist. Existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id SERIAL PRIMARY KEY,
            comp_code TEXT NOT NULL REFERENCES companies ON DELETE CASCADE,
            amt DOUBLE PRECISION NOT NULL CHECK (amt > 0),
            paid BOOLEAN NOT NULL DEFAULT FALSE,
            add_date DATE NOT NULL DEFAULT CURRENT_DATE,
            paid_date DATE
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::Backend(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StoreError::Backend("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/biztime?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "biztime");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(matches!(parse_db_name_from_url("localhost"), Err(StoreError::Backend(_))));
    }

    #[test]
    fn quotes_embedded_double_quotes() {
        assert_eq!(quote_ident("biz\"time"), "\"biz\"\"time\"");
    }
}
