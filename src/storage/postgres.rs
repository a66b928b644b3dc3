//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, which implements both [`CompanyService`] and
//! [`InvoiceService`] over a shared `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag (on by default).
//!
//! # Schema
//!
//! The server does not create tables. The expected schema lives in
//! `migrations/`:
//!
//! - `companies (code TEXT PRIMARY KEY, name TEXT NOT NULL UNIQUE, description TEXT)`
//! - `invoices (id SERIAL PRIMARY KEY, comp_code TEXT NOT NULL REFERENCES companies
//!   ON DELETE CASCADE, amt FLOAT NOT NULL, paid BOOLEAN DEFAULT false NOT NULL,
//!   add_date DATE DEFAULT CURRENT_DATE NOT NULL, paid_date DATE)`

use crate::core::{CompanyService, InvoiceService};
use crate::entities::company::{Company, CompanyChanges, CompanySummary, NewCompany};
use crate::entities::invoice::{Invoice, InvoiceCompanyRow, InvoiceDraft, InvoiceSummary};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Storage service backed by PostgreSQL
///
/// # Example
///
/// ```rust,ignore
/// let store = PostgresStore::connect("postgres://localhost/biztime", 5).await?;
/// let companies = CompanyService::list(&store).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and wrap it.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CompanyService for PostgresStore {
    async fn list(&self) -> Result<Vec<CompanySummary>> {
        sqlx::query_as::<_, CompanySummary>("SELECT code, name FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list companies")
    }

    async fn get(&self, code: &str) -> Result<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get company")
    }

    async fn create(&self, company: NewCompany) -> Result<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) \
             RETURNING code, name, description",
        )
        .bind(company.code)
        .bind(company.name)
        .bind(company.description)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create company")
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, description = $2 WHERE code = $3 \
             RETURNING code, name, description",
        )
        .bind(changes.name)
        .bind(changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update company")
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let deleted = sqlx::query_scalar::<_, String>(
            "DELETE FROM companies WHERE code = $1 RETURNING code",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to delete company")?;
        Ok(deleted.is_some())
    }
}

#[async_trait]
impl InvoiceService for PostgresStore {
    async fn list(&self) -> Result<Vec<InvoiceSummary>> {
        sqlx::query_as::<_, InvoiceSummary>(
            "SELECT id, comp_code FROM invoices ORDER BY comp_code",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list invoices")
    }

    async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceCompanyRow>> {
        // LEFT JOIN: an invoice whose company is gone still comes back, with
        // NULL company columns.
        sqlx::query_as::<_, InvoiceCompanyRow>(
            "SELECT i.id, i.amt, i.paid, i.add_date, i.paid_date, \
                    c.code AS company_code, \
                    c.name AS company_name, \
                    c.description AS company_description \
             FROM invoices AS i \
             LEFT JOIN companies AS c ON i.comp_code = c.code \
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get invoice")
    }

    async fn ids_for_company(&self, comp_code: &str) -> Result<Vec<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM invoices WHERE comp_code = $1")
            .bind(comp_code)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list invoice ids for company")
    }

    async fn create(&self, draft: InvoiceDraft) -> Result<Invoice> {
        sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) \
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(draft.comp_code)
        .bind(draft.amt)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create invoice")
    }

    async fn update_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET amt = $1 WHERE id = $2 \
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(amt)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update invoice")
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let deleted =
            sqlx::query_scalar::<_, i32>("DELETE FROM invoices WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to delete invoice")?;
        Ok(deleted.is_some())
    }
}
