//! Storage traits consumed by the route handlers
//!
//! Handlers never hold a connection themselves. They receive these services
//! at construction time and issue one query per call; any failure is
//! reported as an `anyhow::Error` and surfaces to the client as a storage
//! error.

use crate::entities::company::{Company, CompanyChanges, CompanySummary, NewCompany};
use crate::entities::invoice::{Invoice, InvoiceCompanyRow, InvoiceDraft, InvoiceSummary};
use anyhow::Result;
use async_trait::async_trait;

/// Queries against the `companies` table
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// All companies, ordered by name ascending
    async fn list(&self) -> Result<Vec<CompanySummary>>;

    /// Exact match on the primary key
    async fn get(&self, code: &str) -> Result<Option<Company>>;

    /// Insert the row as given; missing required columns are a storage error
    async fn create(&self, company: NewCompany) -> Result<Company>;

    /// Overwrite name and description; `None` when no row matches
    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<Company>>;

    /// Returns `false` when no row matched
    async fn delete(&self, code: &str) -> Result<bool>;
}

/// Queries against the `invoices` table
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// All invoices, ordered by company code ascending
    async fn list(&self) -> Result<Vec<InvoiceSummary>>;

    /// One invoice left-joined to its company
    async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceCompanyRow>>;

    /// Ids of every invoice owned by the given company
    async fn ids_for_company(&self, comp_code: &str) -> Result<Vec<i32>>;

    /// Insert with storage defaults for `paid`, `add_date` and `paid_date`
    async fn create(&self, draft: InvoiceDraft) -> Result<Invoice>;

    /// Change only the amount; `None` when no row matches
    async fn update_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>>;

    /// Returns `false` when no row matched
    async fn delete(&self, id: i32) -> Result<bool>;
}
