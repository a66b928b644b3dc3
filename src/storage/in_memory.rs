//! In-memory implementation of the company and invoice services
//!
//! Mirrors what the PostgreSQL schema enforces so that the HTTP layer sees
//! the same behavior in tests and development:
//!
//! - not-null and primary-key checks on companies, and a unique name
//! - `invoices_amt_check` (amounts must be positive)
//! - a foreign key from `invoices.comp_code` with `ON DELETE CASCADE`
//! - storage-assigned invoice ids and `add_date`
//! - a left join that yields an empty company for orphaned invoices

use crate::core::{CompanyService, InvoiceService};
use crate::entities::company::{Company, CompanyChanges, CompanySummary, NewCompany};
use crate::entities::invoice::{Invoice, InvoiceCompanyRow, InvoiceDraft, InvoiceSummary};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
}

impl Tables {
    /// `companies.name` carries a UNIQUE constraint
    fn check_unique_name(&self, name: &str, except_code: Option<&str>) -> Result<()> {
        let taken = self
            .companies
            .values()
            .any(|c| c.name == name && Some(c.code.as_str()) != except_code);
        if taken {
            bail!(
                "duplicate key value violates unique constraint \"companies_name_key\": name={}",
                name
            );
        }
        Ok(())
    }
}

/// In-memory store implementing both services
///
/// Uses RwLock for thread-safe access. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }

    /// Insert an invoice row as-is, without checking its company
    ///
    /// Lets tests reproduce rows that only exist when the foreign key is
    /// missing or was dropped.
    pub fn insert_raw_invoice(&self, invoice: Invoice) -> Result<()> {
        let mut tables = self.write()?;
        tables.last_invoice_id = tables.last_invoice_id.max(invoice.id);
        tables.invoices.insert(invoice.id, invoice);
        Ok(())
    }
}

fn check_amount(amt: f64) -> Result<()> {
    if amt > 0.0 {
        Ok(())
    } else {
        bail!(
            "new row for relation \"invoices\" violates check constraint \"invoices_amt_check\": amt={}",
            amt
        )
    }
}

fn not_null(column: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| {
        anyhow!(
            "null value in column \"{}\" of relation \"companies\" violates not-null constraint",
            column
        )
    })
}

#[async_trait]
impl CompanyService for InMemoryStore {
    async fn list(&self) -> Result<Vec<CompanySummary>> {
        let tables = self.read()?;
        let mut companies: Vec<CompanySummary> =
            tables.companies.values().map(CompanySummary::from).collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn get(&self, code: &str) -> Result<Option<Company>> {
        Ok(self.read()?.companies.get(code).cloned())
    }

    async fn create(&self, company: NewCompany) -> Result<Company> {
        let company = Company {
            code: not_null("code", company.code)?,
            name: not_null("name", company.name)?,
            description: company.description,
        };

        let mut tables = self.write()?;
        if tables.companies.contains_key(&company.code) {
            bail!(
                "duplicate key value violates unique constraint \"companies_pkey\": code={}",
                company.code
            );
        }
        tables.check_unique_name(&company.name, None)?;
        tables
            .companies
            .insert(company.code.clone(), company.clone());
        Ok(company)
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<Company>> {
        let mut tables = self.write()?;
        if tables.companies.contains_key(code) {
            tables.check_unique_name(&changes.name, Some(code))?;
        }
        Ok(tables.companies.get_mut(code).map(|company| {
            company.name = changes.name;
            company.description = Some(changes.description);
            company.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let mut tables = self.write()?;
        if tables.companies.remove(code).is_none() {
            return Ok(false);
        }
        tables.invoices.retain(|_, invoice| invoice.comp_code != code);
        Ok(true)
    }
}

#[async_trait]
impl InvoiceService for InMemoryStore {
    async fn list(&self) -> Result<Vec<InvoiceSummary>> {
        let tables = self.read()?;
        let mut invoices: Vec<InvoiceSummary> =
            tables.invoices.values().map(InvoiceSummary::from).collect();
        invoices.sort_by(|a, b| a.comp_code.cmp(&b.comp_code));
        Ok(invoices)
    }

    async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceCompanyRow>> {
        let tables = self.read()?;
        Ok(tables.invoices.get(&id).map(|invoice| {
            let company = tables.companies.get(&invoice.comp_code);
            InvoiceCompanyRow {
                id: invoice.id,
                amt: invoice.amt,
                paid: invoice.paid,
                add_date: invoice.add_date,
                paid_date: invoice.paid_date,
                company_code: company.map(|c| c.code.clone()),
                company_name: company.map(|c| c.name.clone()),
                company_description: company.and_then(|c| c.description.clone()),
            }
        }))
    }

    async fn ids_for_company(&self, comp_code: &str) -> Result<Vec<i32>> {
        let tables = self.read()?;
        Ok(tables
            .invoices
            .values()
            .filter(|invoice| invoice.comp_code == comp_code)
            .map(|invoice| invoice.id)
            .collect())
    }

    async fn create(&self, draft: InvoiceDraft) -> Result<Invoice> {
        check_amount(draft.amt)?;
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&draft.comp_code) {
            bail!(
                "insert on table \"invoices\" violates foreign key constraint \"invoices_comp_code_fkey\": comp_code={}",
                draft.comp_code
            );
        }

        tables.last_invoice_id += 1;
        let invoice = Invoice {
            id: tables.last_invoice_id,
            comp_code: draft.comp_code,
            amt: draft.amt,
            paid: false,
            add_date: chrono::Local::now().date_naive(),
            paid_date: None,
        };
        tables.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update_amount(&self, id: i32, amt: f64) -> Result<Option<Invoice>> {
        let mut tables = self.write()?;
        if tables.invoices.contains_key(&id) {
            check_amount(amt)?;
        }
        Ok(tables.invoices.get_mut(&id).map(|invoice| {
            invoice.amt = amt;
            invoice.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        Ok(self.write()?.invoices.remove(&id).is_some())
    }
}
