//! Invoice records and the company-joined view

use crate::core::error::ApiError;
use crate::core::validation::RequiredFields;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row of the `invoices` table
///
/// `paid` starts out `false` and `paid_date` empty; no route changes either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// List view: only the id and the owning company's code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            comp_code: invoice.comp_code.clone(),
        }
    }
}

/// One flat row of `invoices LEFT JOIN companies`
///
/// Company columns are aliased with a `company_` prefix and are all `NULL`
/// when the invoice references no existing company.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceCompanyRow {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company_code: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

/// Company fields nested in an invoice view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceCompany {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// An invoice with its owning company nested under `company`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: InvoiceCompany,
}

impl From<InvoiceCompanyRow> for InvoiceDetail {
    fn from(row: InvoiceCompanyRow) -> Self {
        Self {
            id: row.id,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: InvoiceCompany {
                code: row.company_code,
                name: row.company_name,
                description: row.company_description,
            },
        }
    }
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInvoice {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
}

/// A `NewInvoice` that passed the presence check
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub comp_code: String,
    pub amt: f64,
}

impl NewInvoice {
    pub fn validate(self) -> Result<InvoiceDraft, ApiError> {
        let mut required = RequiredFields::default();
        let comp_code = required.text("comp_code", self.comp_code);
        let amt = required.amount("amt", self.amt);
        match (comp_code, amt) {
            (Some(comp_code), Some(amt)) => Ok(InvoiceDraft { comp_code, amt }),
            _ => Err(required.into_error()),
        }
    }
}

/// Body of `PUT /invoices/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceUpdate {
    pub amt: Option<f64>,
}

impl InvoiceUpdate {
    /// Returns the new amount
    pub fn validate(self) -> Result<f64, ApiError> {
        let mut required = RequiredFields::default();
        required
            .amount("amt", self.amt)
            .ok_or_else(|| required.into_error())
    }
}
