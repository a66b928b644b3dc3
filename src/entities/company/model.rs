//! Company records and the views built from them

use crate::core::error::ApiError;
use crate::core::validation::RequiredFields;
use serde::{Deserialize, Serialize};

/// A row of the `companies` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// List view: description is left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

impl From<&Company> for CompanySummary {
    fn from(company: &Company) -> Self {
        Self {
            code: company.code.clone(),
            name: company.name.clone(),
        }
    }
}

/// A company together with the ids of the invoices it owns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<i32>,
}

impl CompanyDetail {
    pub fn new(company: Company, invoices: Vec<i32>) -> Self {
        Self {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
        }
    }
}

/// Body of `POST /companies`
///
/// Fields are not checked here: a missing `code` or `name` is left for the
/// database's not-null constraints to reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCompany {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /companies/{code}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A `CompanyUpdate` whose fields passed the presence check
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyChanges {
    pub name: String,
    pub description: String,
}

impl CompanyUpdate {
    pub fn validate(self) -> Result<CompanyChanges, ApiError> {
        let mut required = RequiredFields::default();
        let name = required.text("name", self.name);
        let description = required.text("description", self.description);
        match (name, description) {
            (Some(name), Some(description)) => Ok(CompanyChanges { name, description }),
            _ => Err(required.into_error()),
        }
    }
}
