//! Entity descriptor for Company

use super::handlers::{
    CompanyAppState, create_company, delete_company, get_company, list_companies, update_company,
};
use crate::core::{CompanyService, InvoiceService};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Company entity
pub struct CompanyDescriptor {
    companies: Arc<dyn CompanyService>,
    invoices: Arc<dyn InvoiceService>,
}

impl CompanyDescriptor {
    pub fn new(companies: Arc<dyn CompanyService>, invoices: Arc<dyn InvoiceService>) -> Self {
        Self {
            companies,
            invoices,
        }
    }

    /// Route prefix, also listed by the health check
    pub const PLURAL: &'static str = "companies";

    /// CRUD routes with the services injected as state
    pub fn build_routes(&self) -> Router {
        let state = CompanyAppState {
            companies: self.companies.clone(),
            invoices: self.invoices.clone(),
        };

        Router::new()
            .route("/companies", get(list_companies).post(create_company))
            .route(
                "/companies/{code}",
                get(get_company).put(update_company).delete(delete_company),
            )
            .with_state(state)
    }
}
