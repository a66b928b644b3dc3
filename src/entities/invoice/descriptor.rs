//! Entity descriptor for Invoice

use super::handlers::{
    InvoiceAppState, create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice,
};
use crate::core::InvoiceService;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Invoice entity
pub struct InvoiceDescriptor {
    invoices: Arc<dyn InvoiceService>,
}

impl InvoiceDescriptor {
    pub fn new(invoices: Arc<dyn InvoiceService>) -> Self {
        Self { invoices }
    }

    /// Route prefix, also listed by the health check
    pub const PLURAL: &'static str = "invoices";

    /// CRUD routes with the services injected as state
    pub fn build_routes(&self) -> Router {
        let state = InvoiceAppState {
            invoices: self.invoices.clone(),
        };

        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/{id}",
                get(get_invoice).put(update_invoice).delete(delete_invoice),
            )
            .with_state(state)
    }
}
