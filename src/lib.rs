//! # BizTime
//!
//! A REST API over two related tables: companies and the invoices they own.
//!
//! ## Routes
//!
//! - `GET/POST /companies`, `GET/PUT/DELETE /companies/{code}`
//! - `GET/POST /invoices`, `GET/PUT/DELETE /invoices/{id}`
//!
//! `GET /companies/{code}` embeds the ids of the company's invoices, and
//! `GET /invoices/{id}` nests the owning company's fields under `company`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! let store = Arc::new(PostgresStore::connect("postgres:///biztime", 5).await?);
//! ServerBuilder::new()
//!     .with_services(store.clone(), store)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{ApiError, CompanyService, InvoiceService, JsonBody};

    // === Entities ===
    pub use crate::entities::company::{
        Company, CompanyChanges, CompanyDetail, CompanySummary, CompanyUpdate, NewCompany,
    };
    pub use crate::entities::invoice::{
        Invoice, InvoiceDetail, InvoiceDraft, InvoiceSummary, InvoiceUpdate, NewInvoice,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{AppConfig, Backend};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use std::sync::Arc;
}
