//! Core module containing the shared error type, request plumbing and the
//! storage traits

pub mod error;
pub mod extractors;
pub mod service;
pub mod validation;

pub use error::ApiError;
pub use extractors::JsonBody;
pub use service::{CompanyService, InvoiceService};
pub use validation::RequiredFields;
