//! The two resources exposed by the API, one module each

pub mod company;
pub mod invoice;

pub use company::{Company, CompanyDescriptor};
pub use invoice::{Invoice, InvoiceDescriptor};
