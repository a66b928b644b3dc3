//! Invoice entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::InvoiceDescriptor;
pub use model::{
    Invoice, InvoiceCompany, InvoiceCompanyRow, InvoiceDetail, InvoiceDraft, InvoiceSummary,
    InvoiceUpdate, NewInvoice,
};
