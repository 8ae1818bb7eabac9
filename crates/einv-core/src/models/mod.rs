//! Data models for parsed invoices.

pub mod record;

pub use record::{InvoiceRecord, LineItem};
