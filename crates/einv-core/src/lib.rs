//! Core library for Taiwan e-invoice QR payload processing.
//!
//! This crate provides:
//! - Scalar decoders (lenient integers, percent-decoding, Minguo/Gregorian dates)
//! - Line-item parsing for the detail section
//! - Single-code parsing and dual-code reconciliation
//! - The normalized [`InvoiceRecord`] consumed by submission layers

pub mod error;
pub mod models;
pub mod qr;

pub use error::{ParseError, Result};
pub use models::record::{InvoiceRecord, LineItem};
pub use qr::{parse, parse_dual, parse_single, QrInput};
