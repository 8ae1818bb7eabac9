//! QR payload parsing module.

mod dual;
mod items;
pub(crate) mod patterns;
mod scalars;
mod single;

pub use dual::parse_dual;
pub use items::parse_items;
pub use scalars::{parse_date, safe_decode, to_int};
pub use single::parse_single;

use crate::error::Result;
use crate::models::record::InvoiceRecord;

/// Input to [`parse`]: one payload, or a pair scanned in unspecified order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrInput<'a> {
    /// One QR code, usually the header code.
    Single(&'a str),
    /// Both QR codes of a dual-code invoice.
    Dual(&'a str, &'a str),
}

impl<'a> From<&'a str> for QrInput<'a> {
    fn from(code: &'a str) -> Self {
        QrInput::Single(code)
    }
}

impl<'a> From<(&'a str, &'a str)> for QrInput<'a> {
    fn from((a, b): (&'a str, &'a str)) -> Self {
        QrInput::Dual(a, b)
    }
}

/// Parse QR payload(s) into a normalized invoice record.
pub fn parse(input: QrInput<'_>) -> Result<InvoiceRecord> {
    match input {
        QrInput::Single(code) => parse_single(code),
        QrInput::Dual(code_a, code_b) => parse_dual(code_a, code_b),
    }
}
