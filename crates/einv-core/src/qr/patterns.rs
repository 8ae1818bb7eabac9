//! Compiled regex patterns shared by the QR parsers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number: two uppercase letters + 8 digits, anywhere in a payload
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"[A-Z]{2}\d{8}"
    ).unwrap();

    // Exact invoice number form, as required by the submission sink
    pub static ref INVOICE_NUMBER_EXACT: Regex = Regex::new(
        r"^[A-Z]{2}\d{8}$"
    ).unwrap();

    // Date shapes after separator stripping
    pub static ref ROC_DATE: Regex = Regex::new(
        r"^\d{7}$"
    ).unwrap();

    pub static ref GREGORIAN_DATE: Regex = Regex::new(
        r"^\d{8}$"
    ).unwrap();

    // Normalized date form emitted by the date decoder
    pub static ref ISO_DATE_EXACT: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();
}
