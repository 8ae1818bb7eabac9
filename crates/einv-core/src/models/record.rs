//! Normalized invoice record produced by the QR parsers.

use serde::{Deserialize, Serialize};

use crate::qr::patterns::{INVOICE_NUMBER_EXACT, ISO_DATE_EXACT};

/// A normalized Taiwan e-invoice record.
///
/// Constructed fresh per parse call and returned to the caller as plain data;
/// the parser never mutates it after return. Field names match the wire shape
/// consumed by the submission layer (`needSecondQr` keeps its original
/// camelCase spelling).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number: two uppercase letters followed by eight digits.
    /// Empty when the header field could not be populated.
    pub invoice_number: String,

    /// Invoice date as `YYYY-MM-DD`, or the original field verbatim when no
    /// recognizable date format existed.
    pub invoice_date: String,

    /// Verification code printed next to the invoice number. Opaque.
    pub random_code: String,

    /// Seller tax ID. Opaque numeric-looking string.
    pub seller_vat: String,

    /// Buyer tax ID; empty when the header carries no sixth field.
    #[serde(default)]
    pub buyer_vat: String,

    /// Total invoice amount in TWD.
    pub amount: u64,

    /// Line items, in payload order. Empty until a detail segment or a second
    /// code supplies them.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Original payload(s); a dual scan joins the two codes with `||`.
    pub raw: String,

    /// True when the detail section is missing or unusable and a second scan
    /// is needed to complete the record.
    #[serde(rename = "needSecondQr")]
    pub need_second_qr: bool,
}

/// A single line item from the detail section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name.
    pub name: String,

    /// Quantity; defaults to 1 when the payload omits or mangles it.
    pub quantity: u64,

    /// Unit price in TWD.
    pub unit_price: u64,

    /// Line subtotal in TWD.
    pub subtotal: u64,
}

impl InvoiceRecord {
    /// Items serialized as a JSON array string, the extra `items_json` column
    /// the submission layer appends before sending a row downstream.
    pub fn items_json(&self) -> String {
        serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Check the record against what the submission sink accepts and return
    /// any issues found. These are advisory; a record with issues is still a
    /// valid parse result.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.invoice_number.is_empty() {
            issues.push("Missing invoice number".to_string());
        } else if !INVOICE_NUMBER_EXACT.is_match(&self.invoice_number) {
            issues.push(format!(
                "Invoice number '{}' does not match AA00000000",
                self.invoice_number
            ));
        }

        if !self.invoice_date.is_empty() && !ISO_DATE_EXACT.is_match(&self.invoice_date) {
            issues.push(format!(
                "Invoice date '{}' is not in YYYY-MM-DD form",
                self.invoice_date
            ));
        }

        if self.seller_vat.is_empty() {
            issues.push("Missing seller VAT".to_string());
        }

        if self.amount == 0 {
            issues.push("Amount is zero".to_string());
        }

        if !self.need_second_qr && self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        issues
    }
}
