//! Single-code parsing: one QR payload into an invoice record.

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::models::record::InvoiceRecord;

use super::items::parse_items;
use super::patterns::INVOICE_NUMBER;
use super::scalars::{parse_date, safe_decode, to_int};

/// Parse one QR payload, usually a header code. A header code whose tail
/// carries line items after the `**` separator is parsed in full.
///
/// The payload is trimmed and percent-decoded first. Acceptance requires an
/// invoice number, a `**` separator, or at least three `:`-separated parts;
/// anything else is rejected as [`ParseError::InvalidFormat`]. The header
/// segment must supply the five minimal fields (invoice number, date, random
/// code, seller VAT, amount).
pub fn parse_single(code: &str) -> Result<InvoiceRecord> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidInput);
    }

    let decoded = safe_decode(trimmed);
    if !is_valid_payload(&decoded) {
        return Err(ParseError::InvalidFormat);
    }

    let (header, detail) = match decoded.split_once("**") {
        Some((header, detail)) => (header, Some(detail)),
        None => (decoded.as_ref(), None),
    };

    let fields: Vec<&str> = header.split(':').collect();
    if fields.len() < 5 {
        return Err(ParseError::IncompleteHeader {
            found: fields.len(),
        });
    }

    let mut record = InvoiceRecord {
        invoice_number: fields[0].to_string(),
        invoice_date: parse_date(fields[1]),
        random_code: fields[2].to_string(),
        seller_vat: fields[3].to_string(),
        amount: to_int(fields[4], 0),
        buyer_vat: fields.get(5).map(|f| f.to_string()).unwrap_or_default(),
        ..Default::default()
    };

    match detail {
        Some(detail) if !detail.is_empty() => {
            record.items = parse_items(detail);
            // An empty item list still means the detail is elsewhere.
            record.need_second_qr = record.items.is_empty();
        }
        _ => record.need_second_qr = true,
    }

    record.raw = decoded.into_owned();

    debug!(
        invoice_number = %record.invoice_number,
        items = record.items.len(),
        need_second_qr = record.need_second_qr,
        "parsed single QR payload"
    );

    Ok(record)
}

/// Structural validity heuristic: an invoice number, a segment separator, or
/// enough colon-separated parts to be a header.
fn is_valid_payload(payload: &str) -> bool {
    INVOICE_NUMBER.is_match(payload)
        || payload.contains("**")
        || (payload.contains(':') && payload.split(':').count() >= 3)
}
