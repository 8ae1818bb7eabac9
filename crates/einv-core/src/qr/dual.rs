//! Dual-code reconciliation: classify two payloads and merge them.

use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::models::record::InvoiceRecord;

use super::items::parse_items;
use super::patterns::INVOICE_NUMBER;
use super::scalars::safe_decode;

/// Reconcile two QR payloads scanned in unspecified order.
///
/// Each payload is classified as header-like (invoice number plus header
/// structure) or detail-like (item lines, no invoice number). An unambiguous
/// classification fixes the merge order; two codes claiming the same role are
/// rejected so the caller can prompt for a rescan. When neither heuristic is
/// conclusive the codes are merged as scanned, header first, as a best
/// effort.
pub fn parse_dual(code_a: &str, code_b: &str) -> Result<InvoiceRecord> {
    let a_header = looks_like_header(code_a);
    let b_header = looks_like_header(code_b);
    let a_detail = looks_like_detail(code_a);
    let b_detail = looks_like_detail(code_b);

    debug!(a_header, b_header, a_detail, b_detail, "classified QR pair");

    if a_header && b_detail {
        return merge(code_a, code_b);
    }
    if b_header && a_detail {
        return merge(code_b, code_a);
    }

    if a_header && b_header {
        return Err(ParseError::AmbiguousBothHeader);
    }
    if a_detail && b_detail {
        return Err(ParseError::AmbiguousBothDetail);
    }

    merge(code_a, code_b)
}

/// A header code carries an invoice number and `:`- or `**`-delimited fields.
fn looks_like_header(code: &str) -> bool {
    let decoded = safe_decode(code.trim());
    INVOICE_NUMBER.is_match(&decoded) && (decoded.contains(':') || decoded.contains("**"))
}

/// A detail code is item lines: at least one line with two or more colon
/// separators, and no invoice number anywhere (a header would match too,
/// otherwise).
fn looks_like_detail(code: &str) -> bool {
    let decoded = safe_decode(code.trim());
    if INVOICE_NUMBER.is_match(&decoded) {
        return false;
    }

    decoded
        .split(['|', '\n'])
        .filter(|line| !line.trim().is_empty())
        .any(|line| line.chars().filter(|c| matches!(c, ':' | '：')).count() >= 2)
}

fn merge(header: &str, detail: &str) -> Result<InvoiceRecord> {
    let mut record = super::single::parse_single(header)?;

    let items = parse_items(&safe_decode(detail.trim()));
    if items.is_empty() {
        // The header fields are still usable on their own.
        warn!("detail code yielded no line items; record still needs a second scan");
        record.need_second_qr = true;
    } else {
        record.items = items;
        record.need_second_qr = false;
    }

    record.raw = format!("{header}||{detail}");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "AB12345678:1120515:1111:55667788:800";
    const DETAIL: &str = "商品A:2:400:800|飲料:1:60:60";

    #[test]
    fn test_merge_header_then_detail() {
        let record = parse_dual(HEADER, DETAIL).unwrap();

        assert_eq!(record.invoice_number, "AB12345678");
        assert_eq!(record.items.len(), 2);
        assert!(!record.need_second_qr);
        assert_eq!(record.raw, format!("{HEADER}||{DETAIL}"));
    }

    #[test]
    fn test_order_invariance() {
        let forward = parse_dual(HEADER, DETAIL).unwrap();
        let reversed = parse_dual(DETAIL, HEADER).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_both_headers_rejected() {
        let other = "CD87654321:1120601:2222:11223344:120";
        assert_eq!(
            parse_dual(HEADER, other),
            Err(ParseError::AmbiguousBothHeader)
        );
    }

    #[test]
    fn test_both_details_rejected() {
        let other = "便當:1:85:85";
        assert_eq!(
            parse_dual(DETAIL, other),
            Err(ParseError::AmbiguousBothDetail)
        );
    }

    #[test]
    fn test_fallback_merges_as_scanned() {
        // Lowercase prefix, so the left code carries no invoice number; the
        // right code has a single colon. No decision row matches and the pair
        // is merged as scanned, header first.
        let header = "ab12345678:1120515:1111:55667788:800";
        let detail = "單品:100";
        let record = parse_dual(header, detail).unwrap();

        assert_eq!(record.invoice_number, "ab12345678");
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].unit_price, 100);
        assert!(!record.need_second_qr);
    }

    #[test]
    fn test_fallback_propagates_header_error() {
        // "AB12345678" alone has no header structure, "x" is nothing at all;
        // the fallback guesses roles and the header parse reports the truth.
        assert_eq!(
            parse_dual("AB12345678", "x"),
            Err(ParseError::IncompleteHeader { found: 1 })
        );
    }

    #[test]
    fn test_unusable_detail_keeps_need_second_qr() {
        let record = parse_dual(HEADER, "???").unwrap();
        assert!(record.need_second_qr);
        assert_eq!(record.items, vec![]);
        assert_eq!(record.raw, format!("{HEADER}||???"));
    }

    #[test]
    fn test_percent_encoded_detail() {
        // 商品A:2:400:800 with encoded colons
        let encoded = "%E5%95%86%E5%93%81A%3A2%3A400%3A800";
        let record = parse_dual(HEADER, encoded).unwrap();
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].name, "商品A");
        assert_eq!(record.raw, format!("{HEADER}||{encoded}"));
    }
}
