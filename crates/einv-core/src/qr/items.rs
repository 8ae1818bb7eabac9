//! Line-item parsing for the detail section of a QR payload.

use crate::models::record::LineItem;

use super::scalars::to_int;

/// Parse a detail blob into line items.
///
/// Entries are separated by `|` or newlines (CRLF included); fields within a
/// line by `:` or the full-width `：`. A line with four or more fields carries
/// its own quantity and unit price; a two-field line is a single unit whose
/// price and subtotal coincide. Lines with fewer than two fields are skipped.
/// Input order is preserved and malformed numerics degrade to their defaults,
/// so this is a total function.
pub fn parse_items(detail: &str) -> Vec<LineItem> {
    let mut items = Vec::new();

    for line in detail.split(['|', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split([':', '：']).map(str::trim).collect();
        if fields.len() >= 4 {
            items.push(LineItem {
                name: fields[0].to_string(),
                quantity: to_int(fields[1], 1),
                unit_price: to_int(fields[2], 0),
                subtotal: to_int(fields[3], 0),
            });
        } else if fields.len() >= 2 {
            let value = to_int(fields[1], 0);
            items.push(LineItem {
                name: fields[0].to_string(),
                quantity: 1,
                unit_price: value,
                subtotal: value,
            });
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_full_item_line() {
        let items = parse_items("商品A:2:500:1000");
        assert_eq!(
            items,
            vec![LineItem {
                name: "商品A".to_string(),
                quantity: 2,
                unit_price: 500,
                subtotal: 1000,
            }]
        );
    }

    #[test]
    fn test_two_field_line_price_equals_subtotal() {
        let items = parse_items("商品B:1500");
        assert_eq!(
            items,
            vec![LineItem {
                name: "商品B".to_string(),
                quantity: 1,
                unit_price: 1500,
                subtotal: 1500,
            }]
        );
    }

    #[test]
    fn test_mixed_separators_preserve_order() {
        let items = parse_items("茶葉蛋:2:10:20|礦泉水:25\r\n御飯糰:1:39:39");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "茶葉蛋");
        assert_eq!(items[1].name, "礦泉水");
        assert_eq!(items[1].subtotal, 25);
        assert_eq!(items[2].name, "御飯糰");
    }

    #[test]
    fn test_fullwidth_colon() {
        let items = parse_items("便當：1：85：85");
        assert_eq!(items[0].name, "便當");
        assert_eq!(items[0].unit_price, 85);
    }

    #[test]
    fn test_malformed_numerics_degrade() {
        let items = parse_items("商品C:abc:xyz:12x");
        assert_eq!(
            items,
            vec![LineItem {
                name: "商品C".to_string(),
                quantity: 1,
                unit_price: 0,
                subtotal: 12,
            }]
        );
    }

    #[test]
    fn test_short_and_blank_lines_skipped() {
        assert_eq!(parse_items(""), vec![]);
        assert_eq!(parse_items("   |  \n"), vec![]);
        assert_eq!(parse_items("no-colon-here"), vec![]);

        let items = parse_items("skip-me|商品D:30");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "商品D");
    }

    #[test]
    fn test_three_field_line_uses_two_field_shape() {
        let items = parse_items("商品E:3:90");
        assert_eq!(
            items,
            vec![LineItem {
                name: "商品E".to_string(),
                quantity: 1,
                unit_price: 3,
                subtotal: 3,
            }]
        );
    }
}
