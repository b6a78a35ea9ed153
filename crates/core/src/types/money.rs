//! Decimal money helpers.
//!
//! Prices are stored as `NUMERIC(10, 2)` and carried as [`Decimal`] end to
//! end so cart totals, order totals and line subtotals add up exactly.

use rust_decimal::Decimal;

/// Subtotal of one line: unit price times quantity.
#[must_use]
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Format an amount for display, e.g. `$1299.90`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_subtotal() {
        assert_eq!(line_subtotal(Decimal::new(1050, 2), 3), Decimal::new(3150, 2));
        assert_eq!(line_subtotal(Decimal::new(999, 2), 1), Decimal::new(999, 2));
    }

    #[test]
    fn test_format_money_pads_cents() {
        assert_eq!(format_money(Decimal::from(25)), "$25.00");
        assert_eq!(format_money(Decimal::new(55, 1)), "$5.50");
        assert_eq!(format_money(Decimal::new(129_990, 2)), "$1299.90");
    }
}
