use rust_decimal::{Decimal, RoundingStrategy};

/// Derived money fields of an order. Always recomputed from the current
/// order lines, never hand-edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Computes subtotal, tax and total from `(quantity, unit_price)` lines.
///
/// Tax is rounded to cents half-away-from-zero; subtotal needs no rounding
/// because unit prices carry at most two decimal places.
pub fn compute_totals(lines: &[(i32, Decimal)], tax_rate: Decimal) -> OrderTotals {
    let subtotal: Decimal = lines
        .iter()
        .map(|(quantity, unit_price)| Decimal::from(*quantity) * unit_price)
        .sum();
    let tax_amount =
        (subtotal * tax_rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let total = subtotal + tax_amount;

    OrderTotals {
        subtotal,
        tax_amount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compute_totals() {
        // 2 x $10.00 + 1 x $5.50 at 8% tax
        let totals = compute_totals(&[(2, dec!(10.00)), (1, dec!(5.50))], dec!(0.08));
        assert_eq!(totals.subtotal, dec!(25.50));
        assert_eq!(totals.tax_amount, dec!(2.04));
        assert_eq!(totals.total, dec!(27.54));
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let totals = compute_totals(&[], dec!(0.08));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        // 1.5625 * 0.08 = 0.125 -> 0.13
        let totals = compute_totals(&[(1, dec!(1.5625))], dec!(0.08));
        assert_eq!(totals.tax_amount, dec!(0.13));
        assert_eq!(totals.total, dec!(1.6925));
    }

    #[test]
    fn test_zero_tax_rate() {
        let totals = compute_totals(&[(3, dec!(4.25))], Decimal::ZERO);
        assert_eq!(totals.subtotal, dec!(12.75));
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, dec!(12.75));
    }
}
