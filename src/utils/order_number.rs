use chrono::Utc;
use rand::Rng;

pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Generates a candidate order number: `ORD` + timestamp to second
/// precision + 4 random digits. The suffix keeps two orders created within
/// the same second apart; the creation path still re-checks uniqueness
/// against the store and retries.
pub fn generate_order_number() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}{}{:04}",
        ORDER_NUMBER_PREFIX,
        Utc::now().format("%Y%m%d%H%M%S"),
        rng.gen_range(0..10000)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        // ORD + 14 timestamp digits + 4 suffix digits
        assert_eq!(number.len(), 21);
        assert!(number.starts_with(ORDER_NUMBER_PREFIX));
        assert!(number[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_order_number_fits_storage_column() {
        // orders.order_number is varchar(32)
        assert!(generate_order_number().len() <= 32);
    }

    #[test]
    fn test_same_second_numbers_are_distinct() {
        // All generated within one clock second with overwhelming likelihood;
        // the random suffix must keep them apart.
        let numbers: std::collections::HashSet<String> =
            (0..50).map(|_| generate_order_number()).collect();
        assert!(numbers.len() > 1);
    }
}
