//! Rupee formatting with Indian digit grouping
//!
//! The last three digits form one group and every group to the left of it
//! has two digits (lakh/crore grouping): `12,34,567`.

pub const CURRENCY_MARKER: &str = "₹";

/// Format a price as rupees, e.g. `₹ 12,34,567`.
///
/// The amount is rounded to the nearest integer, ties to even. Negative
/// amounts keep the marker first and put the sign on the digits:
/// `₹ -12,34,567`. Non-finite input saturates (NaN formats as zero); callers
/// are expected to reject it beforehand.
pub fn format_currency(amount: f64) -> String {
    format_rupees(amount.round_ties_even() as i64)
}

/// Format a whole rupee amount
pub fn format_rupees(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.unsigned_abs().to_string();
    format!("{} {}{}", CURRENCY_MARKER, sign, group_indian(&digits))
}

/// Insert Indian grouping separators into a string of ASCII digits
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push(',');
    grouped.push_str(last_three);
    grouped
}

/// Western thousands grouping, e.g. `50,000`. Used for distances.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(formatted: &str) -> String {
        formatted
            .trim_start_matches(CURRENCY_MARKER)
            .trim_start()
            .replace(',', "")
    }

    #[test]
    fn test_below_one_thousand_has_no_separator() {
        assert_eq!(format_currency(0.0), "₹ 0");
        assert_eq!(format_currency(7.0), "₹ 7");
        assert_eq!(format_currency(999.0), "₹ 999");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_currency(1000.0), "₹ 1,000");
        assert_eq!(format_currency(10000.0), "₹ 10,000");
        assert_eq!(format_currency(100000.0), "₹ 1,00,000");
        assert_eq!(format_currency(1234567.0), "₹ 12,34,567");
        assert_eq!(format_currency(10000000.0), "₹ 1,00,00,000");
        assert_eq!(format_currency(123456789.0), "₹ 12,34,56,789");
    }

    #[test]
    fn test_rounds_to_nearest_ties_even() {
        assert_eq!(format_currency(999.6), "₹ 1,000");
        assert_eq!(format_currency(549999.4), "₹ 5,49,999");
        assert_eq!(format_currency(2.5), "₹ 2");
        assert_eq!(format_currency(3.5), "₹ 4");
    }

    #[test]
    fn test_negative_amounts_sign_after_marker() {
        assert_eq!(format_currency(-999.0), "₹ -999");
        assert_eq!(format_currency(-10000.0), "₹ -10,000");
        assert_eq!(format_rupees(-1234567), "₹ -12,34,567");
        assert_eq!(format_rupees(i64::MIN), "₹ -92,23,37,20,36,85,47,75,808");
    }

    #[test]
    fn test_non_finite_does_not_panic() {
        assert_eq!(format_currency(f64::NAN), "₹ 0");
        assert!(format_currency(f64::INFINITY).starts_with("₹ 92,"));
    }

    #[test]
    fn test_digits_survive_grouping() {
        let mut n: u64 = 0;
        while n < 50_000_000_000 {
            let formatted = format_rupees(n as i64);
            assert_eq!(strip(&formatted), n.to_string(), "n = {}", n);
            n = n * 3 + 7;
        }
        for n in 0..5_000u64 {
            assert_eq!(strip(&format_rupees(n as i64)), n.to_string());
        }
    }

    #[test]
    fn test_groups_left_of_last_three_have_two_digits() {
        let formatted = format_rupees(98_76_54_32_10);
        let body = formatted.trim_start_matches(CURRENCY_MARKER).trim_start();
        let groups: Vec<&str> = body.split(',').collect();
        assert_eq!(groups.last().map(|g| g.len()), Some(3));
        assert!(groups[1..groups.len() - 1].iter().all(|g| g.len() == 2));
        assert!(groups[0].len() <= 2);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(50_000), "50,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
