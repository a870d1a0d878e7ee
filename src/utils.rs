// src/utils.rs

/// Formats with Indian digit grouping: the last three digits, then pairs
/// (`1234567` -> `12,34,567`).
pub fn format_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Rounds a non-negative amount and groups it the Indian way.
pub fn format_indian_amount(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    format_indian(value.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_indian() {
        assert_eq!(format_indian(0), "0");
        assert_eq!(format_indian(999), "999");
        assert_eq!(format_indian(1000), "1,000");
        assert_eq!(format_indian(99999), "99,999");
        assert_eq!(format_indian(100000), "1,00,000");
        assert_eq!(format_indian(1234567), "12,34,567");
        assert_eq!(format_indian(123456789), "12,34,56,789");
    }

    #[test]
    fn test_format_indian_amount() {
        assert_eq!(format_indian_amount(1234.6), "1,235");
        assert_eq!(format_indian_amount(f64::NAN), "0");
    }
}
