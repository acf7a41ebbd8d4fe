//! Contact number normalization

use crate::inline::PHONE_PATTERN;

const LOCAL_DIGITS: usize = 10;

/// Canonical contact number.
///
/// A leading `+` with at least 10 digits keeps the international form
/// (`+919988776655`); otherwise the last 10 digits are used. Anything with
/// fewer than 10 digits is rejected.
pub fn normalize_phone(value: &str) -> Option<String> {
    // Prefer a recognizable mobile number inside longer values
    // ("9876543210 / 9123456789", "Mob: +91-98765 43210 (WhatsApp)")
    let candidate = PHONE_PATTERN
        .find(value)
        .map(|m| m.as_str())
        .unwrap_or(value)
        .trim();

    let digits: String = candidate.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < LOCAL_DIGITS {
        return None;
    }

    if candidate.starts_with('+') {
        Some(format!("+{}", digits))
    } else {
        Some(digits[digits.len() - LOCAL_DIGITS..].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_numbers() {
        assert_eq!(normalize_phone("9876543210").as_deref(), Some("9876543210"));
        assert_eq!(normalize_phone("98765 43210").as_deref(), Some("9876543210"));
        assert_eq!(normalize_phone("09876543210").as_deref(), Some("9876543210"));
        assert_eq!(normalize_phone("91-9876543210").as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_international_numbers() {
        assert_eq!(
            normalize_phone("+91 99887 76655").as_deref(),
            Some("+919988776655")
        );
        assert_eq!(
            normalize_phone("+1 (415) 555-0100").as_deref(),
            Some("+14155550100")
        );
    }

    #[test]
    fn test_first_of_several_numbers() {
        assert_eq!(
            normalize_phone("9876543210 / 9123456789").as_deref(),
            Some("9876543210")
        );
    }

    #[test]
    fn test_short_numbers_are_rejected() {
        assert!(normalize_phone("12345").is_none());
        assert!(normalize_phone("+91 98765").is_none());
        assert!(normalize_phone("call me").is_none());
    }
}
