//! Height normalization to `"<feet>ft <inches>in"`

use once_cell::sync::Lazy;
use regex::Regex;

/// `5 ft 4 in`, `5 feet`, `5'4"`, `5ft.4`
static FEET_INCHES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:^|[^\d.])(\d)\s*(?:ft\.?|feet|foot|')\s*(?:(\d{1,2})\s*(?:in\b|inch(?:es)?\b|"|'')?)?"#,
    )
    .unwrap()
});

/// `5’4` with a curly apostrophe left over from copy-paste
static COMPACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d)\s*[’`]\s*(\d{1,2})\b").unwrap());

/// `5.4`, `5.10`
static DOTTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([4-7])\s*\.\s*(\d{1,2})\b").unwrap());

/// `172 cm`, `165cms`
static CENTIMETERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(1[2-9]\d|2[0-4]\d)\s*(?:cm|cms|centimet(?:er|re)s?)\b").unwrap()
});

const CM_PER_INCH: f64 = 2.54;

fn format_height(feet: u32, inches: u32) -> Option<String> {
    ((4..=7).contains(&feet) && inches <= 11).then(|| format!("{}ft {}in", feet, inches))
}

fn feet_and_inches(caps: &regex::Captures<'_>) -> Option<String> {
    let feet: u32 = caps.get(1)?.as_str().parse().ok()?;
    let inches: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    format_height(feet, inches)
}

/// Height as `"Xft Yin"` with feet in 4..=7 and inches in 0..=11
pub fn normalize_height(value: &str) -> Option<String> {
    if let Some(caps) = FEET_INCHES.captures(value) {
        return feet_and_inches(&caps);
    }
    if let Some(caps) = COMPACT.captures(value) {
        return feet_and_inches(&caps);
    }
    if let Some(caps) = DOTTED.captures(value) {
        return feet_and_inches(&caps);
    }

    let caps = CENTIMETERS.captures(value)?;
    let cm: f64 = caps.get(1)?.as_str().parse().ok()?;
    let total_inches = (cm / CM_PER_INCH).round() as u32;
    format_height(total_inches / 12, total_inches % 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_and_inches_forms() {
        assert_eq!(normalize_height("5 ft 4 in").as_deref(), Some("5ft 4in"));
        assert_eq!(normalize_height("5'4\"").as_deref(), Some("5ft 4in"));
        assert_eq!(normalize_height("5' 10''").as_deref(), Some("5ft 10in"));
        assert_eq!(normalize_height("5 feet").as_deref(), Some("5ft 0in"));
        assert_eq!(normalize_height("5 Feet 6 Inches").as_deref(), Some("5ft 6in"));
        assert_eq!(normalize_height("5\u{2019}4").as_deref(), Some("5ft 4in"));
    }

    #[test]
    fn test_dotted_form() {
        assert_eq!(normalize_height("5.4").as_deref(), Some("5ft 4in"));
        assert_eq!(normalize_height("5.10").as_deref(), Some("5ft 10in"));
        assert!(normalize_height("5.13").is_none());
    }

    #[test]
    fn test_centimeters() {
        assert_eq!(normalize_height("172 cm").as_deref(), Some("5ft 8in"));
        assert_eq!(normalize_height("152cms").as_deref(), Some("5ft 0in"));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(normalize_height("8 ft 2 in").is_none());
        assert!(normalize_height("3 ft").is_none());
        assert!(normalize_height("5 ft 14 in").is_none());
        assert!(normalize_height("tall").is_none());
    }
}
