//! Text normalization and line tokenization
//!
//! Pasted WhatsApp biodatas arrive with non-breaking spaces, curly quotes,
//! bullet markers, bold asterisks and several fields crammed on one line.
//! Everything downstream matches against the canonical form produced here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Numbered bullets: `1. `, `2) `, `*3. `
static NUMBERED_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*?\s*\d{1,2}\s*[.)]\s+").unwrap());

/// Symbol bullets: `-`, `*`, `•`, `>`
static SYMBOL_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s\-*•·>➤►]+").unwrap());

/// Leading connective left behind after a label (`is Priya`, `: Priya`)
static LEADING_CONNECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:is\s+|[=:\-.]\s*)+").unwrap());

/// Trailing list noise (`Pune,` / `Pune |`)
static TRAILING_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,|]+\s*$").unwrap());

/// Canonicalize whitespace, quotes and dashes; collapse runs of whitespace
/// (including newlines) to single spaces and trim.
pub fn normalize_text(value: &str) -> String {
    let mapped: String = value
        .chars()
        .map(|c| match c {
            '\u{00a0}' | '\u{2007}' | '\u{202f}' | '\t' => ' ',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison key for labels: lowercase ASCII letters only.
///
/// `"D.O.B"`, `"DOB"` and `"dob :"` all become `"dob"`.
pub fn normalize_key(value: &str) -> String {
    normalize_text(value)
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Lowercase, then capitalize the first letter of each space-separated token
pub fn title_case(value: &str) -> String {
    normalize_text(value)
        .to_lowercase()
        .split(' ')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Strip label leftovers and list noise from an extracted value
pub fn clean_candidate_value(value: &str) -> String {
    let normalized = normalize_text(value);
    let without_lead = LEADING_CONNECTIVE.replace(&normalized, "");
    let without_trail = TRAILING_SEPARATOR.replace(&without_lead, "");
    without_trail.trim_matches('*').trim().to_string()
}

/// Split raw text into ordered, non-empty line fragments.
///
/// Bullets and bold asterisks are removed, and each line is further split
/// on `|` and `;` since several fields often share one line.
pub fn tokenize_lines(raw_text: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in raw_text.split(|c: char| c == '\n' || c == '\r') {
        let without_number = NUMBERED_BULLET.replace(raw_line, "");
        let without_bullet = SYMBOL_BULLET.replace(&without_number, "");
        let stripped = without_bullet.replace('*', "");
        let stripped = stripped.trim();
        if stripped.is_empty() {
            continue;
        }

        lines.extend(
            stripped
                .split(|c: char| c == '|' || c == ';')
                .map(normalize_text)
                .filter(|piece| !piece.is_empty()),
        );
    }

    lines
}

/// Per-line normalized text with line breaks preserved, for whole-text scans
pub fn prepare_text(raw_text: &str) -> String {
    raw_text
        .split(|c: char| c == '\n' || c == '\r')
        .map(normalize_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut `text` to at most `max_bytes`, backing off to a char boundary
pub fn truncate_to_limit(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }

    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// True when the value carries any letter or digit
pub fn has_content(value: &str) -> bool {
    value.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize_text("  Priya\u{00a0}\u{201c}Sharma\u{201d}\t\u{2013} Pune  "),
            "Priya \"Sharma\" - Pune"
        );
        assert_eq!(normalize_text("a\n\n b"), "a b");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("D.O.B"), "dob");
        assert_eq!(normalize_key("Date Of Birth"), "dateofbirth");
        assert_eq!(normalize_key("🌸 Father's Name"), "fathersname");
        assert_eq!(normalize_key("123"), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("priya SHARMA"), "Priya Sharma");
        assert_eq!(title_case("  new   delhi "), "New Delhi");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_clean_candidate_value() {
        assert_eq!(clean_candidate_value(": Pune,"), "Pune");
        assert_eq!(clean_candidate_value("is Software Engineer |"), "Software Engineer");
        assert_eq!(clean_candidate_value("**Hindu**"), "Hindu");
        // A leading "Is" inside a real value is kept
        assert_eq!(clean_candidate_value("Isha Sharma"), "Isha Sharma");
    }

    #[test]
    fn test_tokenize_lines_strips_bullets_and_splits() {
        let lines = tokenize_lines(
            "*Name:* Priya\n1. DOB: 15/08/1995\n- Height: 5'4 | City: Pune; Caste: Brahmin\n\n   \n",
        );
        assert_eq!(
            lines,
            vec![
                "Name: Priya",
                "DOB: 15/08/1995",
                "Height: 5'4",
                "City: Pune",
                "Caste: Brahmin",
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_leading_numbers_without_bullet_punctuation() {
        let lines = tokenize_lines("1 brother and 1 sister\r\n9876543210");
        assert_eq!(lines, vec!["1 brother and 1 sister", "9876543210"]);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "ab\u{0939}\u{093f}"; // 2 ASCII bytes + two 3-byte chars
        assert_eq!(truncate_to_limit(text, 4), "ab");
        assert_eq!(truncate_to_limit(text, 5), "ab\u{0939}");
        assert_eq!(truncate_to_limit(text, 100), text);
    }

    #[test]
    fn test_has_content() {
        assert!(has_content("Pune"));
        assert!(has_content("42"));
        assert!(!has_content("-- ,|"));
        assert!(!has_content(""));
    }
}
