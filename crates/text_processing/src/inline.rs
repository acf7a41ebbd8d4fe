//! Inline extraction from unlabeled prose
//!
//! Used when no explicit `Label: Value` declaration names a field. Covers
//! inline labels that the line splitter missed, plus per-field keyword and
//! pattern scans over the whole message (phone numbers, religion keywords,
//! income, siblings, manglik and gender cues, the candidate's name).
//!
//! Static patterns are compiled once using `once_cell::sync::Lazy`.

use biodata_core::{Gender, Manglik, ProfileField};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::aliases::AliasTable;
use crate::normalizer::{clean_candidate_value, normalize_key, normalize_text};

/// Closed religion list, in canonical spelling
pub const RELIGIONS: [&str; 8] = [
    "Hindu",
    "Muslim",
    "Sikh",
    "Christian",
    "Jain",
    "Buddhist",
    "Parsi",
    "Jewish",
];

// Indian mobile numbers: optional +91 / 91 / 0 prefix, then [6-9] and 9 digits
pub(crate) static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+91[\s-]?|\b(?:91[\s-]?|0)?)[6-9]\d{9}\b").unwrap());

static RELIGION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(hindu|muslim|sikh|christian|jain|buddhist|parsi|jewish)\b").unwrap()
});

static INCOME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?\s*(?:lpa|lacs?|lakhs?|per annum|pa))\b").unwrap()
});

static SIBLINGS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(\d+\s*brothers?(?:\s*(?:and|,|&)\s*\d+\s*sisters?)?)\b").unwrap(),
        Regex::new(r"(?i)\b(\d+\s*sisters?(?:\s*(?:and|,|&)\s*\d+\s*brothers?)?)\b").unwrap(),
    ]
});

static PROFESSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:working|works|work|employed|job)\s+as\s+(?:an?\s+)?([a-z][a-z &/\-]{1,60}?)\s*(?:[.,;|\n]|$)",
    )
    .unwrap()
});

static AGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bage[\s:\-]*(\d{2})\b").unwrap(),
        Regex::new(r"(?i)\b(\d{2})\s*(?:years?|yrs?)\b").unwrap(),
    ]
});

// Manglik cascade: negative and partial forms before the bare form
static MANGLIK_NEGATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:non|no)\b.*manglik|non[\s-]?manglik").unwrap());
static MANGLIK_PARTIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)anshik|partial").unwrap());
static MANGLIK_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)manglik").unwrap());
static MANGLIK_UNKNOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)don'?t know|do not know|not sure|unknown|\bn/?a\b").unwrap()
});

static MALE_CUES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:male|boy|groom)\b").unwrap());
static FEMALE_CUES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:female|girl|bride)\b").unwrap());

/// Lines that look like a name but are headings, sentences or declarations
static NOT_A_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:biodata|bio-data|bio|profile|dob|height|religion|caste|occupation|income|contact|mobile|manglik|gotra|father|mother|brother|sister|family|education|profession|salary|gender|born|birth|date|name|age|time|place|about|details|marriage|matrimonial|is|am|are|was|she|he|my|our|ganesh|ganeshay|ganeshaya|ganapati|namah)\b",
    )
    .unwrap()
});
static NAME_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z][a-z\s.']+$").unwrap());

/// Value written right after an inline label (`..., Caste - Brahmin, ...`).
///
/// Walks every label occurrence in the prepared text and returns the first
/// whose label resolves to `field`.
pub fn inline_label_value(text: &str, field: ProfileField, aliases: &AliasTable) -> Option<String> {
    let pattern = aliases.inline_pattern()?;

    for caps in pattern.captures_iter(text) {
        let (Some(label), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if aliases.resolve_key(&normalize_key(label.as_str())) != Some(field) {
            continue;
        }

        let value = clean_candidate_value(value.as_str());
        if value.is_empty() {
            continue;
        }
        if field == ProfileField::Name && mentions_parent(&value) {
            continue;
        }
        return Some(value);
    }

    None
}

fn mentions_parent(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("father") || lower.contains("mother")
}

/// First Indian mobile number in the text, as written
pub fn phone_in_text(text: &str) -> Option<String> {
    PHONE_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Whole-word religion keyword, in canonical spelling
pub fn religion_in_text(text: &str) -> Option<String> {
    let found = RELIGION_PATTERN.captures(text)?.get(1)?.as_str();
    RELIGIONS
        .iter()
        .find(|religion| religion.eq_ignore_ascii_case(found))
        .map(|religion| religion.to_string())
}

/// Income mentioned inline (`12 LPA`, `8.5 lakhs`)
pub fn income_in_text(text: &str) -> Option<String> {
    INCOME_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Sibling counts mentioned inline (`1 brother and 1 sister`)
pub fn siblings_in_text(text: &str) -> Option<String> {
    SIBLINGS_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| normalize_text(m.as_str()))
    })
}

/// Occupation stated in prose (`working as Software Engineer`)
pub fn profession_in_text(text: &str) -> Option<String> {
    let caps = PROFESSION_PATTERN.captures(text)?;
    let value = clean_candidate_value(caps.get(1)?.as_str());
    (!value.is_empty()).then_some(value)
}

/// Age stated in prose (`Age 29`, `29 years`, `29 yrs old`)
pub fn age_in_text(text: &str) -> Option<String> {
    AGE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Ordered manglik cascade.
///
/// Negative and partial forms are checked before the bare "manglik" so
/// "Non-Manglik" and "Anshik Manglik" are never tagged `Yes`.
pub fn manglik_cascade(value: &str) -> Option<Manglik> {
    if MANGLIK_NEGATIVE.is_match(value) {
        Some(Manglik::No)
    } else if MANGLIK_PARTIAL.is_match(value) {
        Some(Manglik::Anshik)
    } else if MANGLIK_BARE.is_match(value) {
        Some(Manglik::Yes)
    } else if MANGLIK_UNKNOWN.is_match(value) {
        Some(Manglik::DontKnow)
    } else {
        None
    }
}

/// Manglik status from the whole message; only when it mentions "manglik"
pub fn manglik_in_text(text: &str) -> Option<Manglik> {
    if !MANGLIK_BARE.is_match(text) {
        return None;
    }
    manglik_cascade(text)
}

/// Gender cues in the whole message, male cues first
pub fn gender_in_text(text: &str) -> Option<Gender> {
    if MALE_CUES.is_match(text) {
        Some(Gender::Male)
    } else if FEMALE_CUES.is_match(text) {
        Some(Gender::Female)
    } else {
        None
    }
}

/// Guess the candidate's name from the first short, name-shaped line
pub fn infer_unlabeled_name(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .map(|line| normalize_text(line))
        .filter(|line| (3..=40).contains(&line.chars().count()))
        .filter(|line| !line.chars().any(|c| c.is_ascii_digit()))
        .filter(|line| !NOT_A_NAME.is_match(line))
        .find(|line| NAME_SHAPE.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_label_value() {
        let table = AliasTable::builtin();
        let text = "Rahul Verma\nD.O.B: 12/3/95, Caste - Kayastha | Family Details: 2 brothers";

        assert_eq!(
            inline_label_value(text, ProfileField::Dob, &table).as_deref(),
            Some("12/3/95")
        );
        assert_eq!(
            inline_label_value(text, ProfileField::Caste, &table).as_deref(),
            Some("Kayastha")
        );
        assert_eq!(
            inline_label_value(text, ProfileField::Siblings, &table).as_deref(),
            Some("2 brothers")
        );
        // "Family Details" belongs to siblings, not family type
        assert!(inline_label_value(text, ProfileField::FamilyType, &table).is_none());
    }

    #[test]
    fn test_phone_in_text() {
        assert_eq!(
            phone_in_text("Contact +91 9988776655.").as_deref(),
            Some("+91 9988776655")
        );
        assert_eq!(phone_in_text("call 9876543210 now").as_deref(), Some("9876543210"));
        assert_eq!(phone_in_text("landline 09876543210").as_deref(), Some("09876543210"));
        // Does not start with 6-9
        assert!(phone_in_text("id 1234567890").is_none());
        // Embedded inside a longer number
        assert!(phone_in_text("acct 123498765432101").is_none());
    }

    #[test]
    fn test_religion_in_text() {
        assert_eq!(religion_in_text("We are a SIKH family").as_deref(), Some("Sikh"));
        assert!(religion_in_text("Jainism studies").is_none());
    }

    #[test]
    fn test_income_and_siblings() {
        assert_eq!(income_in_text("earning 12.5 LPA now").as_deref(), Some("12.5 LPA"));
        assert_eq!(income_in_text("about 8 lakhs").as_deref(), Some("8 lakhs"));
        assert_eq!(
            siblings_in_text("He has 1 brother and 1 sister.").as_deref(),
            Some("1 brother and 1 sister")
        );
        assert_eq!(siblings_in_text("2 sisters").as_deref(), Some("2 sisters"));
    }

    #[test]
    fn test_profession_and_age() {
        assert_eq!(
            profession_in_text("Age 29, working as Software Engineer. Non-Manglik.").as_deref(),
            Some("Software Engineer")
        );
        assert_eq!(
            profession_in_text("She works as a Doctor").as_deref(),
            Some("Doctor")
        );
        assert_eq!(age_in_text("Age 29, working").as_deref(), Some("29"));
        assert_eq!(age_in_text("she is 27 years old").as_deref(), Some("27"));
        assert_eq!(age_in_text("Rohan, 28 years, Software Engineer").as_deref(), Some("28"));
        assert_eq!(age_in_text("26 yrs, Pune").as_deref(), Some("26"));
    }

    #[test]
    fn test_manglik_cascade_order() {
        assert_eq!(manglik_cascade("Non-Manglik"), Some(Manglik::No));
        assert_eq!(manglik_cascade("no manglik dosh"), Some(Manglik::No));
        assert_eq!(manglik_cascade("She is Anshik Manglik"), Some(Manglik::Anshik));
        assert_eq!(manglik_cascade("Manglik"), Some(Manglik::Yes));
        assert_eq!(manglik_cascade("don't know"), Some(Manglik::DontKnow));
        assert_eq!(manglik_cascade("N/A"), Some(Manglik::DontKnow));
        assert_eq!(manglik_cascade("maybe"), None);
    }

    #[test]
    fn test_manglik_in_text_requires_mention() {
        assert!(manglik_in_text("Name: Priya\nCity: Nashik").is_none());
        assert_eq!(manglik_in_text("Boy is non manglik"), Some(Manglik::No));
    }

    #[test]
    fn test_gender_in_text() {
        assert_eq!(gender_in_text("Biodata of the groom"), Some(Gender::Male));
        assert_eq!(gender_in_text("Girl, 26, Pune"), Some(Gender::Female));
        assert_eq!(gender_in_text("Female candidate"), Some(Gender::Female));
        assert!(gender_in_text("Malesh Kumar").is_none());
    }

    #[test]
    fn test_infer_unlabeled_name() {
        let lines: Vec<String> = [
            "|| Shree Ganeshay Namah ||",
            "Biodata",
            "Rohan Verma",
            "DOB: 12/03/1995",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(infer_unlabeled_name(&lines).as_deref(), Some("Rohan Verma"));

        let lines = vec!["She is Anshik Manglik".to_string()];
        assert!(infer_unlabeled_name(&lines).is_none());
    }
}
