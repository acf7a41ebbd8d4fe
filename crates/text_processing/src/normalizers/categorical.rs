//! Keyword cascades for categorical fields and person-name cleanup

use biodata_core::{Gender, Manglik};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::{manglik_cascade, RELIGIONS};
use crate::normalizer::{normalize_text, title_case};

static SCOPED_MALE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:male|boy|groom|m)\b").unwrap());
static SCOPED_FEMALE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:female|girl|bride|f)\b").unwrap());

static BARE_YES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:yes|y)\.?$").unwrap());
static BARE_NO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:no|n)\.?$").unwrap());

static NEVER_MARRIED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)never|unmarried|single|bachelor").unwrap());
static AWAITING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)awaiting").unwrap());
static DIVORCED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)divorc").unwrap());
static WIDOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)widow").unwrap());

static NUCLEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)nuclear").unwrap());
static JOINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)joint").unwrap());

// Diet cascade, most specific first so "non veg" never reads as "veg"
static DIET_CASCADE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)non[\s-]?veg").unwrap(), "Non-Vegetarian"),
        (Regex::new(r"(?i)\begg").unwrap(), "Eggetarian"),
        (Regex::new(r"(?i)\bvegan\b").unwrap(), "Vegan"),
        (Regex::new(r"(?i)\bjain\b").unwrap(), "Jain"),
        (Regex::new(r"(?i)\bveg(?:etarian)?\b").unwrap(), "Vegetarian"),
    ]
});

static HONORIFIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:(?:mr|mrs|ms|miss|dr|er|shri|smt)\.?\s+)+").unwrap());
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)?").unwrap());

/// Gender from the candidate's own declared value; accepts `M`/`F`
pub fn normalize_gender(value: &str) -> Option<Gender> {
    if SCOPED_MALE.is_match(value) {
        Some(Gender::Male)
    } else if SCOPED_FEMALE.is_match(value) {
        Some(Gender::Female)
    } else {
        None
    }
}

/// Manglik status from a declared value; accepts bare yes/no
pub fn normalize_manglik(value: &str) -> Option<Manglik> {
    let value = value.trim();
    manglik_cascade(value).or_else(|| {
        if BARE_YES.is_match(value) {
            Some(Manglik::Yes)
        } else if BARE_NO.is_match(value) {
            Some(Manglik::No)
        } else {
            None
        }
    })
}

/// Closed religion list, else title case
pub fn normalize_religion(value: &str) -> String {
    let value = normalize_text(value);
    RELIGIONS
        .iter()
        .find(|religion| religion.eq_ignore_ascii_case(&value))
        .map(|religion| religion.to_string())
        .unwrap_or_else(|| title_case(&value))
}

/// Marital status cascade; "awaiting divorce" is checked before "divorced"
pub fn normalize_marital_status(value: &str) -> String {
    if NEVER_MARRIED.is_match(value) {
        "Never Married".to_string()
    } else if AWAITING.is_match(value) {
        "Awaiting Divorce".to_string()
    } else if DIVORCED.is_match(value) {
        "Divorced".to_string()
    } else if WIDOWED.is_match(value) {
        "Widowed".to_string()
    } else {
        title_case(value)
    }
}

pub fn normalize_family_type(value: &str) -> String {
    if NUCLEAR.is_match(value) {
        "Nuclear".to_string()
    } else if JOINT.is_match(value) {
        "Joint".to_string()
    } else {
        title_case(value)
    }
}

pub fn normalize_diet(value: &str) -> String {
    DIET_CASCADE
        .iter()
        .find(|(pattern, _)| pattern.is_match(value))
        .map(|(_, diet)| diet.to_string())
        .unwrap_or_else(|| title_case(value))
}

/// Strip honorifics and parenthetical asides, then title-case
pub fn clean_person_name(value: &str) -> String {
    let without_asides = PARENTHETICAL.replace_all(value, " ");
    let normalized = normalize_text(&without_asides);
    let without_title = HONORIFIC.replace(&normalized, "");
    title_case(&without_title)
}
