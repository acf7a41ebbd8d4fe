//! Explicit `Label: Value` extraction
//!
//! Two layouts are recognized:
//! - `Label: Value` / `Label = Value` / `Label - Value` / `Label. Value` on one line
//! - a line that is only a known label, with the value on the next line
//!
//! A label is never inferred from a bare value; that is left to the inline
//! fallbacks.

use biodata_core::ProfileField;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::aliases::AliasTable;
use crate::normalizer::{clean_candidate_value, normalize_key};

/// `Label: Value` / `Label = Value`
static COLON_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.{1,60}?)\s*[:=]\s*(.+)$").unwrap());

/// Longest label accepted from a `Label - Value` split, in chars
const MAX_LABEL_CHARS: usize = 60;

/// One label/value declaration as written in the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPair {
    pub label: String,
    pub value: String,
}

impl LabeledPair {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.trim().to_string(),
            value: value.trim().to_string(),
        }
    }
}

/// Byte range of the first `.` or `-` that separates a label from its value.
///
/// A dot only separates when whitespace touches it, and a hyphen only when
/// it does not join two letters, so "D.O.B - x" splits at " - " and
/// "Sub-Caste" stays whole.
fn loose_separator(line: &str) -> Option<(usize, usize)> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();

    chars.iter().enumerate().find_map(|(i, &(offset, c))| {
        if c != '.' && c != '-' {
            return None;
        }
        let prev = i.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(i + 1).map(|&(_, n)| n);

        let spaced = prev.is_some_and(char::is_whitespace) || next.is_some_and(char::is_whitespace);
        let joins_letters = prev.is_some_and(char::is_alphabetic) && next.is_some_and(char::is_alphabetic);
        let separates = spaced || (c == '-' && !joins_letters);
        separates.then_some((offset, offset + c.len_utf8()))
    })
}

/// Split a line into label and value, if it has that shape.
///
/// Whichever separator comes first decides: `T.O.B - 10:30 am` splits at
/// the dash, `Height: 5.4` at the colon.
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(|c: char| c == ':' || c == '=');
    let loose = loose_separator(line).filter(|(start, _)| colon.map_or(true, |c| *start < c));

    let (label, value) = match loose {
        Some((start, end)) => {
            let label = &line[..start];
            if label.trim().chars().count() > MAX_LABEL_CHARS {
                return None;
            }
            (label, &line[end..])
        }
        None => {
            let caps = COLON_PAIR.captures(line)?;
            (caps.get(1)?.as_str(), caps.get(2)?.as_str())
        }
    };
    if value.trim().is_empty() {
        return None;
    }

    // "15.08.1995" is a value, not a label "15"
    if !label.chars().any(char::is_alphabetic) {
        return None;
    }
    Some((label, value))
}

/// Extract every explicit declaration from tokenized lines, in order
pub fn extract_label_value_pairs(lines: &[String], aliases: &AliasTable) -> Vec<LabeledPair> {
    let mut pairs = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some((label, value)) = split_pair(line) {
            pairs.push(LabeledPair::new(label, value));
            continue;
        }

        if aliases.is_label(line) {
            if let Some(next) = lines.get(i + 1) {
                if split_pair(next).is_none() && !aliases.is_label(next) {
                    pairs.push(LabeledPair::new(line, next));
                }
            }
        }
    }

    pairs
}

/// Value declared for `field`, resolved through the alias table.
///
/// An exact label match anywhere wins over a containment match. A label
/// that exactly names another field is never claimed by containment, and
/// the candidate's own `name` never comes from a line mentioning a parent.
pub fn value_from_pairs(
    pairs: &[LabeledPair],
    field: ProfileField,
    aliases: &AliasTable,
) -> Option<String> {
    let eligible = |pair: &LabeledPair| field != ProfileField::Name || !mentions_parent(pair);

    let exact = pairs
        .iter()
        .filter(|pair| eligible(pair))
        .find(|pair| aliases.resolve(&pair.label) == Some(field));

    let found = exact.or_else(|| {
        pairs.iter().filter(|pair| eligible(pair)).find(|pair| {
            !aliases.claims_key(&normalize_key(&pair.label))
                && aliases.label_contains_alias(&pair.label, field)
        })
    })?;

    let value = clean_candidate_value(&found.value);
    (!value.is_empty()).then_some(value)
}

fn mentions_parent(pair: &LabeledPair) -> bool {
    let label = pair.label.to_lowercase();
    let value = pair.value.to_lowercase();
    ["father", "mother"]
        .iter()
        .any(|parent| label.contains(parent) || value.contains(parent))
}
