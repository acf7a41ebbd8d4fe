//! Biodata parser orchestration
//!
//! For every profile field: labeled pair first, then an inline label scan,
//! then the field's own fallback (if it has one). Each candidate goes through
//! the field normalizer and only a non-empty canonical value is kept.

use biodata_core::{ParsedProfile, ParserConfig, Profile, ProfileField, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

use crate::aliases::AliasTable;
use crate::inline::{
    age_in_text, gender_in_text, income_in_text, infer_unlabeled_name, inline_label_value,
    manglik_in_text, phone_in_text, profession_in_text, religion_in_text, siblings_in_text,
};
use crate::normalizer::{
    has_content, prepare_text, title_case, tokenize_lines, truncate_to_limit,
};
use crate::normalizers::{
    age_from_dob, clean_person_name, normalize_gender, normalize_manglik, normalize_value,
};
use crate::pairs::{extract_label_value_pairs, value_from_pairs, LabeledPair};

static DEFAULT_PARSER: Lazy<BiodataParser> = Lazy::new(BiodataParser::new);

/// Parse a biodata message with the built-in alias table and defaults
pub fn parse_biodata(raw_text: &str) -> ParsedProfile {
    DEFAULT_PARSER.parse(raw_text)
}

/// Where a field value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueSource {
    LabeledPair,
    InlineLabel,
    Fallback,
    Derived,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueSource::LabeledPair => "labeled_pair",
            ValueSource::InlineLabel => "inline_label",
            ValueSource::Fallback => "fallback",
            ValueSource::Derived => "derived",
        };
        write!(f, "{}", s)
    }
}

/// One message, prepared once and shared by every field lookup
struct Document {
    lines: Vec<String>,
    text: String,
    pairs: Vec<LabeledPair>,
}

/// Heuristic biodata parser.
///
/// Cheap to clone; the alias table is shared. Parsing never fails and never
/// panics: anything that cannot be extracted is left unset.
#[derive(Debug, Clone)]
pub struct BiodataParser {
    config: ParserConfig,
    aliases: Arc<AliasTable>,
}

impl BiodataParser {
    /// Parser with default configuration and the built-in alias table
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            aliases: AliasTable::builtin(),
        }
    }

    /// Parser from configuration; extra aliases are merged into a private
    /// copy of the built-in table.
    pub fn from_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;

        let aliases = if config.extra_aliases.is_empty() {
            AliasTable::builtin()
        } else {
            Arc::new(AliasTable::builtin().with_extra(&config.extra_aliases)?)
        };

        Ok(Self { config, aliases })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one pasted biodata message
    pub fn parse(&self, raw_text: &str) -> ParsedProfile {
        let input = truncate_to_limit(raw_text, self.config.max_input_bytes);
        if input.len() < raw_text.len() {
            tracing::warn!(
                input_bytes = raw_text.len(),
                max_input_bytes = self.config.max_input_bytes,
                "Biodata input truncated"
            );
        }

        let lines = tokenize_lines(input);
        let pairs = extract_label_value_pairs(&lines, &self.aliases);
        let doc = Document {
            text: prepare_text(input),
            lines,
            pairs,
        };

        let mut profile = Profile::new();

        for field in ProfileField::ALL {
            match field {
                ProfileField::Gender => {
                    profile.gender = self
                        .labeled(&doc, field, normalize_gender)
                        .or_else(|| fallback(field, gender_in_text(&doc.text)));
                }
                ProfileField::Manglik => {
                    profile.manglik = self
                        .labeled(&doc, field, normalize_manglik)
                        .or_else(|| fallback(field, manglik_in_text(&doc.text)));
                }
                _ => {
                    let normalize = |raw: &str| normalize_value(field, raw);
                    let value = self.labeled(&doc, field, &normalize).or_else(|| {
                        let raw = text_fallback(&doc, field)?;
                        fallback(field, normalize(&raw))
                    });
                    if let (Some(value), Some(slot)) = (value, profile.text_slot_mut(field)) {
                        *slot = Some(value);
                    }
                }
            }
        }

        split_city_state(&mut profile);
        self.derive_age(&mut profile);

        if profile.name.is_none() && self.config.infer_unlabeled_name {
            profile.name = infer_unlabeled_name(&self.unclaimed_lines(&doc.lines))
                .map(|name| clean_person_name(&name))
                .filter(|name| !name.is_empty());
            if profile.name.is_some() {
                log_source(ProfileField::Name, ValueSource::Derived);
            }
        }

        let matched_fields = profile.present_fields();
        tracing::debug!(matched = matched_fields.len(), "Parsed biodata");

        ParsedProfile {
            parsed: profile,
            matched_fields,
        }
    }

    /// Labeled pair, then inline label, each through `normalize`
    fn labeled<T>(
        &self,
        doc: &Document,
        field: ProfileField,
        normalize: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        if let Some(value) =
            value_from_pairs(&doc.pairs, field, &self.aliases).and_then(|raw| normalize(&raw))
        {
            log_source(field, ValueSource::LabeledPair);
            return Some(value);
        }

        let value = inline_label_value(&doc.text, field, &self.aliases)
            .and_then(|raw| normalize(&raw))?;
        log_source(field, ValueSource::InlineLabel);
        Some(value)
    }

    /// Lines that are neither a bare label nor the value right after one
    fn unclaimed_lines(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .enumerate()
            .filter(|(i, line)| {
                let after_label = i
                    .checked_sub(1)
                    .and_then(|prev| lines.get(prev))
                    .is_some_and(|prev| self.aliases.is_label(prev));
                !after_label && !self.aliases.is_label(line)
            })
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn derive_age(&self, profile: &mut Profile) {
        if profile.age.is_some() {
            return;
        }
        let (Some(reference), Some(dob)) = (self.config.reference_date, profile.dob.as_deref())
        else {
            return;
        };

        if let Some(age) = age_from_dob(dob, reference) {
            profile.age = Some(age.to_string());
            log_source(ProfileField::Age, ValueSource::Derived);
        }
    }
}

impl Default for BiodataParser {
    fn default() -> Self {
        Self::new()
    }
}

fn log_source(field: ProfileField, source: ValueSource) {
    tracing::debug!(field = %field, source = %source, "Extracted field");
}

fn fallback<T>(field: ProfileField, value: Option<T>) -> Option<T> {
    if value.is_some() {
        log_source(field, ValueSource::Fallback);
    }
    value
}

/// Field-specific recovery when no label names the field
fn text_fallback(doc: &Document, field: ProfileField) -> Option<String> {
    match field {
        ProfileField::Contact => phone_in_text(&doc.text),
        ProfileField::Religion => religion_in_text(&doc.text),
        ProfileField::Income => income_in_text(&doc.text),
        ProfileField::Siblings => siblings_in_text(&doc.text),
        ProfileField::Profession => profession_in_text(&doc.text),
        ProfileField::Age => age_in_text(&doc.text),
        _ => None,
    }
}

/// `"Pune, Maharashtra"` in `city` becomes city + state
fn split_city_state(profile: &mut Profile) {
    let Some((head, tail)) = profile.city.as_deref().and_then(|city| city.split_once(',')) else {
        return;
    };
    let head = head.trim();
    let tail = tail.trim().trim_end_matches(',').trim();
    if !has_content(head) || !has_content(tail) {
        return;
    }

    let (city, state) = (title_case(head), title_case(tail));
    profile.city = Some(city);
    if profile.state.is_none() {
        profile.state = Some(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biodata_core::Manglik;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_empty_input() {
        let result = parse_biodata("");
        assert!(result.is_empty());
        assert!(result.matched_fields.is_empty());

        let result = parse_biodata("   \n\t  ");
        assert!(result.is_empty());
    }

    #[test]
    fn test_labeled_fields() {
        let result = parse_biodata(
            "Name: Priya Sharma\nGotra: kashyap\nMarital Status: unmarried\nFamily Type: joint",
        );
        assert_eq!(result.parsed.name.as_deref(), Some("Priya Sharma"));
        assert_eq!(result.parsed.gotra.as_deref(), Some("Kashyap"));
        assert_eq!(result.parsed.marital_status.as_deref(), Some("Never Married"));
        assert_eq!(result.parsed.family_type.as_deref(), Some("Joint"));
    }

    #[test]
    fn test_labeled_value_beats_whole_text_cue() {
        let result = parse_biodata("Gender: Female\nLooking for a groom from Pune");
        assert_eq!(result.parsed.gender, Some(biodata_core::Gender::Female));
    }

    #[test]
    fn test_unparseable_label_falls_back() {
        let result = parse_biodata("Manglik: see kundli\nShe is non manglik");
        assert_eq!(result.parsed.manglik, Some(Manglik::No));
    }

    #[test]
    fn test_city_state_split() {
        let result = parse_biodata("City: pune, maharashtra");
        assert_eq!(result.parsed.city.as_deref(), Some("Pune"));
        assert_eq!(result.parsed.state.as_deref(), Some("Maharashtra"));

        let result = parse_biodata("City: Indore, MP\nState: Madhya Pradesh");
        assert_eq!(result.parsed.city.as_deref(), Some("Indore"));
        assert_eq!(result.parsed.state.as_deref(), Some("Madhya Pradesh"));
    }

    #[test]
    fn test_derived_age_needs_reference_date() {
        let text = "DOB: 15/08/1995";
        assert!(parse_biodata(text).parsed.age.is_none());

        let config = ParserConfig::default()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        let parser = BiodataParser::from_config(config).unwrap();
        assert_eq!(parser.parse(text).parsed.age.as_deref(), Some("29"));
    }

    #[test]
    fn test_name_inference_can_be_disabled() {
        let text = "Rohan Verma\nDOB: 12/03/1995";
        assert_eq!(
            parse_biodata(text).parsed.name.as_deref(),
            Some("Rohan Verma")
        );

        let config = ParserConfig {
            infer_unlabeled_name: false,
            ..ParserConfig::default()
        };
        let parser = BiodataParser::from_config(config).unwrap();
        assert!(parser.parse(text).parsed.name.is_none());
    }

    #[test]
    fn test_extra_aliases() {
        let mut extra_aliases = BTreeMap::new();
        extra_aliases.insert("dob".to_string(), vec!["janam tithi".to_string()]);
        let parser = BiodataParser::from_config(ParserConfig {
            extra_aliases,
            ..ParserConfig::default()
        })
        .unwrap();

        let result = parser.parse("Janam Tithi: 15/08/1995");
        assert_eq!(result.parsed.dob.as_deref(), Some("1995-08-15"));
        assert!(parse_biodata("Janam Tithi: 15/08/1995").parsed.dob.is_none());
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let mut extra_aliases = BTreeMap::new();
        extra_aliases.insert("horoscope".to_string(), vec!["kundli".to_string()]);
        assert!(BiodataParser::from_config(ParserConfig {
            extra_aliases,
            ..ParserConfig::default()
        })
        .is_err());
    }

    #[test]
    fn test_truncation_keeps_prefix() {
        let config = ParserConfig {
            max_input_bytes: 256,
            ..ParserConfig::default()
        };
        let parser = BiodataParser::from_config(config).unwrap();

        let text = format!("Name: Priya Sharma\n{}\nCity: Pune", "x".repeat(400));
        let result = parser.parse(&text);
        assert_eq!(result.parsed.name.as_deref(), Some("Priya Sharma"));
        assert!(result.parsed.city.is_none());
    }
}
