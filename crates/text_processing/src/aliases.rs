//! Field alias table
//!
//! Maps the many ways people write a field label ("D.O.B", "Date of Birth",
//! "Birth date") onto one canonical `ProfileField`. Labels and aliases are
//! compared by their normalized key (lowercase ASCII letters only).
//!
//! The built-in table is compiled once and shared behind an `Arc`; parsers
//! built from config extend a copy of it with `AliasTable::with_extra`.

use biodata_core::{Error, ProfileField, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::normalizer::normalize_key;

/// Aliases shorter than this (normalized) never match by containment
const MIN_CONTAINMENT_KEY_LEN: usize = 3;

/// Labels common in biodatas that name no profile field. They are
/// recognized as labels so their values are never claimed by a field
/// whose alias they happen to contain ("Mother Tongue" is not "mother").
const UNTRACKED_LABELS: &[&str] = &[
    "mother tongue",
    "languages known",
    "language",
    "hobbies",
    "blood group",
    "weight",
];

/// Built-in label spellings per field
const BUILTIN_ALIASES: &[(ProfileField, &[&str])] = &[
    (
        ProfileField::Name,
        &[
            "name",
            "full name",
            "candidate name",
            "candidate's name",
            "boy name",
            "boy's name",
            "girl name",
            "girl's name",
            "bride name",
            "groom name",
        ],
    ),
    (ProfileField::Gender, &["gender", "sex"]),
    (ProfileField::Age, &["age"]),
    (
        ProfileField::Dob,
        &["dob", "d.o.b", "date of birth", "birth date", "birthdate"],
    ),
    (
        ProfileField::Tob,
        &["tob", "t.o.b", "time of birth", "birth time", "time"],
    ),
    (
        ProfileField::Pob,
        &["pob", "p.o.b", "place of birth", "birth place", "birthplace"],
    ),
    (ProfileField::Height, &["height", "ht"]),
    (ProfileField::MaritalStatus, &["marital status", "married status"]),
    (
        ProfileField::Complexion,
        &["complexion", "color", "colour", "skin tone"],
    ),
    (
        ProfileField::Diet,
        &["diet", "food", "food habit", "food habits", "eating habits"],
    ),
    (
        ProfileField::City,
        &[
            "city",
            "current city",
            "location",
            "living in",
            "residence",
            "staying in",
            "address",
            "adress",
        ],
    ),
    (ProfileField::State, &["state"]),
    (ProfileField::Country, &["country"]),
    (ProfileField::Religion, &["religion", "community", "samaj"]),
    (ProfileField::Caste, &["caste"]),
    (ProfileField::SubCaste, &["sub caste", "subcaste", "sub-caste"]),
    (ProfileField::Gotra, &["gotra"]),
    (ProfileField::Manglik, &["manglik", "mangal dosh"]),
    (
        ProfileField::Education,
        &["education", "qualification", "degree", "study"],
    ),
    (
        ProfileField::Profession,
        &["profession", "occupation", "job", "work", "designation"],
    ),
    (
        ProfileField::Company,
        &["company", "organisation", "organization", "working at", "employer"],
    ),
    (
        ProfileField::Income,
        &["income", "salary", "ctc", "package", "annual income", "lpa"],
    ),
    (
        ProfileField::FatherName,
        &["father name", "father's name", "father"],
    ),
    (
        ProfileField::FatherOccupation,
        &[
            "father occupation",
            "father's occupation",
            "father profession",
            "father business",
        ],
    ),
    (
        ProfileField::MotherName,
        &["mother name", "mother's name", "mother"],
    ),
    (
        ProfileField::MotherOccupation,
        &["mother occupation", "mother's occupation", "mother profession"],
    ),
    (
        ProfileField::Siblings,
        &["siblings", "brothers", "sisters", "family detail", "family details"],
    ),
    (ProfileField::FamilyType, &["family type", "family"]),
    (
        ProfileField::About,
        &[
            "about",
            "about candidate",
            "summary",
            "description",
            "note",
            "requirements about partner",
            "partner preference",
            "partner requirement",
        ],
    ),
    (
        ProfileField::Contact,
        &[
            "contact",
            "mobile",
            "mob",
            "phone",
            "whatsapp",
            "whatapp",
            "contact no",
            "contact number",
        ],
    ),
];

static BUILTIN_TABLE: Lazy<Arc<AliasTable>> = Lazy::new(|| {
    let mut table = AliasTable::empty();
    for (field, aliases) in BUILTIN_ALIASES {
        for alias in aliases.iter() {
            table.insert(*field, alias, false);
        }
    }
    for label in UNTRACKED_LABELS {
        table.untracked.insert(normalize_key(label));
    }
    // Built-in aliases are escaped literals; compiling them cannot fail.
    table.inline_pattern = build_inline_pattern(&table).ok();
    Arc::new(table)
});

/// Immutable alias lookup for one parser
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Normalized key -> field
    by_key: HashMap<String, ProfileField>,
    /// Field -> (raw alias, normalized key), in declaration order
    aliases: BTreeMap<ProfileField, Vec<(String, String)>>,
    /// Normalized keys of labels that belong to no field
    untracked: HashSet<String>,
    /// Combined inline-label scanner over every alias
    inline_pattern: Option<Regex>,
}

impl AliasTable {
    fn empty() -> Self {
        Self {
            by_key: HashMap::new(),
            aliases: BTreeMap::new(),
            untracked: HashSet::new(),
            inline_pattern: None,
        }
    }

    /// The shared built-in table
    pub fn builtin() -> Arc<AliasTable> {
        Arc::clone(&BUILTIN_TABLE)
    }

    /// Copy of this table extended with extra aliases keyed by field name.
    ///
    /// Extra aliases take precedence over built-in ones on key collisions.
    pub fn with_extra(&self, extra: &BTreeMap<String, Vec<String>>) -> Result<AliasTable> {
        let mut table = self.clone();

        for (field_name, aliases) in extra {
            let field: ProfileField = field_name.parse()?;
            for alias in aliases {
                if normalize_key(alias).is_empty() {
                    return Err(Error::InvalidConfig {
                        field: format!("parser.extra_aliases.{}", field_name),
                        message: format!("Alias '{}' has no letters", alias),
                    });
                }
                table.insert(field, alias, true);
            }
        }

        table.inline_pattern = Some(build_inline_pattern(&table).map_err(|e| {
            Error::InvalidConfig {
                field: "parser.extra_aliases".to_string(),
                message: e.to_string(),
            }
        })?);

        tracing::debug!(
            extra_fields = extra.len(),
            total_keys = table.by_key.len(),
            "Extended alias table"
        );

        Ok(table)
    }

    fn insert(&mut self, field: ProfileField, alias: &str, overwrite: bool) {
        let key = normalize_key(alias);
        if key.is_empty() {
            return;
        }

        if overwrite {
            self.by_key.insert(key.clone(), field);
        } else {
            self.by_key.entry(key.clone()).or_insert(field);
        }

        // Spellings sharing a key ("dob", "d.o.b") are all kept for the
        // inline scanner, which matches the text as written.
        let entry = self.aliases.entry(field).or_default();
        if !entry.iter().any(|(raw, _)| raw.eq_ignore_ascii_case(alias)) {
            entry.push((alias.to_string(), key));
        }
    }

    /// Field whose alias exactly matches the label's normalized key
    pub fn resolve(&self, label: &str) -> Option<ProfileField> {
        self.resolve_key(&normalize_key(label))
    }

    pub fn resolve_key(&self, key: &str) -> Option<ProfileField> {
        self.by_key.get(key).copied()
    }

    /// True when the key belongs to a field alias or a known untracked label
    pub fn claims_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key) || self.untracked.contains(key)
    }

    /// True when the whole line is nothing but a known label
    pub fn is_label(&self, line: &str) -> bool {
        self.claims_key(&normalize_key(line))
    }

    /// True when one of the field's aliases spans whole words of the label
    /// ("Candidate's Full Name" holds "full name", "Salary Package" does
    /// not hold "age").
    pub fn label_contains_alias(&self, label: &str, field: ProfileField) -> bool {
        let words = label_words(label);
        self.aliases.get(&field).is_some_and(|aliases| {
            aliases.iter().any(|(_, alias_key)| {
                alias_key.len() >= MIN_CONTAINMENT_KEY_LEN && spans_words(&words, alias_key)
            })
        })
    }

    /// Raw aliases registered for a field
    pub fn aliases(&self, field: ProfileField) -> impl Iterator<Item = &str> {
        self.aliases
            .get(&field)
            .into_iter()
            .flat_map(|aliases| aliases.iter().map(|(raw, _)| raw.as_str()))
    }

    pub fn inline_pattern(&self) -> Option<&Regex> {
        self.inline_pattern.as_ref()
    }
}

/// Lowercase ASCII letter runs of a label, in order
fn label_words(label: &str) -> Vec<String> {
    label
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect()
}

/// True when consecutive words join up to exactly `key` ("d","o","b" -> "dob")
fn spans_words(words: &[String], key: &str) -> bool {
    (0..words.len()).any(|start| {
        let mut joined = String::new();
        words[start..].iter().any(|word| {
            joined.push_str(word);
            joined == key
        })
    })
}

/// Build the inline label scanner.
///
/// A label must sit at the start of the text or right after a newline, comma
/// or `|`, optionally behind a numbered bullet. Aliases are tried longest
/// first so "family details" wins over "family". Untracked labels take part
/// too, so "Mother Tongue" is consumed whole. Group 1 is the label as
/// written, group 2 the value up to the next newline, comma or `|`.
fn build_inline_pattern(table: &AliasTable) -> std::result::Result<Regex, regex::Error> {
    let mut raw: Vec<&str> = table
        .aliases
        .values()
        .flat_map(|list| list.iter().map(|(raw, _)| raw.as_str()))
        .chain(UNTRACKED_LABELS.iter().copied())
        .collect();
    raw.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    raw.dedup();

    let alternation = raw
        .iter()
        .map(|alias| {
            let escaped = regex::escape(alias.trim()).replace(' ', r"\s*");
            if alias.trim_end().ends_with(|c: char| c.is_alphanumeric()) {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(
        r"(?i)(?:^|[\n,|])[ \t]*(?:\*?[ \t]*\d+[ \t]*[.)\-]?[ \t]*)?({})[ \t]*(?:[*:=\-.][ \t]*|is[ \t]+)*([^\n,|]{{1,140}})",
        alternation
    ))
}
