//! Biodata parser configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Smallest accepted input cap; anything lower would cut real biodatas short
pub const MIN_INPUT_BYTES: usize = 256;

/// Tunables for `BiodataParser`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Input beyond this many bytes is truncated before parsing
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Guess the candidate name from the first name-like line when unlabeled
    #[serde(default = "default_true")]
    pub infer_unlabeled_name: bool,

    /// Date used to derive `age` from `dob`. Left unset, age is only read
    /// from explicit text so parsing stays deterministic.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    /// Additional label spellings per field, keyed by field name
    /// (e.g. `dob = ["janam tithi"]`)
    #[serde(default)]
    pub extra_aliases: BTreeMap<String, Vec<String>>,
}

fn default_max_input_bytes() -> usize {
    8 * 1024
}

fn default_true() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            infer_unlabeled_name: true,
            reference_date: None,
            extra_aliases: BTreeMap::new(),
        }
    }
}

impl ParserConfig {
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes < MIN_INPUT_BYTES {
            return Err(Error::InvalidConfig {
                field: "parser.max_input_bytes".to_string(),
                message: format!(
                    "Must be at least {}, got {}",
                    MIN_INPUT_BYTES, self.max_input_bytes
                ),
            });
        }

        for (field, aliases) in &self.extra_aliases {
            field.parse::<crate::ProfileField>()?;
            if aliases.iter().any(|alias| !alias.chars().any(char::is_alphabetic)) {
                return Err(Error::InvalidConfig {
                    field: format!("parser.extra_aliases.{}", field),
                    message: "Aliases must contain at least one letter".to_string(),
                });
            }
        }

        Ok(())
    }
}
