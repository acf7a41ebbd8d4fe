//! Free-text biodata parsing
//!
//! This crate turns a pasted WhatsApp-style matrimonial biodata into a
//! structured partial `Profile`:
//! - **Normalization**: whitespace, quotes, dashes, bullets and bold markers
//! - **Label/value pairs**: `Label: Value` lines and label-then-value layouts
//! - **Alias resolution**: many label spellings onto one canonical field
//! - **Inline fallbacks**: phone numbers, religion keywords, income, siblings,
//!   manglik and gender cues found in prose
//! - **Field normalizers**: dates, times, heights, phone numbers and keyword
//!   cascades for categorical fields
//!
//! # Example
//!
//! ```
//! use biodata_text_processing::parse_biodata;
//!
//! let result = parse_biodata("Name: Priya Sharma\nDOB: 15/08/1995\nHeight: 5 ft 4 in");
//! assert_eq!(result.parsed.dob.as_deref(), Some("1995-08-15"));
//! assert_eq!(result.parsed.height.as_deref(), Some("5ft 4in"));
//! ```

pub mod aliases;
pub mod inline;
pub mod normalizer;
pub mod normalizers;
pub mod pairs;

mod parser;

pub use aliases::AliasTable;
pub use pairs::LabeledPair;
pub use parser::{parse_biodata, BiodataParser};

// Re-export the result types so callers need only this crate
pub use biodata_core::{Gender, Manglik, ParsedProfile, ParserConfig, Profile, ProfileField};
