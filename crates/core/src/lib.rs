//! Core types for the biodata parser
//!
//! This crate provides the foundational types shared by every other crate:
//! - The `Profile` record the parser fills in, and the `ProfileField` keys
//! - Enum-valued fields (`Gender`, `Manglik`)
//! - The `ParsedProfile` result (record plus matched-field bookkeeping)
//! - Parser configuration (`ParserConfig`)
//! - Error types

pub mod error;
pub mod parser_config;
pub mod profile;

pub use error::{Error, Result};
pub use parser_config::ParserConfig;
pub use profile::{Gender, Manglik, ParsedProfile, Profile, ProfileField};
