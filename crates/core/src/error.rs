//! Error types shared across the biodata crates

use thiserror::Error;

/// Errors raised at the edges of the parser (configuration and output).
///
/// Parsing itself never fails; a field that cannot be extracted is simply
/// left unset on the resulting profile.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
