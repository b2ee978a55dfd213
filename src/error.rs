use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UconfError {
    #[error("Option '{0}' is already registered")]
    DuplicateOption(String),

    #[error("Invalid option name '{0}': names must be non-empty, contain no '=' and not start with '-'")]
    InvalidName(String),

    #[error("Unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("Flag '{0}' requires a value")]
    MissingValue(String),

    #[error("Invalid value for '{key}': {reason}")]
    Conversion { key: String, reason: String },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}
