use thiserror::Error;

use crate::sequence::SequenceDiagnostic;

#[derive(Debug, Error)]
pub enum GusError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid sequence: {}", summarize(.errors))]
    InvalidSequence { errors: Vec<SequenceDiagnostic> },

    #[error("The sequence is empty")]
    EmptySequence,
}

fn summarize(errors: &[SequenceDiagnostic]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type GusResult<T> = Result<T, GusError>;
