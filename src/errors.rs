use rust_decimal::Decimal;
use thiserror::Error;

use crate::records::RecordId;

/// Rejected user input. Each variant names the field that failed, and no
/// failed validation leaves a partially applied mutation behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("`{0}` is not a number")]
    AmountNotNumeric(String),
    #[error("amount must be greater than zero, got {0}")]
    AmountNotPositive(Decimal),
    #[error("category must not be empty")]
    EmptyCategory,
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "description",
            Self::AmountNotNumeric(_) | Self::AmountNotPositive(_) => "amount",
            Self::EmptyCategory => "category",
        }
    }
}

#[derive(Debug, Error)]
pub enum SpendlogError {
    #[error("invalid {field}: {0}", field = .0.field())]
    Validation(#[from] ValidationError),
    #[error("no record with id {0}")]
    NotFound(RecordId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("compression error: {0}")]
    Compression(#[from] lz4_flex::frame::Error),
    #[error("serialization error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("deserialization error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}
