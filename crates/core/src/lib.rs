//! Shared primitives for all Rolewatch crates.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Rolewatch crates.
pub type RuleResult<T> = Result<T, RuleError>;

/// A validated 12-digit AWS account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a validated account identifier.
    ///
    /// Accepts surrounding whitespace but requires exactly 12 ASCII digits.
    pub fn new(value: impl Into<String>) -> RuleResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.len() != 12 || !trimmed.chars().all(|character| character.is_ascii_digit()) {
            return Err(RuleError::Configuration(format!(
                "account id '{value}' must be exactly 12 digits"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying account id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for AccountId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Error categories surfaced by the rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Rule configuration was rejected during parameter validation.
    ///
    /// The payload is the complete rejection message; the host matches on
    /// the literal text, so `Display` adds no prefix.
    #[error("{0}")]
    InvalidParameters(String),

    /// The role-data source failed while paging.
    #[error("role directory error: {0}")]
    Upstream(String),

    /// Process configuration from the environment is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
