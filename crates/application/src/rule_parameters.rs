//! Rule parameter validation.

use std::collections::HashMap;

use rolewatch_core::{RuleError, RuleResult};

/// Name of the only recognized rule parameter.
pub const DAYS_BEFORE_UNUSED_PARAMETER: &str = "DaysBeforeUnused";

/// Staleness window applied when the parameter is not supplied.
pub const DEFAULT_DAYS_BEFORE_UNUSED: i64 = 90;

/// Validated rule configuration.
///
/// Constructed once per evaluation run from the raw string parameter map
/// supplied by the host; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRuleParameters {
    days_before_unused: i64,
}

impl ValidRuleParameters {
    /// Validates the raw parameter map supplied by the host.
    ///
    /// A missing or empty `DaysBeforeUnused` value falls back to the default
    /// of 90 days. An explicit `"0"` is a meaningful window, not absence:
    /// the role must have been used within the last 24 hours.
    pub fn from_raw(raw: &HashMap<String, String>) -> RuleResult<Self> {
        let supplied = raw
            .get(DAYS_BEFORE_UNUSED_PARAMETER)
            .map(String::as_str)
            .filter(|value| !value.is_empty());

        let days_before_unused = match supplied {
            None => DEFAULT_DAYS_BEFORE_UNUSED,
            Some(value) => value.trim().parse::<i64>().map_err(|_| {
                RuleError::InvalidParameters(
                    "The parameter \"DaysBeforeUnused\" must be a integer".to_owned(),
                )
            })?,
        };

        if days_before_unused < 0 {
            return Err(RuleError::InvalidParameters(
                "The parameter \"DaysBeforeUnused\" must be greater than or equal to 0".to_owned(),
            ));
        }

        Ok(Self { days_before_unused })
    }

    /// Returns the configured staleness window in days.
    #[must_use]
    pub fn days_before_unused(&self) -> i64 {
        self.days_before_unused
    }
}
