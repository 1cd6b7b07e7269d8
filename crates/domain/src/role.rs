//! IAM role records and staleness arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single IAM role as reported by the role directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamRole {
    /// Role name, unique within the account.
    pub role_name: String,
    /// When the role was created. Always present.
    pub create_date: DateTime<Utc>,
    /// When the role was last used for an assumed session, if ever.
    pub last_used: Option<DateTime<Utc>>,
}

impl IamRole {
    /// Creates a role record that has never been used since creation.
    #[must_use]
    pub fn new(role_name: impl Into<String>, create_date: DateTime<Utc>) -> Self {
        Self {
            role_name: role_name.into(),
            create_date,
            last_used: None,
        }
    }

    /// Sets the last-used instant on this record.
    #[must_use]
    pub fn with_last_used(mut self, last_used: DateTime<Utc>) -> Self {
        self.last_used = Some(last_used);
        self
    }

    /// Returns the instant the role was last exercised: the last-used
    /// timestamp when present, otherwise the creation timestamp.
    #[must_use]
    pub fn last_activity_at(&self) -> DateTime<Utc> {
        self.last_used.unwrap_or(self.create_date)
    }

    /// Returns the whole number of days elapsed between the last activity
    /// and `now`. Fractional days truncate downward, so a role exercised
    /// 23 hours ago has an age of zero days.
    #[must_use]
    pub fn days_since_last_activity(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_activity_at()).num_days()
    }
}
