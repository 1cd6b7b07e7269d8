//! Compliance evaluation over the role directory.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use rolewatch_core::RuleResult;
use rolewatch_domain::{Evaluation, IamRole};

use crate::rule_parameters::ValidRuleParameters;

mod ports;

pub use ports::{RoleDirectory, RolePage};

/// Upper bound on roles fetched per directory page.
pub const ROLE_PAGE_MAX_ITEMS: i32 = 100;

/// Courtesy pause between successive directory pages.
const ROLE_PAGE_DELAY: Duration = Duration::from_millis(100);

/// Application service classifying every role against the staleness window.
#[derive(Clone)]
pub struct ComplianceService {
    directory: Arc<dyn RoleDirectory>,
    page_size: i32,
    page_delay: Duration,
}

impl ComplianceService {
    /// Creates a service with the default paging policy.
    #[must_use]
    pub fn new(directory: Arc<dyn RoleDirectory>) -> Self {
        Self::with_paging(directory, ROLE_PAGE_MAX_ITEMS, ROLE_PAGE_DELAY)
    }

    /// Creates a service with an explicit page size and inter-page delay.
    #[must_use]
    pub fn with_paging(
        directory: Arc<dyn RoleDirectory>,
        page_size: i32,
        page_delay: Duration,
    ) -> Self {
        Self {
            directory,
            page_size,
            page_delay,
        }
    }

    /// Classifies every role in the directory against `now`.
    ///
    /// `now` must be sampled exactly once per run by the caller and is
    /// reused for every role, so the whole run is judged against a single
    /// instant even when paging through a large, slow directory.
    ///
    /// Pages are consumed incrementally; the full role set is never required
    /// up front. The first directory failure aborts the run and propagates
    /// unchanged, so the caller either receives one finding per role or none
    /// at all.
    pub async fn evaluate(
        &self,
        parameters: &ValidRuleParameters,
        now: DateTime<Utc>,
    ) -> RuleResult<Vec<Evaluation>> {
        let mut evaluations = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .directory
                .list_roles(marker.as_deref(), self.page_size)
                .await?;

            for role in &page.roles {
                evaluations.push(classify(role, parameters, now));
            }

            match page.marker {
                Some(next_marker) => {
                    marker = Some(next_marker);
                    // Courtesy pacing toward the upstream rate limit.
                    tokio::time::sleep(self.page_delay).await;
                }
                None => break,
            }
        }

        Ok(evaluations)
    }
}

/// Classifies a single role against the configured staleness window.
///
/// The boundary is inclusive: a role whose whole-day age equals the window
/// is still compliant.
fn classify(role: &IamRole, parameters: &ValidRuleParameters, now: DateTime<Utc>) -> Evaluation {
    let age_in_days = role.days_since_last_activity(now);

    if age_in_days <= parameters.days_before_unused() {
        Evaluation::compliant(role.role_name.clone())
    } else {
        Evaluation::non_compliant(
            role.role_name.clone(),
            format!(
                "This AWS IAM Role has not been used within the last {} day(s)",
                parameters.days_before_unused()
            ),
        )
    }
}
