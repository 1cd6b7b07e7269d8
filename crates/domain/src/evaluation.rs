//! Compliance classification results.

use serde::{Deserialize, Serialize};

/// Resource type discriminator stamped on every role evaluation.
pub const IAM_ROLE_RESOURCE_TYPE: &str = "AWS::IAM::Role";

/// Compliance classification for a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceType {
    /// The resource satisfies the rule.
    Compliant,
    /// The resource violates the rule.
    NonCompliant,
}

impl ComplianceType {
    /// Returns the stable wire value for this classification.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON_COMPLIANT",
        }
    }
}

/// One compliance finding for a single role.
///
/// Findings are created fresh for every evaluation run and handed to the
/// reporting collaborator; nothing is persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Classification outcome.
    pub compliance_type: ComplianceType,
    /// Identifier of the evaluated resource (the role name).
    pub resource_id: String,
    /// Resource type discriminator; always [`IAM_ROLE_RESOURCE_TYPE`].
    pub resource_type: String,
    /// Human-readable context, present only on non-compliant findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Evaluation {
    /// Creates a compliant finding with no annotation.
    #[must_use]
    pub fn compliant(resource_id: impl Into<String>) -> Self {
        Self {
            compliance_type: ComplianceType::Compliant,
            resource_id: resource_id.into(),
            resource_type: IAM_ROLE_RESOURCE_TYPE.to_owned(),
            annotation: None,
        }
    }

    /// Creates a non-compliant finding carrying an annotation.
    #[must_use]
    pub fn non_compliant(resource_id: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            compliance_type: ComplianceType::NonCompliant,
            resource_id: resource_id.into(),
            resource_type: IAM_ROLE_RESOURCE_TYPE.to_owned(),
            annotation: Some(annotation.into()),
        }
    }
}
