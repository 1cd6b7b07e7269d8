use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::Deserialize;
use tracing::debug;

use rolewatch_application::{RoleDirectory, RolePage};
use rolewatch_core::{RuleError, RuleResult};
use rolewatch_domain::IamRole;

/// HTTP client for the role directory API.
///
/// Wire shapes mirror the IAM listing payload: `Roles` entries carrying
/// `RoleName`, `CreateDate` and an optional `RoleLastUsed.LastUsedDate`,
/// plus a `Marker` continuation token.
#[derive(Clone)]
pub struct HttpRoleDirectory {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpRoleDirectory {
    /// Creates a directory client against the given API base URL.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl RoleDirectory for HttpRoleDirectory {
    async fn list_roles(&self, marker: Option<&str>, max_items: i32) -> RuleResult<RolePage> {
        let endpoint = format!("{}/api/roles", self.base_url);
        let mut request = self
            .client
            .get(endpoint)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token),
            )
            .query(&[("max-items", max_items.to_string())]);

        if let Some(marker) = marker {
            request = request.query(&[("marker", marker)]);
        }

        let response = request.send().await.map_err(|error| {
            RuleError::Upstream(format!("failed to call role directory: {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(RuleError::Upstream(format!(
                "role directory returned status {}: {body}",
                status.as_u16()
            )));
        }

        let page = response.json::<RoleListResponse>().await.map_err(|error| {
            RuleError::Upstream(format!(
                "failed to parse role directory response body: {error}"
            ))
        })?;

        debug!(
            role_count = page.roles.len(),
            has_marker = page.marker.is_some(),
            "fetched role directory page"
        );

        Ok(RolePage {
            roles: page
                .roles
                .into_iter()
                .map(RoleResponse::into_role)
                .collect(),
            marker: page.marker,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RoleListResponse {
    roles: Vec<RoleResponse>,
    marker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RoleResponse {
    role_name: String,
    create_date: DateTime<Utc>,
    role_last_used: Option<RoleLastUsedResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RoleLastUsedResponse {
    last_used_date: Option<DateTime<Utc>>,
}

impl RoleResponse {
    fn into_role(self) -> IamRole {
        IamRole {
            role_name: self.role_name,
            create_date: self.create_date,
            last_used: self
                .role_last_used
                .and_then(|last_used| last_used.last_used_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RoleListResponse, RoleResponse};

    fn parse(body: &str) -> RoleListResponse {
        serde_json::from_str(body).unwrap_or_else(|_| panic!("valid test payload"))
    }

    #[test]
    fn listing_payload_maps_to_domain_roles() {
        let page = parse(
            r#"{
                "Roles": [
                    {
                        "RoleName": "config-rule",
                        "CreateDate": "2024-01-01T00:00:00Z",
                        "RoleLastUsed": {"LastUsedDate": "2024-05-01T12:00:00Z"}
                    }
                ],
                "Marker": "next-page"
            }"#,
        );

        assert_eq!(page.marker.as_deref(), Some("next-page"));

        let roles: Vec<_> = page.roles.into_iter().map(RoleResponse::into_role).collect();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].role_name, "config-rule");
        assert!(roles[0].last_used.is_some());
    }

    #[test]
    fn last_used_without_date_means_never_used() {
        let page = parse(
            r#"{
                "Roles": [
                    {
                        "RoleName": "idle-role",
                        "CreateDate": "2024-01-01T00:00:00Z",
                        "RoleLastUsed": {}
                    }
                ]
            }"#,
        );

        let roles: Vec<_> = page.roles.into_iter().map(RoleResponse::into_role).collect();
        assert!(roles[0].last_used.is_none());
        assert!(page.marker.is_none());
    }

    #[test]
    fn missing_last_used_block_means_never_used() {
        let page = parse(
            r#"{
                "Roles": [
                    {"RoleName": "new-role", "CreateDate": "2024-01-01T00:00:00Z"}
                ]
            }"#,
        );

        let roles: Vec<_> = page.roles.into_iter().map(RoleResponse::into_role).collect();
        assert!(roles[0].last_used.is_none());
    }
}
