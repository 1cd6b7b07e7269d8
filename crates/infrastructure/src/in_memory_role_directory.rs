use async_trait::async_trait;
use tokio::sync::RwLock;

use rolewatch_application::{RoleDirectory, RolePage};
use rolewatch_core::RuleResult;
use rolewatch_domain::IamRole;

/// In-memory role directory implementation.
///
/// Pages through its seeded roles with numeric offset markers. For tests
/// and local development.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    roles: RwLock<Vec<IamRole>>,
}

impl InMemoryRoleDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(Vec::new()),
        }
    }

    /// Creates a directory seeded with the given roles.
    #[must_use]
    pub fn with_roles(roles: Vec<IamRole>) -> Self {
        Self {
            roles: RwLock::new(roles),
        }
    }

    /// Adds a role to the directory.
    pub async fn insert(&self, role: IamRole) {
        self.roles.write().await.push(role);
    }
}

#[async_trait]
impl RoleDirectory for InMemoryRoleDirectory {
    async fn list_roles(&self, marker: Option<&str>, max_items: i32) -> RuleResult<RolePage> {
        let roles = self.roles.read().await;

        let offset = marker
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(0);
        let limit = usize::try_from(max_items.max(1)).unwrap_or(1);

        let page: Vec<IamRole> = roles.iter().skip(offset).take(limit).cloned().collect();
        let next_offset = offset + page.len();
        let marker = (next_offset < roles.len()).then(|| next_offset.to_string());

        Ok(RolePage {
            roles: page,
            marker,
        })
    }
}
