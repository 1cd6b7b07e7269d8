use async_trait::async_trait;

use rolewatch_core::RuleResult;
use rolewatch_domain::IamRole;

/// Directory port producing the account's roles one page at a time.
///
/// The sequence is finite and restartable per run; a fresh run starts again
/// from a `None` marker.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Fetches one page of roles.
    ///
    /// `marker` is the continuation token returned by the previous page, or
    /// `None` for the first page. Implementations must bound the page to at
    /// most `max_items` roles.
    async fn list_roles(&self, marker: Option<&str>, max_items: i32) -> RuleResult<RolePage>;
}

/// One page of roles from the directory.
#[derive(Debug, Clone)]
pub struct RolePage {
    /// Roles in this page.
    pub roles: Vec<IamRole>,
    /// Continuation token; `Some` when more pages follow.
    pub marker: Option<String>,
}
