//! Application services and ports.

#![forbid(unsafe_code)]

mod compliance_service;
mod rule_parameters;

pub use compliance_service::{ComplianceService, ROLE_PAGE_MAX_ITEMS, RoleDirectory, RolePage};
pub use rule_parameters::{
    DAYS_BEFORE_UNUSED_PARAMETER, DEFAULT_DAYS_BEFORE_UNUSED, ValidRuleParameters,
};
