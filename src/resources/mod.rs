//! Resource catalogue
//!
//! One module per queryable entity. Each declares its GraphQL documents,
//! its record shape, its page-size ceiling and the columns that can be
//! pushed down as filters, bundled as a [`ResourceDescriptor`] on a unit
//! type implementing [`Resource`].

mod cloud_config_rule;
mod common;
mod configuration_finding;
mod control;
mod descriptor;
mod issue;
mod project;
mod security_category;
mod security_framework;
mod service_account;
mod subscription;
mod user;
mod user_role;

pub use cloud_config_rule::{CloudConfigRule, CloudConfigRules};
pub use common::{IdRef, NamedRef, Tag};
pub use configuration_finding::{
    ConfigurationFinding, ConfigurationFindings, FindingNote, FindingResource,
};
pub use control::{Control, Controls};
pub use descriptor::{Resource, ResourceDescriptor, ResourceKind, NAME_PREFIX};
pub use issue::{Issue, IssueNote, Issues, ServiceTicket};
pub use project::{Project, Projects, ResourceTagLink, RiskProfile};
pub use security_category::{SecurityCategories, SecurityCategory};
pub use security_framework::{
    FrameworkCategory, FrameworkSubCategory, SecurityFramework, SecurityFrameworks,
};
pub use service_account::{ServiceAccount, ServiceAccounts};
pub use subscription::{Subscription, Subscriptions};
pub use user::{User, Users};
pub use user_role::{UserRole, UserRoles};

#[cfg(test)]
mod tests;
