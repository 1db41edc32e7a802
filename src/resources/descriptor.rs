//! Resource descriptors and the catalogue of resource kinds

use super::{
    CloudConfigRules, ConfigurationFindings, Controls, Issues, Projects, SecurityCategories,
    SecurityFrameworks, ServiceAccounts, Subscriptions, UserRoles, Users,
};
use crate::error::{Error, Result};
use crate::filter::FilterField;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;

/// Prefix shared by every host-facing resource name
pub const NAME_PREFIX: &str = "wiz_";

/// Static metadata for one queryable entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Host-facing name, e.g. `wiz_issue`
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// List document; takes `$first`, `$after` and, when `filters` is non-empty, `$filter`
    pub list_query: &'static str,
    /// Root field of the list response holding the connection
    pub list_root: &'static str,
    /// Get-by-id document taking `$id`, if the API has one
    pub get_query: Option<&'static str>,
    /// Root field of the get response
    pub get_root: Option<&'static str>,
    /// Largest page the API serves for this resource
    pub max_page_size: u32,
    /// Filterable columns
    pub filters: &'static [FilterField],
}

impl ResourceDescriptor {
    /// Whether get-by-id is available
    pub fn supports_get(&self) -> bool {
        self.get_query.is_some() && self.get_root.is_some()
    }

    /// Whether list calls carry a `$filter` variable
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }
}

/// A resource type with a statically known record shape
pub trait Resource: Send + Sync + 'static {
    /// Decoded record
    type Record: DeserializeOwned + Serialize + Send + Sync + 'static;

    /// Query text, page ceiling, and filterable fields
    const DESCRIPTOR: ResourceDescriptor;
}

/// Every resource the connector exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `wiz_project`
    Project,
    /// `wiz_cloud_configuration_finding`
    ConfigurationFinding,
    /// `wiz_control`
    Control,
    /// `wiz_issue`
    Issue,
    /// `wiz_user`
    User,
    /// `wiz_service_account`
    ServiceAccount,
    /// `wiz_subscription`
    Subscription,
    /// `wiz_security_framework`
    SecurityFramework,
    /// `wiz_security_category`
    SecurityCategory,
    /// `wiz_cloud_config_rule`
    CloudConfigRule,
    /// `wiz_user_role`
    UserRole,
}

impl ResourceKind {
    /// All kinds in catalogue order
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Project,
        ResourceKind::ConfigurationFinding,
        ResourceKind::Control,
        ResourceKind::Issue,
        ResourceKind::User,
        ResourceKind::ServiceAccount,
        ResourceKind::Subscription,
        ResourceKind::SecurityFramework,
        ResourceKind::SecurityCategory,
        ResourceKind::CloudConfigRule,
        ResourceKind::UserRole,
    ];

    /// Descriptor for this kind
    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        match self {
            ResourceKind::Project => &Projects::DESCRIPTOR,
            ResourceKind::ConfigurationFinding => &ConfigurationFindings::DESCRIPTOR,
            ResourceKind::Control => &Controls::DESCRIPTOR,
            ResourceKind::Issue => &Issues::DESCRIPTOR,
            ResourceKind::User => &Users::DESCRIPTOR,
            ResourceKind::ServiceAccount => &ServiceAccounts::DESCRIPTOR,
            ResourceKind::Subscription => &Subscriptions::DESCRIPTOR,
            ResourceKind::SecurityFramework => &SecurityFrameworks::DESCRIPTOR,
            ResourceKind::SecurityCategory => &SecurityCategories::DESCRIPTOR,
            ResourceKind::CloudConfigRule => &CloudConfigRules::DESCRIPTOR,
            ResourceKind::UserRole => &UserRoles::DESCRIPTOR,
        }
    }

    /// Host-facing name
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    /// Accepts `wiz_issue` as well as `issue`
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix(NAME_PREFIX).unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().strip_prefix(NAME_PREFIX) == Some(wanted))
            .ok_or_else(|| Error::invalid_value("resource", format!("unknown resource '{s}'")))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
