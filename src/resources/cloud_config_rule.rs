//! `wiz_cloud_config_rule`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::{one_or_many, IdRef};
use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListConfigRules($first: Int, $after: String, $filter: CloudConfigurationRuleFilters) {
  cloudConfigurationRules(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      shortId
      enabled
      severity
      description
      supportsNRT
      cloudProvider
      serviceType
      builtin
      functionAsControl
      hasAutoRemediation
      remediationInstructions
      createdBy {
        id
      }
      createdAt
      updatedAt
      targetNativeTypes
      scopeAccounts {
        id
      }
      control {
        id
      }
    }
  }
}
";

const GET_QUERY: &str = r"
query GetCloudConfigRule($id: ID!) {
  cloudConfigurationRule(id: $id) {
    id
    name
    shortId
    enabled
    severity
    description
    supportsNRT
    cloudProvider
    serviceType
    builtin
    functionAsControl
    hasAutoRemediation
    remediationInstructions
    createdBy {
      id
    }
    createdAt
    updatedAt
    targetNativeTypes
    scopeAccounts {
      id
    }
    control {
      id
    }
  }
}
";

const FILTERS: &[FilterField] = &[
    FilterField::text("cloud_provider", "cloudProvider"),
    FilterField::flag("enabled", "enabled"),
    FilterField::flag("has_auto_remediation", "hasAutoRemediation"),
    FilterField::text("service_type", "serviceType"),
    FilterField::text("severity", "severity"),
    FilterField::flag("supports_nrt", "supportsNRT"),
];

/// A cloud configuration (posture) rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudConfigRule {
    pub id: String,
    pub name: String,
    pub short_id: Option<String>,
    pub enabled: bool,
    pub severity: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "supportsNRT")]
    pub supports_nrt: bool,
    pub cloud_provider: Option<String>,
    pub service_type: Option<String>,
    #[serde(rename = "builtin")]
    pub built_in: bool,
    pub function_as_control: bool,
    pub has_auto_remediation: bool,
    pub remediation_instructions: Option<String>,
    pub created_by: Option<IdRef>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub target_native_types: Vec<String>,
    pub scope_accounts: Vec<IdRef>,
    /// Linked controls; the API returns one object or a list
    #[serde(deserialize_with = "one_or_many")]
    pub control: Vec<IdRef>,
}

/// Cloud configuration rules
pub struct CloudConfigRules;

impl Resource for CloudConfigRules {
    type Record = CloudConfigRule;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_cloud_config_rule",
        description: "Cloud configuration rules evaluated against cloud resources.",
        list_query: LIST_QUERY,
        list_root: "cloudConfigurationRules",
        get_query: Some(GET_QUERY),
        get_root: Some("cloudConfigurationRule"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
