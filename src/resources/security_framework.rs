//! `wiz_security_framework`

use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListSecurityFrameworks($first: Int, $after: String, $filter: SecurityFrameworkFilters) {
  securityFrameworks(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      enabled
      builtin
      description
      policyTypes
      categories {
        id
        name
        description
        subCategories {
          id
          title
          description
          resolutionRecommendation
        }
      }
    }
  }
}
";

const GET_QUERY: &str = r"
query GetSecurityFramework($id: ID!) {
  securityFramework(id: $id) {
    id
    name
    enabled
    builtin
    description
    policyTypes
    categories {
      id
      name
      description
      subCategories {
        id
        title
        description
        resolutionRecommendation
      }
    }
  }
}
";

const FILTERS: &[FilterField] = &[FilterField::flag("enabled", "enabled")];

/// A compliance framework
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityFramework {
    /// Framework id
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the framework is assessed
    pub enabled: bool,
    /// Shipped with the platform rather than user defined
    #[serde(rename = "builtin")]
    pub built_in: bool,
    /// Free-text description
    pub description: Option<String>,
    /// Policy types the framework covers
    pub policy_types: Vec<String>,
    /// Top-level categories
    pub categories: Vec<FrameworkCategory>,
}

/// A category within a framework
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameworkCategory {
    /// Category id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Nested sub-categories
    pub sub_categories: Vec<FrameworkSubCategory>,
}

/// A leaf of the framework tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameworkSubCategory {
    /// Sub-category id
    pub id: String,
    /// Short title
    pub title: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Suggested fix
    pub resolution_recommendation: Option<String>,
}

/// Security frameworks
pub struct SecurityFrameworks;

impl Resource for SecurityFrameworks {
    type Record = SecurityFramework;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_security_framework",
        description: "Compliance frameworks with their categories and sub-categories.",
        list_query: LIST_QUERY,
        list_root: "securityFrameworks",
        get_query: Some(GET_QUERY),
        get_root: Some("securityFramework"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
