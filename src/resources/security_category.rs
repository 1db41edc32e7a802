//! `wiz_security_category`

use super::common::IdRef;
use super::descriptor::{Resource, ResourceDescriptor};
use super::security_framework::FrameworkSubCategory;
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListSecurityCategories($first: Int, $after: String, $filter: SecurityCategoryFilters) {
  securityCategories(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      description
      framework {
        id
      }
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

const GET_QUERY: &str = r"
query GetSecurityCategory($id: ID!) {
  securityCategory(id: $id) {
    id
    name
    description
    framework {
      id
    }
    subCategories {
      id
      title
      description
      resolutionRecommendation
    }
  }
}
";

const FILTERS: &[FilterField] = &[FilterField::text("framework_id", "frameworkId")];

/// A category of a security framework, listed on its own
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityCategory {
    /// Category id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Framework the category belongs to
    pub framework: Option<IdRef>,
    /// Nested sub-categories
    pub sub_categories: Vec<FrameworkSubCategory>,
}

impl SecurityCategory {
    /// Id of the owning framework, if the server returned one
    pub fn framework_id(&self) -> Option<&str> {
        self.framework.as_ref().map(|f| f.id.as_str())
    }
}

/// Security categories
pub struct SecurityCategories;

impl Resource for SecurityCategories {
    type Record = SecurityCategory;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_security_category",
        description: "Security framework categories with their sub-categories.",
        list_query: LIST_QUERY,
        list_root: "securityCategories",
        get_query: Some(GET_QUERY),
        get_root: Some("securityCategory"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
