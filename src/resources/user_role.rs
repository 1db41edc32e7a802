//! `wiz_user_role`

use super::descriptor::{Resource, ResourceDescriptor};
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListUserRoles($first: Int, $after: String) {
  userRoles(first: $first, after: $after) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      description
      scopes
      isProjectScoped
    }
  }
}
";

/// A role that can be assigned to users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRole {
    /// Role id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// What the role is for
    pub description: Option<String>,
    /// Permission scopes granted
    pub scopes: Vec<String>,
    /// Whether the role applies per project
    pub is_project_scoped: bool,
}

/// User roles; the API has no get-by-id for these
pub struct UserRoles;

impl Resource for UserRoles {
    type Record = UserRole;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_user_role",
        description: "Roles assignable to portal users.",
        list_query: LIST_QUERY,
        list_root: "userRoles",
        get_query: None,
        get_root: None,
        max_page_size: 100,
        filters: &[],
    };
}
