//! `wiz_user`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::IdRef;
use super::descriptor::{Resource, ResourceDescriptor};
use super::user_role::UserRole;
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListUsers($first: Int, $after: String, $filter: UserFilters) {
  users(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      email
      createdAt
      lastLoginAt
      isSuspended
      isAnalyticsEnabled
      identityProviderType
      role {
        id
        name
        description
        scopes
        isProjectScoped
      }
      tenant {
        id
      }
      effectiveAssignedProjects {
        id
      }
      ipAddress
    }
  }
}
";

const GET_QUERY: &str = r"
query GetUser($id: ID!) {
  user(id: $id) {
    id
    name
    email
    createdAt
    lastLoginAt
    isSuspended
    isAnalyticsEnabled
    identityProviderType
    role {
      id
      name
      description
      scopes
      isProjectScoped
    }
    tenant {
      id
    }
    effectiveAssignedProjects {
      id
    }
    ipAddress
  }
}
";

const FILTERS: &[FilterField] = &[FilterField::text(
    "identity_provider_type",
    "authProviderType",
)];

/// A portal user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub last_login_at: Option<String>,
    pub is_suspended: bool,
    pub is_analytics_enabled: bool,
    pub identity_provider_type: Option<String>,
    pub role: Option<UserRole>,
    pub tenant: Option<IdRef>,
    pub effective_assigned_projects: Vec<IdRef>,
    pub ip_address: Option<String>,
}

/// Portal users
pub struct Users;

impl Resource for Users {
    type Record = User;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_user",
        description: "Users with access to the portal.",
        list_query: LIST_QUERY,
        list_root: "users",
        get_query: Some(GET_QUERY),
        get_root: Some("user"),
        max_page_size: 60,
        filters: FILTERS,
    };
}
