//! `wiz_service_account`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::IdRef;
use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListServiceAccounts($first: Int, $after: String, $filter: ServiceAccountFilters) {
  serviceAccounts(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      type
      createdAt
      lastRotatedAt
      clientId
      scopes
      assignedProjects {
        id
      }
      authenticationSource
    }
  }
}
";

const GET_QUERY: &str = r"
query GetServiceAccount($id: ID!) {
  serviceAccount(id: $id) {
    id
    name
    type
    createdAt
    lastRotatedAt
    clientId
    scopes
    assignedProjects {
      id
    }
    authenticationSource
  }
}
";

const FILTERS: &[FilterField] = &[
    FilterField::text("authentication_source", "source"),
    FilterField::text("name", "name"),
    FilterField::text("type", "type"),
];

/// An API service account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceAccount {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub created_at: Option<String>,
    pub last_rotated_at: Option<String>,
    pub client_id: Option<String>,
    pub scopes: Vec<String>,
    pub assigned_projects: Vec<IdRef>,
    pub authentication_source: Option<String>,
}

/// Service accounts
pub struct ServiceAccounts;

impl Resource for ServiceAccounts {
    type Record = ServiceAccount;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_service_account",
        description: "Service accounts used for API and sensor access.",
        list_query: LIST_QUERY,
        list_root: "serviceAccounts",
        get_query: Some(GET_QUERY),
        get_root: Some("serviceAccount"),
        max_page_size: 60,
        filters: FILTERS,
    };
}
