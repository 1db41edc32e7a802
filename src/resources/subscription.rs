//! `wiz_subscription`
//!
//! The API calls these cloud accounts.

#![allow(missing_docs)]

use super::common::IdRef;
use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListSubscriptions($first: Int, $after: String, $filter: CloudAccountFilters) {
  cloudAccounts(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      cloudProvider
      status
      resourceCount
      containerCount
      virtualMachineCount
      externalId
      lastScannedAt
      linkedProjects {
        id
      }
    }
  }
}
";

const GET_QUERY: &str = r"
query GetSubscription($id: ID!) {
  cloudAccount(id: $id) {
    id
    name
    cloudProvider
    status
    resourceCount
    containerCount
    virtualMachineCount
    externalId
    lastScannedAt
    linkedProjects {
      id
    }
  }
}
";

const FILTERS: &[FilterField] = &[
    FilterField::text("cloud_provider", "cloudProvider"),
    FilterField::text("status", "status"),
];

/// A connected cloud account or subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    pub id: String,
    pub name: Option<String>,
    pub cloud_provider: Option<String>,
    pub status: Option<String>,
    pub resource_count: i64,
    pub container_count: i64,
    pub virtual_machine_count: i64,
    pub external_id: Option<String>,
    pub last_scanned_at: Option<String>,
    pub linked_projects: Vec<IdRef>,
}

/// Cloud subscriptions
pub struct Subscriptions;

impl Resource for Subscriptions {
    type Record = Subscription;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_subscription",
        description: "Cloud accounts and subscriptions connected for scanning.",
        list_query: LIST_QUERY,
        list_root: "cloudAccounts",
        get_query: Some(GET_QUERY),
        get_root: Some("cloudAccount"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
