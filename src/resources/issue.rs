//! `wiz_issue`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::{IdRef, NamedRef};
use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListIssues($first: Int, $after: String, $filter: IssueFilters) {
  issues(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      description
      status
      severity
      createdAt
      updatedAt
      resolvedAt
      dueAt
      rejectionExpiredAt
      statusChangedAt
      resolutionReason
      control {
        id
      }
      notes {
        id
        createdAt
        updatedAt
        text
        user {
          id
          name
        }
        serviceAccount {
          id
        }
      }
      serviceTickets {
        id
        name
        url
        externalId
        action {
          id
        }
        integration {
          id
        }
        project {
          id
          name
        }
      }
      projects {
        id
        name
      }
    }
  }
}
";

const GET_QUERY: &str = r"
query GetIssue($id: ID!) {
  issue(id: $id) {
    id
    description
    status
    severity
    createdAt
    updatedAt
    resolvedAt
    dueAt
    rejectionExpiredAt
    statusChangedAt
    resolutionReason
    control {
      id
    }
    notes {
      id
      createdAt
      updatedAt
      text
      user {
        id
        name
      }
      serviceAccount {
        id
      }
    }
    serviceTickets {
      id
      name
      url
      externalId
      action {
        id
      }
      integration {
        id
      }
      project {
        id
        name
      }
    }
    projects {
      id
      name
    }
  }
}
";

const FILTERS: &[FilterField] = &[
    FilterField::text("control_id", "sourceControl"),
    FilterField::timestamp("created_at", "createdAt"),
    FilterField::text("framework_category_id", "frameworkCategory"),
    FilterField::text("resolution_reason", "resolutionReason"),
    FilterField::text("severity", "severity"),
    FilterField::text("status", "status"),
];

/// An issue raised by a control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    pub id: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub resolved_at: Option<String>,
    pub due_at: Option<String>,
    pub rejection_expired_at: Option<String>,
    pub status_changed_at: Option<String>,
    pub resolution_reason: Option<String>,
    pub control: Option<IdRef>,
    pub notes: Vec<IssueNote>,
    pub service_tickets: Vec<ServiceTicket>,
    pub projects: Vec<NamedRef>,
}

/// A comment on an issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueNote {
    pub id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub text: Option<String>,
    pub user: Option<NamedRef>,
    pub service_account: Option<IdRef>,
}

/// A ticket opened in an external system for an issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceTicket {
    pub id: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub external_id: Option<String>,
    pub action: Option<IdRef>,
    pub integration: Option<IdRef>,
    pub project: Option<NamedRef>,
}

/// Issues
pub struct Issues;

impl Resource for Issues {
    type Record = Issue;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_issue",
        description: "Issues raised when a control matches a resource.",
        list_query: LIST_QUERY,
        list_root: "issues",
        get_query: Some(GET_QUERY),
        get_root: Some("issue"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
