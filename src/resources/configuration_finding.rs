//! `wiz_cloud_configuration_finding`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::{IdRef, Tag};
use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListConfigurationFindings($first: Int, $after: String, $filter: ConfigurationFindingFilters) {
  configurationFindings(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      result
      resource {
        name
        id
        type
        status
        region
        cloudPlatform
        nativeType
        projects {
          id
        }
        tags {
          key
          value
        }
      }
      rule {
        id
      }
      severity
      subscription {
        id
      }
      remediation
      analyzedAt
      status
      resolutionReason
      note {
        text
      }
    }
  }
}
";

const GET_QUERY: &str = r"
query GetConfigurationFinding($id: ID!) {
  configurationFinding(id: $id) {
    id
    result
    resource {
      name
      id
      type
      status
      region
      cloudPlatform
      nativeType
      projects {
        id
      }
      tags {
        key
        value
      }
    }
    rule {
      id
    }
    severity
    subscription {
      id
    }
    remediation
    analyzedAt
    status
    resolutionReason
    note {
      text
    }
  }
}
";

const FILTERS: &[FilterField] = &[
    FilterField::text("result", "result"),
    FilterField::text("severity", "severity"),
    FilterField::text("status", "status"),
    FilterField::text("rule_id", "rule"),
    FilterField::timestamp("analyzed_at", "analyzedAt"),
];

/// Result of evaluating a cloud configuration rule against one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationFinding {
    pub id: String,
    pub result: Option<String>,
    pub resource: Option<FindingResource>,
    pub rule: Option<IdRef>,
    pub severity: Option<String>,
    pub subscription: Option<IdRef>,
    pub remediation: Option<String>,
    pub analyzed_at: Option<String>,
    pub status: Option<String>,
    pub resolution_reason: Option<String>,
    pub note: Option<FindingNote>,
}

/// The cloud resource a finding was raised on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingResource {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub cloud_platform: Option<String>,
    pub native_type: Option<String>,
    pub projects: Vec<IdRef>,
    pub tags: Vec<Tag>,
}

/// Free-text note attached to a finding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindingNote {
    pub text: Option<String>,
}

/// Cloud configuration findings
pub struct ConfigurationFindings;

impl Resource for ConfigurationFindings {
    type Record = ConfigurationFinding;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_cloud_configuration_finding",
        description: "Findings produced by cloud configuration rules.",
        list_query: LIST_QUERY,
        list_root: "configurationFindings",
        get_query: Some(GET_QUERY),
        get_root: Some("configurationFinding"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
