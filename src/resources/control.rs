//! `wiz_control`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::IdRef;
use super::descriptor::{Resource, ResourceDescriptor};
use crate::filter::FilterField;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListControls($first: Int, $after: String, $filter: ControlFilters) {
  controls(first: $first, after: $after, filterBy: $filter) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      description
      type
      query
      severity
      enabled
      enabledForLBI
      enabledForMBI
      enabledForHBI
      enabledForUnattributed
      resolutionRecommendation
      createdBy {
        id
      }
      createdAt
      tags
      scopeProject {
        id
      }
      supportsNRT
      hasAutoRemediation
      sourceCloudConfigurationRule {
        id
      }
      lastRunAt
      lastRunError
      lastSuccessfulRunAt
      resolutionRecommendationPlainText
    }
  }
}
";

const GET_QUERY: &str = r"
query GetControl($id: ID!) {
  control(id: $id) {
    id
    name
    description
    type
    query
    severity
    enabled
    enabledForLBI
    enabledForMBI
    enabledForHBI
    enabledForUnattributed
    resolutionRecommendation
    createdBy {
      id
    }
    createdAt
    tags
    scopeProject {
      id
    }
    supportsNRT
    hasAutoRemediation
    sourceCloudConfigurationRule {
      id
    }
    lastRunAt
    lastRunError
    lastSuccessfulRunAt
    resolutionRecommendationPlainText
  }
}
";

const FILTERS: &[FilterField] = &[
    FilterField::flag("enabled", "enabled"),
    FilterField::flag("has_auto_remediation", "hasAutoRemediation"),
    FilterField::text("framework_category_id", "frameworkCategory"),
    FilterField::text("project_id", "project"),
    FilterField::text("severity", "severity"),
    FilterField::text("type", "type"),
];

/// A security control
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Control {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Graph query document; free-form JSON
    pub query: Option<JsonValue>,
    pub severity: Option<String>,
    pub enabled: bool,
    #[serde(rename = "enabledForLBI")]
    pub enabled_for_lbi: bool,
    #[serde(rename = "enabledForMBI")]
    pub enabled_for_mbi: bool,
    #[serde(rename = "enabledForHBI")]
    pub enabled_for_hbi: bool,
    pub enabled_for_unattributed: bool,
    pub resolution_recommendation: Option<String>,
    pub created_by: Option<IdRef>,
    pub created_at: Option<String>,
    pub tags: Vec<String>,
    pub scope_project: Option<IdRef>,
    #[serde(rename = "supportsNRT")]
    pub supports_nrt: bool,
    pub has_auto_remediation: bool,
    pub source_cloud_configuration_rule: Option<IdRef>,
    pub last_run_at: Option<String>,
    pub last_run_error: Option<String>,
    pub last_successful_run_at: Option<String>,
    pub resolution_recommendation_plain_text: Option<String>,
}

/// Security controls
pub struct Controls;

impl Resource for Controls {
    type Record = Control;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_control",
        description: "Controls that raise issues when their graph query matches.",
        list_query: LIST_QUERY,
        list_root: "controls",
        get_query: Some(GET_QUERY),
        get_root: Some("control"),
        max_page_size: 500,
        filters: FILTERS,
    };
}
