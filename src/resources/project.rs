//! `wiz_project`
//!
//! Record fields mirror the GraphQL schema one-to-one.

#![allow(missing_docs)]

use super::common::{IdRef, Tag};
use super::descriptor::{Resource, ResourceDescriptor};
use serde::{Deserialize, Serialize};

const LIST_QUERY: &str = r"
query ListProjects($first: Int, $after: String) {
  projects(first: $first, after: $after) {
    pageInfo {
      hasNextPage
      endCursor
    }
    totalCount
    nodes {
      id
      name
      description
      businessUnit
      archived
      slug
      securityScore
      riskProfile {
        businessImpact
      }
      profileCompletion
      repositoryCount
      cloudAccountCount
      cloudOrganizationCount
      kubernetesClusterCount
      workloadCount
      teamMemberCount
      entityCount
      technologyCount
      projectOwners {
        id
      }
      identifiers
      resourceTagLinks {
        environment
        resourceTags {
          key
          value
        }
      }
    }
  }
}
";

const GET_QUERY: &str = r"
query GetProject($id: ID!) {
  project(id: $id) {
    id
    name
    description
    businessUnit
    archived
    slug
    securityScore
    riskProfile {
      businessImpact
    }
    profileCompletion
    repositoryCount
    cloudAccountCount
    cloudOrganizationCount
    kubernetesClusterCount
    workloadCount
    teamMemberCount
    entityCount
    technologyCount
    projectOwners {
      id
    }
    identifiers
    resourceTagLinks {
      environment
      resourceTags {
        key
        value
      }
    }
  }
}
";

/// A project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub business_unit: Option<String>,
    pub archived: bool,
    pub slug: Option<String>,
    pub security_score: Option<f64>,
    pub risk_profile: Option<RiskProfile>,
    pub profile_completion: Option<i64>,
    pub repository_count: Option<i64>,
    pub cloud_account_count: Option<i64>,
    pub cloud_organization_count: Option<i64>,
    pub kubernetes_cluster_count: Option<i64>,
    pub workload_count: Option<i64>,
    pub team_member_count: Option<i64>,
    pub entity_count: Option<i64>,
    pub technology_count: Option<i64>,
    pub project_owners: Vec<IdRef>,
    pub identifiers: Vec<String>,
    pub resource_tag_links: Vec<ResourceTagLink>,
}

/// Business impact of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskProfile {
    pub business_impact: Option<String>,
}

/// Tags linking cloud resources to a project environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceTagLink {
    pub environment: Option<String>,
    pub resource_tags: Vec<Tag>,
}

/// Projects
pub struct Projects;

impl Resource for Projects {
    type Record = Project;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "wiz_project",
        description: "Projects group cloud resources by business unit or environment.",
        list_query: LIST_QUERY,
        list_root: "projects",
        get_query: Some(GET_QUERY),
        get_root: Some("project"),
        max_page_size: 100,
        filters: &[],
    };
}
