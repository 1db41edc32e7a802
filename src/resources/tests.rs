//! Tests for the resource catalogue

use super::*;
use crate::error::ErrorClass;
use crate::filter::FieldKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;
use test_case::test_case;

// ============================================================================
// Catalogue
// ============================================================================

#[test]
fn test_names_unique_and_prefixed() {
    let mut seen = HashSet::new();
    for kind in ResourceKind::ALL {
        let name = kind.name();
        assert!(name.starts_with(NAME_PREFIX), "{name}");
        assert!(seen.insert(name), "duplicate resource name {name}");
    }
    assert_eq!(seen.len(), 11);
}

#[test_case("wiz_issue", ResourceKind::Issue)]
#[test_case("issue", ResourceKind::Issue)]
#[test_case("WIZ_Control", ResourceKind::Control)]
#[test_case(" subscription ", ResourceKind::Subscription)]
#[test_case("cloud_configuration_finding", ResourceKind::ConfigurationFinding)]
#[test_case("wiz_user_role", ResourceKind::UserRole)]
#[test_case("security_category", ResourceKind::SecurityCategory)]
fn test_kind_from_str(input: &str, expected: ResourceKind) {
    assert_eq!(input.parse::<ResourceKind>().unwrap(), expected);
}

#[test]
fn test_kind_from_str_unknown() {
    let err = "wiz_security_subcategory".parse::<ResourceKind>().unwrap_err();
    assert_eq!(err.class(), ErrorClass::Config);
    assert!(err.to_string().contains("wiz_security_subcategory"));
}

#[test]
fn test_kind_display_round_trips() {
    for kind in ResourceKind::ALL {
        assert_eq!(kind.to_string().parse::<ResourceKind>().unwrap(), kind);
    }
}

#[test]
fn test_filter_variable_declared_iff_filters() {
    for kind in ResourceKind::ALL {
        let d = kind.descriptor();
        assert_eq!(
            d.list_query.contains("$filter"),
            d.has_filters(),
            "{}",
            d.name
        );
    }
}

#[test]
fn test_queries_select_declared_roots() {
    for kind in ResourceKind::ALL {
        let d = kind.descriptor();
        assert!(
            d.list_query.contains(&format!("{}(first: $first", d.list_root)),
            "{}",
            d.name
        );
        assert!(d.list_query.contains("pageInfo"), "{}", d.name);
        assert!(d.list_query.contains("endCursor"), "{}", d.name);
        if let (Some(query), Some(root)) = (d.get_query, d.get_root) {
            assert!(query.contains(&format!("{root}(id: $id)")), "{}", d.name);
        }
    }
}

#[test]
fn test_only_user_roles_lack_get() {
    let without: Vec<_> = ResourceKind::ALL
        .into_iter()
        .filter(|k| !k.descriptor().supports_get())
        .collect();
    assert_eq!(without, vec![ResourceKind::UserRole]);
}

#[test_case(ResourceKind::Project, 100)]
#[test_case(ResourceKind::ConfigurationFinding, 500)]
#[test_case(ResourceKind::Control, 500)]
#[test_case(ResourceKind::Issue, 500)]
#[test_case(ResourceKind::User, 60)]
#[test_case(ResourceKind::ServiceAccount, 60)]
#[test_case(ResourceKind::Subscription, 500)]
#[test_case(ResourceKind::SecurityFramework, 500)]
#[test_case(ResourceKind::SecurityCategory, 500)]
#[test_case(ResourceKind::CloudConfigRule, 500)]
#[test_case(ResourceKind::UserRole, 100)]
fn test_max_page_size(kind: ResourceKind, expected: u32) {
    assert_eq!(kind.descriptor().max_page_size, expected);
}

#[test]
fn test_filter_columns_unique() {
    for kind in ResourceKind::ALL {
        let d = kind.descriptor();
        let columns: HashSet<_> = d.filters.iter().map(|f| f.column).collect();
        assert_eq!(columns.len(), d.filters.len(), "{}", d.name);
    }
}

#[test]
fn test_timestamp_filters() {
    let timestamps: Vec<_> = ResourceKind::ALL
        .into_iter()
        .flat_map(|k| k.descriptor().filters.iter())
        .filter(|f| f.kind == FieldKind::Timestamp)
        .map(|f| (f.column, f.argument))
        .collect();
    assert_eq!(
        timestamps,
        vec![("analyzed_at", "analyzedAt"), ("created_at", "createdAt")]
    );
}

// ============================================================================
// Record decoding
// ============================================================================

#[test]
fn test_decode_issue() {
    let issue: Issue = serde_json::from_value(json!({
        "id": "i-1",
        "status": "OPEN",
        "severity": "HIGH",
        "control": { "id": "c-1" },
        "notes": [{ "id": "n-1", "text": "seen", "user": { "id": "u-1", "name": "Ana" } }],
        "serviceTickets": [{ "id": "t-1", "externalId": "JIRA-7", "project": null }],
        "projects": [{ "id": "p-1", "name": "prod" }]
    }))
    .unwrap();

    assert_eq!(issue.control, Some(IdRef { id: "c-1".into() }));
    assert_eq!(issue.notes[0].user.as_ref().unwrap().name.as_deref(), Some("Ana"));
    assert_eq!(issue.service_tickets[0].external_id.as_deref(), Some("JIRA-7"));
    assert_eq!(issue.service_tickets[0].project, None);
    assert_eq!(issue.projects[0].name.as_deref(), Some("prod"));
    assert_eq!(issue.resolved_at, None);
}

#[test]
fn test_decode_control_renamed_fields() {
    let control: Control = serde_json::from_value(json!({
        "id": "c-1",
        "name": "Public bucket",
        "type": "SECURITY_GRAPH",
        "enabledForHBI": true,
        "supportsNRT": true,
        "query": { "type": ["BUCKET"] },
        "tags": ["storage"]
    }))
    .unwrap();

    assert_eq!(control.kind.as_deref(), Some("SECURITY_GRAPH"));
    assert!(control.enabled_for_hbi);
    assert!(!control.enabled_for_lbi);
    assert!(control.supports_nrt);
    assert_eq!(control.query, Some(json!({ "type": ["BUCKET"] })));
    assert_eq!(control.tags, vec!["storage".to_string()]);
}

#[test_case(json!({ "id": "c-1" }), vec!["c-1"] ; "single object")]
#[test_case(json!([{ "id": "c-1" }, { "id": "c-2" }]), vec!["c-1", "c-2"] ; "list")]
#[test_case(json!(null), vec![] ; "null")]
fn test_decode_cloud_config_rule_control(control: serde_json::Value, expected: Vec<&str>) {
    let rule: CloudConfigRule = serde_json::from_value(json!({
        "id": "r-1",
        "name": "S3 encryption",
        "builtin": true,
        "control": control
    }))
    .unwrap();

    let ids: Vec<_> = rule.control.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert!(rule.built_in);
}

#[test]
fn test_decode_cloud_config_rule_without_control() {
    let rule: CloudConfigRule = serde_json::from_value(json!({ "id": "r-1" })).unwrap();
    assert!(rule.control.is_empty());
}

#[test]
fn test_decode_security_framework_tree() {
    let framework: SecurityFramework = serde_json::from_value(json!({
        "id": "f-1",
        "name": "CIS",
        "builtin": true,
        "policyTypes": ["CLOUD"],
        "categories": [{
            "id": "cat-1",
            "name": "Logging",
            "subCategories": [{ "id": "sub-1", "title": "Enable trails" }]
        }]
    }))
    .unwrap();

    assert!(framework.built_in);
    assert_eq!(framework.categories.len(), 1);
    assert_eq!(
        framework.categories[0].sub_categories[0].title.as_deref(),
        Some("Enable trails")
    );
}

#[test]
fn test_decode_security_category() {
    let category: SecurityCategory = serde_json::from_value(json!({
        "id": "cat-1",
        "name": "Logging",
        "framework": { "id": "f-1" },
        "subCategories": [
            { "id": "sub-1", "title": "Enable trails", "resolutionRecommendation": "Turn it on" }
        ]
    }))
    .unwrap();

    assert_eq!(category.framework_id(), Some("f-1"));
    assert_eq!(
        category.sub_categories[0].resolution_recommendation.as_deref(),
        Some("Turn it on")
    );

    let orphan: SecurityCategory =
        serde_json::from_value(json!({ "id": "cat-2", "framework": null })).unwrap();
    assert_eq!(orphan.framework_id(), None);
    assert!(orphan.sub_categories.is_empty());
}

#[test]
fn test_security_category_filters_by_framework() {
    let d = SecurityCategories::DESCRIPTOR;
    assert_eq!(d.filters.len(), 1);
    assert_eq!(d.filters[0].column, "framework_id");
    assert_eq!(d.filters[0].argument, "frameworkId");
    assert_eq!(d.filters[0].kind, FieldKind::Text);
}

#[test]
fn test_decode_user_with_role() {
    let user: User = serde_json::from_value(json!({
        "id": "u-1",
        "email": "a@example.com",
        "role": { "id": "GLOBAL_ADMIN", "scopes": ["admin:all"], "isProjectScoped": false },
        "effectiveAssignedProjects": [{ "id": "p-1" }]
    }))
    .unwrap();

    let role = user.role.unwrap();
    assert_eq!(role.id, "GLOBAL_ADMIN");
    assert_eq!(role.scopes, vec!["admin:all".to_string()]);
    assert_eq!(user.effective_assigned_projects.len(), 1);
}

#[test]
fn test_decode_subscription_and_service_account() {
    let sub: Subscription = serde_json::from_value(json!({
        "id": "s-1",
        "cloudProvider": "AWS",
        "resourceCount": 42,
        "linkedProjects": [{ "id": "p-1" }]
    }))
    .unwrap();
    assert_eq!(sub.resource_count, 42);
    assert_eq!(sub.container_count, 0);

    let account: ServiceAccount = serde_json::from_value(json!({
        "id": "sa-1",
        "type": "THIRD_PARTY",
        "scopes": ["read:issues"]
    }))
    .unwrap();
    assert_eq!(account.kind.as_deref(), Some("THIRD_PARTY"));
}

#[test]
fn test_record_serializes_camel_case() {
    let finding = ConfigurationFinding {
        id: "f-1".into(),
        analyzed_at: Some("2024-03-01T00:00:00Z".into()),
        resource: Some(FindingResource {
            id: "r-1".into(),
            kind: Some("BUCKET".into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let value = serde_json::to_value(&finding).unwrap();
    assert_eq!(value["analyzedAt"], json!("2024-03-01T00:00:00Z"));
    assert_eq!(value["resource"]["type"], json!("BUCKET"));
}
