//! Qualifier to filter-argument translation

use super::types::{
    FieldKind, FilterField, FilterMap, FilterValue, Operator, QualValue, Qualifier, TimeRange,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Clock-skew tolerance applied on each side of a timestamp equality
const EQUALITY_WINDOW_SECS: i64 = 2;

/// Widening applied to inclusive timestamp bounds
const INCLUSIVE_WIDEN_SECS: i64 = 1;

/// Translate host qualifiers into remote filter arguments
///
/// Qualifiers on fields not in `fields`, operators the field kind does not
/// support, and values that do not coerce to the field's kind are dropped.
/// Boolean `<>` qualifiers are applied after every `=`, so a negation wins.
pub fn translate(qualifiers: &[Qualifier], fields: &[FilterField]) -> FilterMap {
    let mut filter = FilterMap::new();
    let mut negations: Vec<(&'static str, bool)> = Vec::new();
    let mut ranges: BTreeMap<&'static str, TimeRange> = BTreeMap::new();

    for qual in qualifiers {
        let Some(field) = fields.iter().find(|f| f.column == qual.field) else {
            debug!(field = %qual.field, "Dropping qualifier on unfilterable field");
            continue;
        };

        match field.kind {
            FieldKind::Text => match (qual.operator, qual.value.as_text()) {
                (Operator::Eq, Some(text)) if !text.is_empty() => {
                    filter.insert(field.argument, FilterValue::Text(text));
                }
                _ => dropped(qual),
            },
            FieldKind::Bool => match (qual.operator, qual.value.as_bool()) {
                (Operator::Eq, Some(value)) => {
                    filter.insert(field.argument, FilterValue::Flag(value));
                }
                (Operator::Ne, Some(value)) => negations.push((field.argument, !value)),
                _ => dropped(qual),
            },
            FieldKind::Timestamp => {
                let Some(at) = qual.value.as_timestamp() else {
                    dropped(qual);
                    continue;
                };
                if qual.operator == Operator::Ne {
                    dropped(qual);
                    continue;
                }
                apply_bound(ranges.entry(field.argument).or_default(), qual.operator, at);
            }
        }
    }

    for (argument, value) in negations {
        filter.insert(argument, FilterValue::Flag(value));
    }
    for (argument, range) in ranges {
        filter.insert(argument, FilterValue::Range(range));
    }

    filter
}

fn apply_bound(range: &mut TimeRange, operator: Operator, at: DateTime<Utc>) {
    match operator {
        Operator::Eq => {
            range.after = Some(at - Duration::seconds(EQUALITY_WINDOW_SECS));
            range.before = Some(at + Duration::seconds(EQUALITY_WINDOW_SECS));
        }
        Operator::Ge => range.after = Some(at - Duration::seconds(INCLUSIVE_WIDEN_SECS)),
        Operator::Gt => range.after = Some(at),
        Operator::Le => range.before = Some(at + Duration::seconds(INCLUSIVE_WIDEN_SECS)),
        Operator::Lt => range.before = Some(at),
        Operator::Ne => {}
    }
}

fn dropped(qual: &Qualifier) {
    let value = match &qual.value {
        QualValue::Text(s) => s.clone(),
        other => format!("{other:?}"),
    };
    debug!(
        field = %qual.field,
        operator = %qual.operator,
        value = %value,
        "Dropping qualifier the field cannot express"
    );
}
