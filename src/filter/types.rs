//! Qualifier and filter types

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

// ============================================================================
// Qualifiers (host side)
// ============================================================================

/// Comparison operator of a qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Eq,
    /// `<>` (also accepted as `!=`)
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Operator {
    /// Textual forms, longest first so prefix matching picks `>=` over `>`
    const TOKENS: [(&'static str, Operator); 7] = [
        ("<>", Operator::Ne),
        ("!=", Operator::Ne),
        (">=", Operator::Ge),
        ("<=", Operator::Le),
        ("=", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
    ];

    /// Canonical textual form
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| *token == s)
            .map(|(_, op)| *op)
            .ok_or_else(|| Error::invalid_value("operator", format!("unknown operator '{s}'")))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scalar value supplied by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualValue {
    /// String or enum value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Point in time
    Timestamp(DateTime<Utc>),
}

impl QualValue {
    /// Coerce into a string for text filters
    pub fn as_text(&self) -> Option<String> {
        match self {
            QualValue::Text(s) => Some(s.clone()),
            QualValue::Int(i) => Some(i.to_string()),
            QualValue::Bool(_) | QualValue::Timestamp(_) => None,
        }
    }

    /// Coerce into a boolean (`true`/`false`, case-insensitive)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            QualValue::Bool(b) => Some(*b),
            QualValue::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            QualValue::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// Coerce into a timestamp (RFC 3339 text or Unix seconds)
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            QualValue::Timestamp(t) => Some(*t),
            QualValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            QualValue::Int(secs) => DateTime::from_timestamp(*secs, 0),
            QualValue::Bool(_) => None,
        }
    }
}

impl From<&str> for QualValue {
    fn from(value: &str) -> Self {
        QualValue::Text(value.to_string())
    }
}

impl From<String> for QualValue {
    fn from(value: String) -> Self {
        QualValue::Text(value)
    }
}

impl From<bool> for QualValue {
    fn from(value: bool) -> Self {
        QualValue::Bool(value)
    }
}

impl From<i64> for QualValue {
    fn from(value: i64) -> Self {
        QualValue::Int(value)
    }
}

impl From<DateTime<Utc>> for QualValue {
    fn from(value: DateTime<Utc>) -> Self {
        QualValue::Timestamp(value)
    }
}

/// A single predicate constraint from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    /// Column name
    pub field: String,
    /// Comparison operator
    pub operator: Operator,
    /// Right-hand side
    pub value: QualValue,
}

impl Qualifier {
    /// Create a qualifier
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<QualValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// `field = value`
    pub fn eq(field: impl Into<String>, value: impl Into<QualValue>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// `field <> value`
    pub fn ne(field: impl Into<String>, value: impl Into<QualValue>) -> Self {
        Self::new(field, Operator::Ne, value)
    }

    /// Parse a host expression such as `severity=HIGH` or `created_at>=2024-01-01T00:00:00Z`
    ///
    /// The value is kept as text; the translator coerces it to the field's kind.
    pub fn parse(expr: &str) -> Result<Self> {
        let start = expr
            .find(['=', '<', '>', '!'])
            .ok_or_else(|| Error::invalid_value("qualifier", format!("no operator in '{expr}'")))?;

        let field = expr[..start].trim();
        if field.is_empty() {
            return Err(Error::invalid_value(
                "qualifier",
                format!("missing field name in '{expr}'"),
            ));
        }

        let rest = &expr[start..];
        let (token, operator) = Operator::TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
            .copied()
            .ok_or_else(|| Error::invalid_value("qualifier", format!("bad operator in '{expr}'")))?;

        let value = rest[token.len()..].trim();
        Ok(Self::new(field, operator, value))
    }
}

impl FromStr for Qualifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ============================================================================
// Filter fields (resource side)
// ============================================================================

/// Kind of a filterable field, which decides how qualifiers translate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String or enum; only `=` translates
    Text,
    /// Boolean toggle; `=` and `<>` translate
    Bool,
    /// Timestamp; `=`, `>`, `>=`, `<`, `<=` build an `{after, before}` range
    Timestamp,
}

impl FieldKind {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Timestamp => "timestamp",
        }
    }
}

/// A filterable column and the remote filter argument it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Host-facing column name
    pub column: &'static str,
    /// Remote filter argument name
    pub argument: &'static str,
    /// Value kind
    pub kind: FieldKind,
}

impl FilterField {
    /// A string/enum field
    pub const fn text(column: &'static str, argument: &'static str) -> Self {
        Self {
            column,
            argument,
            kind: FieldKind::Text,
        }
    }

    /// A boolean field
    pub const fn flag(column: &'static str, argument: &'static str) -> Self {
        Self {
            column,
            argument,
            kind: FieldKind::Bool,
        }
    }

    /// A timestamp range field
    pub const fn timestamp(column: &'static str, argument: &'static str) -> Self {
        Self {
            column,
            argument,
            kind: FieldKind::Timestamp,
        }
    }

    /// Operators this field accepts
    pub fn operators(&self) -> &'static [Operator] {
        match self.kind {
            FieldKind::Text => &[Operator::Eq],
            FieldKind::Bool => &[Operator::Eq, Operator::Ne],
            FieldKind::Timestamp => &[
                Operator::Eq,
                Operator::Gt,
                Operator::Ge,
                Operator::Lt,
                Operator::Le,
            ],
        }
    }
}

// ============================================================================
// Filter map (remote side)
// ============================================================================

/// Timestamp bounds sent as `{after, before}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Lower bound
    pub after: Option<DateTime<Utc>>,
    /// Upper bound
    pub before: Option<DateTime<Utc>>,
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = usize::from(self.after.is_some()) + usize::from(self.before.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(after) = self.after {
            map.serialize_entry("after", &format_timestamp(after))?;
        }
        if let Some(before) = self.before {
            map.serialize_entry("before", &format_timestamp(before))?;
        }
        map.end()
    }
}

/// RFC 3339, second precision, `Z` suffix
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Value of one remote filter argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// String/enum constraint
    Text(String),
    /// Boolean constraint
    Flag(bool),
    /// Timestamp range
    Range(TimeRange),
}

/// Remote-native filter arguments for one list call
///
/// Keys are remote argument names; a missing key means no constraint.
/// Serializes as a JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    entries: BTreeMap<&'static str, FilterValue>,
}

impl FilterMap {
    /// An empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) an argument
    pub fn insert(&mut self, argument: &'static str, value: FilterValue) {
        self.entries.insert(argument, value);
    }

    /// Look up an argument
    pub fn get(&self, argument: &str) -> Option<&FilterValue> {
        self.entries.get(argument)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no argument is set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate arguments in key order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl Serialize for FilterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
