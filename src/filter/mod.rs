//! Predicate translation
//!
//! Turns host qualifiers (`field op value`) into the remote API's named
//! filter arguments. Each resource declares its filterable fields as a
//! static slice of [`FilterField`]; anything outside that slice is ignored.
//!
//! # Example
//!
//! ```
//! use wiz_connector::filter::{translate, FilterField, Qualifier};
//!
//! const FIELDS: &[FilterField] = &[
//!     FilterField::text("severity", "severity"),
//!     FilterField::flag("enabled", "enabled"),
//! ];
//!
//! let quals = vec![
//!     Qualifier::eq("severity", "HIGH"),
//!     Qualifier::ne("enabled", true),
//!     Qualifier::eq("name", "ignored"),
//! ];
//!
//! let filter = translate(&quals, FIELDS);
//! assert_eq!(
//!     serde_json::to_value(&filter).unwrap(),
//!     serde_json::json!({ "enabled": false, "severity": "HIGH" })
//! );
//! ```

mod translator;
mod types;

pub use translator::translate;
pub use types::{
    format_timestamp, FieldKind, FilterField, FilterMap, FilterValue, Operator, QualValue,
    Qualifier, TimeRange,
};
