//! Common types used throughout the connector

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A configuration value where blank means unset
pub trait Setting {
    /// The trimmed value, or `None` when absent, empty or whitespace
    fn setting(&self) -> Option<String>;
}

impl Setting for Option<String> {
    fn setting(&self) -> Option<String> {
        self.as_deref().setting()
    }
}

impl Setting for Option<&str> {
    fn setting(&self) -> Option<String> {
        self.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("tok"), Some("tok") ; "plain")]
    #[test_case(Some("  tok\n"), Some("tok") ; "trimmed")]
    #[test_case(Some(""), None ; "empty")]
    #[test_case(Some("   "), None ; "blank")]
    #[test_case(None, None ; "absent")]
    fn test_setting(input: Option<&str>, expected: Option<&str>) {
        assert_eq!(input.setting().as_deref(), expected);
        assert_eq!(input.map(String::from).setting().as_deref(), expected);
    }
}
