//! GraphQL request and response envelopes

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// POST body for a single query
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: ?Sized> {
    /// Document text
    pub query: &'a str,
    /// Variables object
    pub variables: &'a V,
}

/// One entry of the `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message
    pub message: String,
    /// Response path the error applies to
    #[serde(default)]
    pub path: Option<Vec<JsonValue>>,
    /// Provider-specific details
    #[serde(default)]
    pub extensions: Option<JsonValue>,
}

/// Response envelope; `data` stays raw until errors have been checked
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    /// Payload
    #[serde(default)]
    pub data: Option<JsonValue>,
    /// Errors reported by the server; absent and `null` both mean none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<GraphQlError>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl GraphQlResponse {
    /// All error messages joined into one line
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Turn the envelope into typed data, or the server's errors
    ///
    /// Any entry in `errors` fails the call even when partial data came back.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if let Some(message) = self.error_message() {
            return Err(Error::remote(message));
        }
        match self.data {
            Some(JsonValue::Null) | None => Err(Error::decode("response carries no data")),
            Some(data) => serde_json::from_value(data).map_err(|e| Error::decode(e.to_string())),
        }
    }
}
