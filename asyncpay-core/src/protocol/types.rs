//! Response envelope shared by every provider
//!
//! The transport hands back an [`Envelope`] once the provider's failure
//! predicate has passed. Facades then map the whole body, or the sub-tree a
//! given operation returns (`/result`, `/data`, `/list`), into typed models.

use crate::providers::adapter::ProviderKind;
use crate::providers::error::{PaymentError, PaymentResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded JSON response that passed the provider's error check
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    provider: ProviderKind,
    status: u16,
    body: Value,
}

impl Envelope {
    pub fn new(provider: ProviderKind, status: u16, body: Value) -> Self {
        Self {
            provider,
            status,
            body,
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_value(self) -> Value {
        self.body
    }

    /// Look up a sub-tree by JSON pointer (`""` is the whole body)
    pub fn pointer(&self, pointer: &str) -> PaymentResult<&Value> {
        self.body.pointer(pointer).ok_or_else(|| {
            PaymentError::decode(self.provider, format!("response has no '{pointer}' field"))
        })
    }

    /// Map the whole body into `T`
    pub fn decode<T: DeserializeOwned>(&self) -> PaymentResult<T> {
        self.extract("")
    }

    /// Map the sub-tree at `pointer` into `T`
    pub fn extract<T: DeserializeOwned>(&self, pointer: &str) -> PaymentResult<T> {
        let value = self.pointer(pointer)?;
        T::deserialize(value).map_err(|e| {
            PaymentError::decode(
                self.provider,
                format!("invalid '{}' payload: {e}", display_pointer(pointer)),
            )
        })
    }

    /// Map a JSON object of records keyed by name into its values, in order
    pub fn extract_values<T: DeserializeOwned>(&self, pointer: &str) -> PaymentResult<Vec<T>> {
        match self.pointer(pointer)? {
            Value::Object(map) => map
                .values()
                .map(|v| {
                    T::deserialize(v).map_err(|e| {
                        PaymentError::decode(self.provider, format!("invalid list item: {e}"))
                    })
                })
                .collect(),
            Value::Array(items) if items.is_empty() => Ok(Vec::new()),
            other => Err(PaymentError::decode(
                self.provider,
                format!("expected an object at '{}', got {other}", display_pointer(pointer)),
            )),
        }
    }

    /// Map one named record out of an object keyed by name
    pub fn extract_entry<T: DeserializeOwned>(&self, pointer: &str, key: &str) -> PaymentResult<T> {
        let entry = self
            .pointer(pointer)?
            .get(key)
            .ok_or_else(|| PaymentError::unexpected(self.provider, format!("'{key}' is not listed")))?;
        T::deserialize(entry)
            .map_err(|e| PaymentError::decode(self.provider, format!("invalid '{key}' entry: {e}")))
    }
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() {
        "/"
    } else {
        pointer
    }
}

/// A value some providers send as a number and others as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => n.as_f64(),
            NumberOrString::String(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberOrString::Number(n) => write!(f, "{n}"),
            NumberOrString::String(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        id: String,
        #[serde(default)]
        note: Option<String>,
    }

    fn envelope(body: Value) -> Envelope {
        Envelope::new(ProviderKind::Xrocket, 200, body)
    }

    #[test]
    fn test_missing_optional_field_maps_to_none() {
        let env = envelope(json!({"data": {"id": "42"}}));
        let sample: Sample = env.extract("/data").unwrap();
        assert_eq!(sample.id, "42");
        assert!(sample.note.is_none());
    }

    #[test]
    fn test_missing_required_field_is_decode_error() {
        let env = envelope(json!({"data": {"note": "x"}}));
        let err = env.extract::<Sample>("/data").unwrap_err();
        assert!(matches!(err, PaymentError::Decode { .. }));
    }

    #[test]
    fn test_missing_pointer_is_decode_error() {
        let env = envelope(json!({"success": true}));
        let err = env.extract::<Sample>("/data").unwrap_err();
        assert!(err.to_string().contains("/data"));
    }

    #[test]
    fn test_extract_values_keeps_order() {
        let env = envelope(json!({"list": {"b": {"id": "2"}, "a": {"id": "1"}}}));
        let items: Vec<Sample> = env.extract_values("/list").unwrap();
        assert_eq!(items.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["2", "1"]);
    }

    #[test]
    fn test_extract_entry_unknown_key() {
        let env = envelope(json!({"list": {"a": {"id": "1"}}}));
        let err = env.extract_entry::<Sample>("/list", "zz").unwrap_err();
        assert!(matches!(err, PaymentError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_number_or_string() {
        let n: NumberOrString = serde_json::from_value(json!(12.5)).unwrap();
        let s: NumberOrString = serde_json::from_value(json!("12.5")).unwrap();
        assert_eq!(n.as_f64(), Some(12.5));
        assert_eq!(s.as_f64(), Some(12.5));
        assert_eq!(s.to_string(), "12.5");
    }
}
