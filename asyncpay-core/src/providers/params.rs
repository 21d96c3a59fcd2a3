//! Request parameter builder
//!
//! [`ParameterSet`] keeps parameters in insertion order and drops absent values
//! at insertion time, so an elided key never reaches the wire. The same set
//! renders into form/query pairs or a JSON object, and signature templates
//! read values back through [`ParamValue::render`] so the signed text and the
//! sent text agree.

use crate::providers::adapter::BoolEncoding;
use rand::RngCore;
use serde_json::{Map, Number, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single request parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
    Json(Value),
}

impl ParamValue {
    /// Text form used in form/query bodies and signature templates
    pub fn render(&self, bools: BoolEncoding) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(f) => format_float(*f),
            ParamValue::Bool(b) => match (bools, b) {
                (BoolEncoding::Lowercase, true) => "true".to_string(),
                (BoolEncoding::Lowercase, false) => "false".to_string(),
                (BoolEncoding::Numeric, true) => "1".to_string(),
                (BoolEncoding::Numeric, false) => "0".to_string(),
            },
            ParamValue::List(items) => items.join(","),
            ParamValue::Json(Value::String(s)) => s.clone(),
            ParamValue::Json(v) => v.to_string(),
        }
    }

    /// JSON form used in JSON bodies
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Int(i) => Value::from(*i),
            ParamValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            ParamValue::Json(v) => v.clone(),
        }
    }
}

/// Floats print the way JSON serializes them (`100.0`, `10.5`)
pub fn format_float(value: f64) -> String {
    Number::from_f64(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| value.to_string())
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(ParamValue::Int)
            .unwrap_or_else(|_| ParamValue::Str(value.to_string()))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for ParamValue {
    fn from(value: &[String]) -> Self {
        ParamValue::List(value.to_vec())
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Json(value)
    }
}

/// Ordered request parameters with absent values elided
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an earlier value for the same key in place
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter only when a value is present
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append every entry of `other`
    pub fn extend(mut self, other: ParameterSet) -> Self {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries ordered by key, for signatures over sorted values
    pub fn sorted(&self) -> Vec<(&str, &ParamValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Pairs for form and query encoding
    pub fn to_pairs(&self, bools: BoolEncoding) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.render(bools)))
            .collect()
    }

    pub fn to_json_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// Compact JSON text, keys in insertion order
    pub fn to_json_string(&self) -> String {
        Value::Object(self.to_json_map()).to_string()
    }

    /// `application/x-www-form-urlencoded` text
    pub fn to_query_string(&self, bools: BoolEncoding) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs(bools))
            .finish()
    }
}

/// Fresh identifier for orders and comments the caller did not name
pub fn random_order_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut bytes = [0u8; 6];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{millis}_{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_values_are_elided() {
        let params = ParameterSet::new()
            .with("merchant_id", "shop1")
            .with_opt("method", None::<String>)
            .with("amount", 10.5)
            .with_opt("email", None::<&str>)
            .with("currency", "RUB");

        assert!(!params.contains_key("method"));
        assert!(!params.contains_key("email"));
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            vec!["merchant_id", "amount", "currency"]
        );
    }

    #[test]
    fn test_list_is_comma_joined_in_form_bodies() {
        let params = ParameterSet::new().with("accepted_assets", vec!["USDT", "TON"]);
        let pairs = params.to_pairs(BoolEncoding::Lowercase);
        assert_eq!(pairs, vec![("accepted_assets".to_string(), "USDT,TON".to_string())]);
        assert_eq!(
            params.to_query_string(BoolEncoding::Lowercase),
            "accepted_assets=USDT%2CTON"
        );
    }

    #[test]
    fn test_list_stays_array_in_json_bodies() {
        let params = ParameterSet::new().with("tickers", vec!["BTC", "LTC"]);
        assert_eq!(params.to_json_string(), r#"{"tickers":["BTC","LTC"]}"#);
    }

    #[test]
    fn test_bool_encodings() {
        let params = ParameterSet::new()
            .with("allow_comments", true)
            .with("allow_anonymous", false);
        assert_eq!(
            params.to_query_string(BoolEncoding::Lowercase),
            "allow_comments=true&allow_anonymous=false"
        );
        assert_eq!(
            params.to_query_string(BoolEncoding::Numeric),
            "allow_comments=1&allow_anonymous=0"
        );
        assert_eq!(
            params.to_json_string(),
            r#"{"allow_comments":true,"allow_anonymous":false}"#
        );
    }

    #[test]
    fn test_float_rendering_matches_json() {
        assert_eq!(format_float(10.5), "10.5");
        assert_eq!(format_float(100.0), "100.0");
        let params = ParameterSet::new().with("amount", 100.0);
        assert_eq!(params.to_json_string(), r#"{"amount":100.0}"#);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let params = ParameterSet::new()
            .with("a", 1)
            .with("b", 2)
            .with("a", 3);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some(&ParamValue::Int(3)));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_sorted_view() {
        let params = ParameterSet::new()
            .with("shopId", 1)
            .with("nonce", 1700000000i64)
            .with("currency", "RUB");
        let keys: Vec<_> = params.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["currency", "nonce", "shopId"]);
    }

    #[test]
    fn test_nested_json_value() {
        let params = ParameterSet::new().with(
            "paymentDetails",
            json!({"amount": 100, "currency": "RUB"}),
        );
        assert_eq!(
            params.to_json_string(),
            r#"{"paymentDetails":{"amount":100,"currency":"RUB"}}"#
        );
    }

    #[test]
    fn test_random_order_ids_differ() {
        assert_ne!(random_order_id(), random_order_id());
    }
}
