//! Secrets handling and redaction
//!
//! Credentials are held as [`SecretString`], which never prints its value.
//! Request headers that carry credentials are passed through
//! [`redact_by_field_name`] before they reach the logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wrapper type for sensitive strings like API keys
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the actual value (use with caution)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    /// Empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Get a partially redacted version for debugging
    pub fn partial_redact(&self) -> String {
        if self.value.is_empty() {
            return "[EMPTY]".to_string();
        }

        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 8 {
            "[REDACTED]".to_string()
        } else {
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[chars.len() - 2..].iter().collect();
            format!("{head}...{tail}")
        }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How much of a sensitive value may appear in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionPolicy {
    /// Fully redact all sensitive fields
    #[default]
    Full,
    /// Partially redact showing some info for debugging
    Partial,
    /// No redaction (dangerous - only for secure environments)
    None,
}

const SENSITIVE_PATTERNS: [&str; 9] = [
    "key",
    "secret",
    "token",
    "password",
    "authorization",
    "sign",
    "credential",
    "auth",
    "merchant",
];

/// Whether a header or field name is expected to carry secret material
pub fn is_sensitive_field(field_name: &str) -> bool {
    let field_lower = field_name.to_lowercase();
    SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| field_lower.contains(pattern))
}

/// Redact a value based on its field name
pub fn redact_by_field_name(policy: RedactionPolicy, field_name: &str, value: &str) -> String {
    if !is_sensitive_field(field_name) {
        return value.to_string();
    }
    match policy {
        RedactionPolicy::Full => "[REDACTED]".to_string(),
        RedactionPolicy::Partial => SecretString::new(value).partial_redact(),
        RedactionPolicy::None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redaction() {
        let secret = SecretString::new("1234567890abcdef");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(secret.partial_redact(), "12...ef");
    }

    #[test]
    fn test_short_secret_fully_redacted() {
        assert_eq!(SecretString::new("abc").partial_redact(), "[REDACTED]");
        assert_eq!(SecretString::new("").partial_redact(), "[EMPTY]");
    }

    #[test]
    fn test_blank_detection() {
        assert!(SecretString::new("").is_blank());
        assert!(SecretString::new("   ").is_blank());
        assert!(!SecretString::new("k").is_blank());
    }

    #[test]
    fn test_redact_by_field_name() {
        let policy = RedactionPolicy::Full;
        assert_eq!(redact_by_field_name(policy, "X-Api-Key", "abc"), "[REDACTED]");
        assert_eq!(redact_by_field_name(policy, "Crypto-Pay-API-Token", "1:AA"), "[REDACTED]");
        assert_eq!(redact_by_field_name(policy, "sign", "deadbeef"), "[REDACTED]");
        assert_eq!(redact_by_field_name(policy, "Accept", "application/json"), "application/json");
    }

    #[test]
    fn test_redaction_policies() {
        let value = "rocket-pay-key-123456";
        assert_eq!(
            redact_by_field_name(RedactionPolicy::Partial, "Rocket-Pay-Key", value),
            "ro...56"
        );
        assert_eq!(
            redact_by_field_name(RedactionPolicy::None, "Rocket-Pay-Key", value),
            value
        );
    }
}
