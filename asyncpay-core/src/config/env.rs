//! Environment variable interpolation for configuration

use super::error::ConfigError;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
});

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").expect("placeholder pattern is a valid regex"));

/// Interpolate `${VAR}` references in a configuration string
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    interpolate_with(content, |name| env::var(name).ok())
}

/// Interpolate using an arbitrary variable lookup
pub fn interpolate_with<F>(content: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = None;
    let result = ENV_VAR_PATTERN.replace_all(content, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match lookup(name) {
            Some(value) => value,
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var) => Err(ConfigError::EnvVarNotFound { var }),
        None => Ok(result.into_owned()),
    }
}

/// First `${...}` left in a value, if any
pub fn find_placeholder(value: &str) -> Option<&str> {
    PLACEHOLDER_PATTERN.find(value).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_interpolate_env_vars() {
        let result =
            interpolate_with("api_key: ${TEST_VAR}", lookup(&[("TEST_VAR", "test_value")])).unwrap();
        assert_eq!(result, "api_key: test_value");
    }

    #[test]
    fn test_missing_env_var() {
        let result = interpolate_with("api_key: ${MISSING_VAR}", lookup(&[]));
        match result {
            Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_env_vars() {
        let result = interpolate_with(
            "key1: ${VAR1}, key2: ${VAR2}, again: ${VAR1}",
            lookup(&[("VAR1", "value1"), ("VAR2", "value2")]),
        )
        .unwrap();
        assert_eq!(result, "key1: value1, key2: value2, again: value1");
    }

    #[test]
    fn test_find_placeholder() {
        assert_eq!(find_placeholder("${lower_case}"), Some("${lower_case}"));
        assert_eq!(find_placeholder("plain"), None);
    }
}
