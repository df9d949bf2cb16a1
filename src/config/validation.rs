// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shape checks applied while turning a raw document into a `Configuration`.

use reqwest::Url;
use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::errors::ConfigError;

/// Validate the model endpoint as an absolute http(s) base URL.
pub fn validate_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingField("model.endpoint"));
    }

    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }

    Ok(url)
}

/// Human-readable name of a value's shape, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Stringify a scalar value. Lists, mappings and nulls are rejected.
pub fn scalar_to_string(path: &str, value: &Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(ConfigError::InvalidValue {
            path: path.to_string(),
            expected: "a string, number or boolean",
        }),
    }
}

/// Flatten a mapping of scalars into owned strings.
pub fn string_map(
    path: &str,
    raw: &BTreeMap<String, Value>,
) -> Result<BTreeMap<String, String>, ConfigError> {
    raw.iter()
        .map(|(key, value)| {
            let full_path = format!("{}.{}", path, key);
            scalar_to_string(&full_path, value).map(|s| (key.clone(), s))
        })
        .collect()
}

/// Ensure every task entry is a string, preserving order.
pub fn task_strings(raw: &[Value]) -> Result<Vec<String>, ConfigError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConfigError::InvalidStep {
                index,
                found: value_kind(other),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_endpoint_table_driven() {
        let test_cases = vec![
            ("http://localhost:8080", true),
            ("https://models.example.com/api", true),
            ("  https://padded.example.com  ", true),
            ("", false),
            ("   ", false),
            ("not a url", false),
            ("ftp://files.example.com", false),
            ("mailto:someone@example.com", false),
            ("localhost:8080", false),
        ];

        for (endpoint, ok) in test_cases {
            assert_eq!(
                validate_endpoint(endpoint).is_ok(),
                ok,
                "endpoint '{}' validation mismatch",
                endpoint
            );
        }
    }

    #[test]
    fn test_empty_endpoint_is_missing_field() {
        assert!(matches!(
            validate_endpoint(""),
            Err(ConfigError::MissingField("model.endpoint"))
        ));
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string("x", &Value::from(6379)).unwrap(), "6379");
        assert_eq!(scalar_to_string("x", &Value::from(true)).unwrap(), "true");
        assert_eq!(scalar_to_string("x", &Value::from("abc")).unwrap(), "abc");
        assert!(scalar_to_string("x", &Value::Null).is_err());
        assert!(scalar_to_string("x", &Value::Sequence(vec![])).is_err());
    }

    #[test]
    fn test_task_strings_reports_index_of_bad_entry() {
        let raw = vec![Value::from("MCP:a:b"), Value::from(42), Value::from("x")];
        match task_strings(&raw) {
            Err(ConfigError::InvalidStep { index, found }) => {
                assert_eq!(index, 1);
                assert_eq!(found, "a number");
            }
            other => panic!("expected InvalidStep, got {:?}", other),
        }
    }
}
