//! Captures response values into the active environment.

use courier_domain::{ApiResponse, Environment, ExtractionRule};
use serde_json::Value;

use crate::json_path;

/// Environment after extraction, with the variables that were assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Copy of the active environment with the new values
    pub environment: Environment,
    /// `(variable, value)` pairs in rule order
    pub assigned: Vec<(String, String)>,
}

/// Text stored for a matched value. Strings are taken as-is; anything else
/// is written as compact JSON.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Applies extraction rules to a response.
///
/// Nothing happens unless the status is below 300, an environment is
/// active, at least one rule exists and the body is a JSON object or array.
/// Each complete rule assigns the first match of its path; rules whose path
/// is invalid or matches nothing are skipped with a warning.
///
/// Returns `None` when no variable was assigned.
#[must_use]
pub fn extract(
    response: &ApiResponse,
    rules: &[ExtractionRule],
    environment: Option<&Environment>,
) -> Option<Extraction> {
    let environment = environment?;
    if !response.status.is_success() || rules.is_empty() {
        return None;
    }
    let body = response.body.structured()?;

    let mut updated = environment.clone();
    let mut assigned = Vec::new();

    for rule in rules.iter().filter(|r| r.is_complete()) {
        match json_path::query_first(body, &rule.json_path) {
            Ok(Some(value)) => {
                let text = stringify(value);
                tracing::debug!(variable = %rule.target_variable, path = %rule.json_path, "extracted value");
                updated
                    .variables
                    .insert(rule.target_variable.clone(), text.clone());
                assigned.push((rule.target_variable.clone(), text));
            }
            Ok(None) => {
                tracing::warn!(path = %rule.json_path, "extraction path matched nothing");
            }
            Err(error) => {
                tracing::warn!(path = %rule.json_path, %error, "invalid extraction path");
            }
        }
    }

    if assigned.is_empty() {
        None
    } else {
        Some(Extraction {
            environment: updated,
            assigned,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::from_raw(status, None, BTreeMap::new(), body, 5)
    }

    fn env() -> Environment {
        Environment::new("p", "Local").unwrap().with_variable("keep", "me")
    }

    #[test]
    fn test_number_is_stored_as_string() {
        let rules = vec![ExtractionRule::new("$.data.id", "userId")];
        let result = extract(&response(200, r#"{"data":{"id":42}}"#), &rules, Some(&env())).unwrap();
        assert_eq!(result.environment.get("userId"), Some("42"));
        assert_eq!(result.environment.get("keep"), Some("me"));
        assert_eq!(result.assigned, vec![("userId".to_string(), "42".to_string())]);
    }

    #[test]
    fn test_first_match_wins() {
        let rules = vec![ExtractionRule::new("$.items[*].id", "first")];
        let result =
            extract(&response(201, r#"{"items":[{"id":"a"},{"id":"b"}]}"#), &rules, Some(&env()))
                .unwrap();
        assert_eq!(result.environment.get("first"), Some("a"));
    }

    #[test]
    fn test_objects_become_compact_json() {
        assert_eq!(stringify(&serde_json::json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
        assert_eq!(stringify(&serde_json::json!(true)), "true");
        assert_eq!(stringify(&Value::Null), "null");
    }

    #[test]
    fn test_skips_on_error_status() {
        let rules = vec![ExtractionRule::new("$.id", "id")];
        assert!(extract(&response(300, r#"{"id":1}"#), &rules, Some(&env())).is_none());
        assert!(extract(&response(404, r#"{"id":1}"#), &rules, Some(&env())).is_none());
    }

    #[test]
    fn test_skips_without_environment_or_rules() {
        let rules = vec![ExtractionRule::new("$.id", "id")];
        assert!(extract(&response(200, r#"{"id":1}"#), &rules, None).is_none());
        assert!(extract(&response(200, r#"{"id":1}"#), &[], Some(&env())).is_none());
    }

    #[test]
    fn test_skips_primitive_and_text_bodies() {
        let rules = vec![ExtractionRule::new("$", "all")];
        assert!(extract(&response(200, "42"), &rules, Some(&env())).is_none());
        assert!(extract(&response(200, "not json"), &rules, Some(&env())).is_none());
    }

    #[test]
    fn test_bad_rules_do_not_abort_others() {
        let rules = vec![
            ExtractionRule::new("$.[", "broken"),
            ExtractionRule::new("$.missing", "missing"),
            ExtractionRule::new("", "incomplete"),
            ExtractionRule::new("$.token", "token"),
        ];
        let result = extract(&response(200, r#"{"token":"t-1"}"#), &rules, Some(&env())).unwrap();
        assert_eq!(result.assigned.len(), 1);
        assert_eq!(result.environment.get("token"), Some("t-1"));
        assert_eq!(result.environment.get("broken"), None);
    }

    #[test]
    fn test_nothing_matched_returns_none() {
        let rules = vec![ExtractionRule::new("$.missing", "missing")];
        assert!(extract(&response(200, "{}"), &rules, Some(&env())).is_none());
    }
}
