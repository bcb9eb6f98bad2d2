//! Defensive response-body handling.
//!
//! Backends sometimes answer with an empty body or an HTML error page. Such
//! bodies are read as `{}` instead of failing the call.

use serde_json::{Map, Value};
use tracing::warn;

/// Parse a response body, falling back to an empty object.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|err| {
        warn!(%err, len = text.len(), "response body is not JSON; treating as {{}}");
        Value::Object(Map::new())
    })
}

/// Loose truthiness of a JSON flag such as `exists` or `success`.
///
/// `false`, `null`, `0`, and `""` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truthiness of `body[key]`, with a missing key being falsy.
pub fn truthy_field(body: &Value, key: &str) -> bool {
    body.get(key).is_some_and(is_truthy)
}

/// `body.message` as a string, when present and non-empty.
pub fn message_field(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_and_malformed_bodies_are_empty_objects() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body("  \n"), json!({}));
        assert_eq!(parse_body("<html>502 Bad Gateway</html>"), json!({}));
        assert_eq!(parse_body("{\"exists\":"), json!({}));
    }

    #[test]
    fn valid_bodies_parse() {
        assert_eq!(parse_body(r#"{"exists":true}"#), json!({"exists": true}));
    }

    #[test]
    fn truthiness() {
        for v in [json!(true), json!(1), json!("yes"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v}");
        }
        for v in [json!(false), json!(0), json!(0.0), json!(""), Value::Null] {
            assert!(!is_truthy(&v), "{v}");
        }
    }

    #[test]
    fn flags_on_non_objects_are_false() {
        assert!(!truthy_field(&json!([1, 2]), "exists"));
        assert!(!truthy_field(&json!("exists"), "exists"));
        assert!(!truthy_field(&json!({}), "exists"));
        assert!(truthy_field(&json!({"exists": true}), "exists"));
    }

    #[test]
    fn message_extraction() {
        assert_eq!(message_field(&json!({"message": "duplicate"})).as_deref(), Some("duplicate"));
        assert_eq!(message_field(&json!({"message": ""})), None);
        assert_eq!(message_field(&json!({})), None);
        assert_eq!(message_field(&json!({"message": {"cnic": ["taken"]}})).as_deref(), Some(r#"{"cnic":["taken"]}"#));
    }
}
