//! District id extraction from composite district values.
//!
//! The district-selection step upstream stores the chosen district as its
//! name with the numeric id appended and no delimiter, e.g. `"Lahore4"`.
//! Backends only want the id.

use serde_json::Value;

/// Return the trailing run of ASCII digits in `s`.
///
/// `"lahore2"` → `"2"`, `"42"` → `"42"`, `"Lahore"` → `""`.
pub fn trailing_digits(s: &str) -> &str {
    let start = s
        .bytes()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);
    &s[start..]
}

/// Resolve a district reference from whatever the profile holds.
///
/// - string: trailing digits, or `""` when there are none
/// - number: its decimal rendering
/// - anything else (null, bool, array, object): `""`
pub fn extract_district_id(raw: &Value) -> String {
    match raw {
        Value::String(s) => {
            let id = trailing_digits(s);
            tracing::debug!(input = %s, id, "extracted district id");
            id.to_string()
        }
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => {
            tracing::debug!(input = %other, "district value has unsupported type");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_followed_by_id() {
        assert_eq!(trailing_digits("lahore2"), "2");
        assert_eq!(trailing_digits("Lahore4"), "4");
        assert_eq!(trailing_digits("Dera Ghazi Khan17"), "17");
    }

    #[test]
    fn all_digits() {
        assert_eq!(trailing_digits("42"), "42");
    }

    #[test]
    fn only_trailing_run_is_taken() {
        assert_eq!(trailing_digits("12abc34"), "34");
        assert_eq!(trailing_digits("abc12 "), "");
    }

    #[test]
    fn no_digits() {
        assert_eq!(trailing_digits("Lahore"), "");
        assert_eq!(trailing_digits(""), "");
    }

    #[test]
    fn non_ascii_prefix() {
        assert_eq!(trailing_digits("لاہور7"), "7");
    }

    #[test]
    fn json_string_values() {
        assert_eq!(extract_district_id(&json!("lahore2")), "2");
        assert_eq!(extract_district_id(&json!("42")), "42");
        assert_eq!(extract_district_id(&json!("")), "");
        assert_eq!(extract_district_id(&json!("Multan")), "");
    }

    #[test]
    fn json_numbers_are_stringified() {
        assert_eq!(extract_district_id(&json!(42)), "42");
        assert_eq!(extract_district_id(&json!(0)), "0");
    }

    #[test]
    fn other_json_types_resolve_empty() {
        assert_eq!(extract_district_id(&Value::Null), "");
        assert_eq!(extract_district_id(&json!(true)), "");
        assert_eq!(extract_district_id(&json!(["lahore2"])), "");
        assert_eq!(extract_district_id(&json!({"id": 2})), "");
    }

    #[test]
    fn prefix_plus_digits_always_yields_digits() {
        for prefix in ["a", "Lahore", "x-y_z ", "Rawalpindi "] {
            for digits in ["0", "7", "15", "0042"] {
                let s = format!("{prefix}{digits}");
                assert_eq!(trailing_digits(&s), digits, "input {s:?}");
            }
        }
    }
}
