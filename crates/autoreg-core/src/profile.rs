//! Cached user profile and declarative field resolution.
//!
//! The profile is written by the sign-in flow, which is not consistent about
//! key casing (`name` in some builds, `Name` in others). Rather than guess a
//! schema, the raw JSON object is kept and every canonical field is resolved
//! through an ordered list of candidate keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical profile fields consumed by the payload mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    NationalId,
    Email,
    Phone,
    District,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::Name,
        ProfileField::NationalId,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::District,
    ];

    /// Candidate keys in priority order. The first one present wins.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            ProfileField::Name => &["name", "Name"],
            ProfileField::NationalId => &["cnic", "CNIC"],
            ProfileField::Email => &["email", "Email"],
            ProfileField::Phone => &["contact", "Contact"],
            ProfileField::District => &["district", "District"],
        }
    }
}

/// The signed-in user's profile as cached on the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile {
    fields: Map<String, Value>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a cached profile leniently.
    ///
    /// Empty input, malformed JSON, and JSON that is not an object all yield
    /// an empty profile.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => Self { fields },
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "cached profile is not an object");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(%err, "cached profile is not valid JSON");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First candidate value for `field` that is present and not `null`.
    pub fn resolve_raw(&self, field: ProfileField) -> Option<&Value> {
        field
            .candidates()
            .iter()
            .find_map(|key| self.fields.get(*key).filter(|v| !v.is_null()))
    }

    /// Resolve `field` to a string, never failing.
    ///
    /// Strings are returned as-is, numbers and booleans are rendered, and
    /// missing values or containers resolve to `""`.
    pub fn resolve(&self, field: ProfileField) -> String {
        self.resolve_raw(field).map(scalar_string).unwrap_or_default()
    }

    /// The national id, if the profile carries a non-empty one.
    pub fn national_id(&self) -> Option<String> {
        Some(self.resolve(ProfileField::NationalId)).filter(|id| !id.is_empty())
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lowercase_keys() {
        let p = UserProfile::from_json(r#"{"name":"Ayesha","cnic":"3520112345671"}"#);
        assert_eq!(p.resolve(ProfileField::Name), "Ayesha");
        assert_eq!(p.national_id().as_deref(), Some("3520112345671"));
    }

    #[test]
    fn capitalized_keys() {
        let p = UserProfile::from_json(r#"{"Name":"Ayesha","CNIC":"3520112345671","Contact":"03001234567"}"#);
        assert_eq!(p.resolve(ProfileField::Name), "Ayesha");
        assert_eq!(p.resolve(ProfileField::NationalId), "3520112345671");
        assert_eq!(p.resolve(ProfileField::Phone), "03001234567");
    }

    #[test]
    fn lowercase_wins_when_both_present() {
        let p = UserProfile::new().with("name", "lower").with("Name", "Upper");
        assert_eq!(p.resolve(ProfileField::Name), "lower");
    }

    #[test]
    fn empty_lowercase_still_wins_but_null_does_not() {
        let p = UserProfile::new().with("email", "").with("Email", "a@b.pk");
        assert_eq!(p.resolve(ProfileField::Email), "");

        let p = UserProfile::new().with("email", Value::Null).with("Email", "a@b.pk");
        assert_eq!(p.resolve(ProfileField::Email), "a@b.pk");
    }

    #[test]
    fn numbers_and_bools_are_rendered() {
        let p = UserProfile::new()
            .with("cnic", json!(3520112345671_u64))
            .with("name", json!(true));
        assert_eq!(p.resolve(ProfileField::NationalId), "3520112345671");
        assert_eq!(p.resolve(ProfileField::Name), "true");
    }

    #[test]
    fn containers_resolve_empty() {
        let p = UserProfile::new().with("name", json!({"first": "A"}));
        assert_eq!(p.resolve(ProfileField::Name), "");
    }

    #[test]
    fn missing_fields_resolve_empty() {
        let p = UserProfile::new();
        for field in ProfileField::ALL {
            assert_eq!(p.resolve(field), "");
        }
        assert!(p.national_id().is_none());
    }

    #[test]
    fn blank_national_id_is_absent() {
        let p = UserProfile::new().with("cnic", "");
        assert!(p.national_id().is_none());
    }

    #[test]
    fn malformed_json_is_empty_profile() {
        assert!(UserProfile::from_json("").is_empty());
        assert!(UserProfile::from_json("   ").is_empty());
        assert!(UserProfile::from_json("{not json").is_empty());
        assert!(UserProfile::from_json("[1,2,3]").is_empty());
        assert!(UserProfile::from_json("\"cnic\"").is_empty());
    }

    #[test]
    fn to_json_preserves_fields() {
        let p = UserProfile::new().with("cnic", "1").with("District", "Lahore4");
        let back = UserProfile::from_json(&p.to_json());
        assert_eq!(back, p);
    }
}
