//! Role payload mapping: profile + role → the exact body a backend expects.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::district::extract_district_id;
use crate::profile::{ProfileField, UserProfile};
use crate::role::Role;

/// Registration body for one role's backend.
///
/// Every field is always a string. The district reference serializes under
/// [`Role::district_key`], so the same profile produces `district_id` for
/// some backends and `district` for others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePayload {
    pub role: Role,
    pub name: String,
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub district: String,
}

impl RolePayload {
    /// Derive the payload for `role` from a cached profile.
    ///
    /// Total: missing or oddly-typed fields degrade to `""`.
    pub fn from_profile(profile: &UserProfile, role: Role) -> Self {
        let district = profile
            .resolve_raw(ProfileField::District)
            .map(extract_district_id)
            .unwrap_or_default();

        Self {
            role,
            name: profile.resolve(ProfileField::Name),
            national_id: profile.resolve(ProfileField::NationalId),
            email: profile.resolve(ProfileField::Email),
            phone: profile.resolve(ProfileField::Phone),
            district,
        }
    }

    /// Wire keys in serialization order.
    pub fn keys(&self) -> [&'static str; 5] {
        ["name", "cnic", "email", "phone", self.role.district_key()]
    }
}

impl Serialize for RolePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("cnic", &self.national_id)?;
        map.serialize_entry("email", &self.email)?;
        map.serialize_entry("phone", &self.phone)?;
        map.serialize_entry(self.role.district_key(), &self.district)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample() -> UserProfile {
        UserProfile::new()
            .with("name", "Ayesha Khan")
            .with("cnic", "3520112345671")
            .with("email", "ayesha@example.pk")
            .with("contact", "03001234567")
            .with("district", "Lahore4")
    }

    fn as_object(payload: &RolePayload) -> serde_json::Map<String, Value> {
        match serde_json::to_value(payload).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn maps_every_field() {
        let payload = RolePayload::from_profile(&sample(), Role::Expo);
        assert_eq!(payload.name, "Ayesha Khan");
        assert_eq!(payload.national_id, "3520112345671");
        assert_eq!(payload.email, "ayesha@example.pk");
        assert_eq!(payload.phone, "03001234567");
        assert_eq!(payload.district, "4");
    }

    #[test]
    fn district_key_varies_but_value_does_not() {
        let profile = sample();
        let expo = as_object(&RolePayload::from_profile(&profile, Role::Expo));
        let ambassador = as_object(&RolePayload::from_profile(&profile, Role::Ambassador));
        let ypc = as_object(&RolePayload::from_profile(&profile, Role::Ypc));

        assert_eq!(expo.get("district_id"), Some(&json!("4")));
        assert_eq!(ambassador.get("district_id"), Some(&json!("4")));
        assert_eq!(ypc.get("district"), Some(&json!("4")));
        assert!(!ypc.contains_key("district_id"));
        assert!(!expo.contains_key("district"));
    }

    #[test]
    fn fixed_key_set_per_role() {
        for role in Role::ALL {
            let payload = RolePayload::from_profile(&UserProfile::new(), role);
            let obj = as_object(&payload);
            let mut got: Vec<&str> = obj.keys().map(String::as_str).collect();
            let mut want = payload.keys().to_vec();
            got.sort_unstable();
            want.sort_unstable();
            assert_eq!(got, want, "role {role}");
        }
    }

    #[test]
    fn every_field_is_a_string_for_any_profile() {
        let profiles = [
            UserProfile::new(),
            sample(),
            UserProfile::new()
                .with("Name", "A")
                .with("CNIC", "1")
                .with("Email", "e")
                .with("Contact", "c")
                .with("District", "Multan9"),
            UserProfile::new()
                .with("name", Value::Null)
                .with("district", json!(["x"]))
                .with("cnic", json!(12)),
        ];
        for profile in &profiles {
            for role in Role::ALL {
                let obj = as_object(&RolePayload::from_profile(profile, role));
                assert_eq!(obj.len(), 5);
                assert!(obj.values().all(Value::is_string), "{obj:?}");
            }
        }
    }

    #[test]
    fn numeric_district_is_stringified() {
        let profile = UserProfile::new().with("District", json!(42));
        let payload = RolePayload::from_profile(&profile, Role::Ypc);
        assert_eq!(payload.district, "42");
    }

    #[test]
    fn missing_or_blank_district_is_empty() {
        let blank = UserProfile::new().with("district", "");
        assert_eq!(RolePayload::from_profile(&blank, Role::Expo).district, "");
        assert_eq!(RolePayload::from_profile(&UserProfile::new(), Role::Expo).district, "");
    }

    #[test]
    fn national_id_serializes_as_cnic() {
        let obj = as_object(&RolePayload::from_profile(&sample(), Role::Ypc));
        assert_eq!(obj.get("cnic"), Some(&json!("3520112345671")));
        assert_eq!(obj.get("phone"), Some(&json!("03001234567")));
    }
}
