//! Local profile store: the device-scoped key-value cache holding the signed-in
//! user's profile and per-role "registered" markers.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use autoreg_core::{Role, UserProfile};

/// Key of the cached, JSON-serialized user profile.
pub const USER_PROFILE_KEY: &str = "user_profile";

/// Value written under `registered_<role>` after a confirmed registration.
pub const REGISTERED_FLAG_VALUE: &str = "true";

/// Opaque durable key-value cache. Last write wins; no transactions.
pub trait ProfileStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read and leniently parse the cached profile.
///
/// `Ok(None)` means nothing is cached. A cached value that fails to parse is
/// returned as an empty profile, not an error.
pub fn load_profile(store: &dyn ProfileStore) -> Result<Option<UserProfile>, StoreError> {
    let raw = store.get(USER_PROFILE_KEY)?;
    Ok(raw.map(|raw| UserProfile::from_json(&raw)))
}

pub fn save_profile(store: &dyn ProfileStore, profile: &UserProfile) -> Result<(), StoreError> {
    store.set(USER_PROFILE_KEY, &profile.to_json())
}

/// Persist the "registered" marker for `role`.
pub fn mark_registered(store: &dyn ProfileStore, role: Role) -> Result<(), StoreError> {
    let key = role.registered_flag_key();
    store.set(&key, REGISTERED_FLAG_VALUE)?;
    tracing::info!(%key, "marked role as registered");
    Ok(())
}

pub fn is_registered(store: &dyn ProfileStore, role: Role) -> Result<bool, StoreError> {
    let value = store.get(&role.registered_flag_key())?;
    Ok(value.as_deref() == Some(REGISTERED_FLAG_VALUE))
}
