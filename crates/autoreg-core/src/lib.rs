pub mod district;
pub mod payload;
pub mod profile;
pub mod role;
pub mod status;

pub use district::{extract_district_id, trailing_digits};
pub use payload::RolePayload;
pub use profile::{ProfileField, UserProfile};
pub use role::{Role, UnknownRole};
pub use status::ReconciliationStatus;
