//! Built-in profiles, built once per process.

use std::sync::LazyLock;

use sheet_model::ImportProfile;

use crate::error::CatalogError;
use crate::{customer, property};

static PROPERTY_PROFILE: LazyLock<ImportProfile> = LazyLock::new(|| {
    property::property_profile().expect("Invalid built-in property profile")
});

static CUSTOMER_PROFILE: LazyLock<ImportProfile> = LazyLock::new(|| {
    customer::customer_profile().expect("Invalid built-in customer profile")
});

/// Names accepted by [`builtin_profile`].
pub const BUILTIN_PROFILES: &[&str] = &[property::PROFILE_NAME, customer::PROFILE_NAME];

/// Look up a built-in profile by name (case-insensitive).
pub fn builtin_profile(name: &str) -> Result<&'static ImportProfile, CatalogError> {
    match name.trim().to_ascii_lowercase().as_str() {
        property::PROFILE_NAME => Ok(&PROPERTY_PROFILE),
        customer::PROFILE_NAME => Ok(&CUSTOMER_PROFILE),
        _ => Err(CatalogError::UnknownProfile {
            name: name.to_string(),
            expected: BUILTIN_PROFILES.join(", "),
        }),
    }
}
