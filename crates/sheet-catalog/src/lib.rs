//! Field catalogs and synonym dictionaries for spreadsheet imports.
//!
//! Two profiles ship with the crate (`property` and `customer`); others can be
//! loaded from TOML files with [`load_profile`].

#![deny(unsafe_code)]

pub mod builtin;
pub mod customer;
pub mod error;
pub mod loader;
pub mod property;
pub mod template;

pub use builtin::{BUILTIN_PROFILES, builtin_profile};
pub use customer::{customer_catalog, customer_profile, customer_synonyms};
pub use error::CatalogError;
pub use loader::{check_profile, load_profile, profile_from_str};
pub use property::{property_catalog, property_profile, property_synonyms};
pub use template::{TemplateSheet, build_template};
