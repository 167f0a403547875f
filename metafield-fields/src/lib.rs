//! Field types and validation
//!
//! `metafield-fields` is a storage-free crate that defines what a custom field
//! *is*: its kind, its per-kind configuration, and the typed value it holds
//! for an item. It knows nothing about schemas, tags or the database.
//!
//! # Architecture
//!
//! - **Tagged configuration**: `FieldConfig` is a variant per `FieldKind`
//! - **Dispatch table**: one rules entry per kind validates configs, coerces
//!   raw JSON values and reads storage slots
//! - **Name identity**: names compare trimmed, whitespace-collapsed and
//!   case-insensitively

pub mod error;
pub mod name;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use name::{name_key, NormalizedName, MAX_NAME_LEN};
pub use types::{FieldConfig, FieldKind, FieldValue, UnknownFieldKind, ValueSlots};
pub use validation::{
    coerce_value, validate_config, value_from_slots, SCALE_MAX_RANGE, TEXT_MAX_LENGTH_LIMIT,
};
