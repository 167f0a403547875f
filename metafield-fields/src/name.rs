//! Name normalization shared by fields, schemas and tags.
//!
//! Names are stored trimmed. Identity is decided by the *key*: trimmed,
//! internal whitespace runs collapsed to a single space, lowercased. Two
//! names with the same key collide.

use serde::Serialize;

use crate::error::{FieldsError, Result};

/// Maximum name length in characters, measured after trimming.
pub const MAX_NAME_LEN: usize = 255;

/// A validated name and its identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedName {
    /// Trimmed name as the user wrote it
    pub display: String,
    /// Case- and whitespace-insensitive identity
    pub key: String,
}

impl NormalizedName {
    /// Trim and validate a raw name.
    pub fn parse(raw: &str) -> Result<Self> {
        let display = raw.trim();
        if display.is_empty() {
            return Err(FieldsError::EmptyName);
        }
        let len = display.chars().count();
        if len > MAX_NAME_LEN {
            return Err(FieldsError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self {
            display: display.to_string(),
            key: name_key(display),
        })
    }
}

/// Identity key of a name. Does not validate.
pub fn name_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
