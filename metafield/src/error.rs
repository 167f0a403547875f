//! Error types for the metafield engine

use metafield_fields::FieldsError;
use thiserror::Error;

use crate::ids::{FieldId, ItemId, SchemaId, Scope, TagId};

/// Result type for metafield operations
pub type Result<T> = std::result::Result<T, MetafieldError>;

/// Errors that can occur in metafield operations
#[derive(Debug, Error)]
pub enum MetafieldError {
    #[error("field not found: {id}")]
    FieldNotFound { id: FieldId },

    #[error("schema not found: {id}")]
    SchemaNotFound { id: SchemaId },

    #[error("tag not found: {id}")]
    TagNotFound { id: TagId },

    #[error("item not found: {id}")]
    ItemNotFound { id: ItemId },

    /// The field exists but is not bound to the schema
    #[error("field {field_id} is not bound to schema {schema_id}")]
    BindingNotFound {
        schema_id: SchemaId,
        field_id: FieldId,
    },

    /// A name collides with an existing one in the same scope
    #[error("a {resource} named '{name}' already exists")]
    Conflict {
        resource: &'static str,
        name: String,
    },

    #[error("invalid name: {0}")]
    InvalidName(#[source] FieldsError),

    #[error("invalid field configuration: {0}")]
    InvalidConfig(#[source] FieldsError),

    #[error("invalid value for field {field_id}: {source}")]
    InvalidValue {
        field_id: FieldId,
        #[source]
        source: FieldsError,
    },

    #[error("invalid binding for field {field_id}: {problem}")]
    InvalidBinding {
        field_id: FieldId,
        problem: BindingProblem,
    },

    /// Field still bound to one or more schemas
    #[error("field {field_id} is bound to {count} schema(s) and cannot be deleted")]
    InUse { field_id: FieldId, count: usize },

    #[error("schema {schema_id} would show {count} fields on summary (limit {limit})")]
    MaxVisibleExceeded {
        schema_id: SchemaId,
        count: usize,
        limit: usize,
    },

    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("failed to encode stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the connection
    #[error("store connection poisoned")]
    Poisoned,
}

/// Why a binding was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingProblem {
    #[error("no such field")]
    UnknownField,

    #[error("field belongs to scope '{field_scope}'")]
    ForeignScope { field_scope: Scope },

    #[error("field listed more than once")]
    DuplicateField,

    #[error("field is already bound to this schema")]
    AlreadyBound,
}

impl MetafieldError {
    pub fn conflict(resource: &'static str, name: impl Into<String>) -> Self {
        Self::Conflict {
            resource,
            name: name.into(),
        }
    }

    pub fn invalid_binding(field_id: FieldId, problem: BindingProblem) -> Self {
        Self::InvalidBinding { field_id, problem }
    }

    /// True for every "does not exist" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound { .. }
                | Self::SchemaNotFound { .. }
                | Self::TagNotFound { .. }
                | Self::ItemNotFound { .. }
                | Self::BindingNotFound { .. }
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// True when the caller's input was rejected before anything was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName(_)
                | Self::InvalidConfig(_)
                | Self::InvalidValue { .. }
                | Self::InvalidBinding { .. }
                | Self::MaxVisibleExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let err = MetafieldError::conflict("field", "Rating");
        assert_eq!(err.to_string(), "a field named 'Rating' already exists");
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_family() {
        let err = MetafieldError::BindingNotFound {
            schema_id: SchemaId::new(),
            field_id: FieldId::new(),
        };
        assert!(err.is_not_found());
        assert!(MetafieldError::TagNotFound { id: TagId::new() }.is_not_found());
    }

    #[test]
    fn test_invalid_binding_mentions_scope() {
        let err = MetafieldError::invalid_binding(
            FieldId::new(),
            BindingProblem::ForeignScope {
                field_scope: Scope::new("other"),
            },
        );
        assert!(err.to_string().contains("scope 'other'"));
        assert!(err.is_validation());
    }
}
