use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{FieldId, SchemaId, Scope};
use crate::types::Field;

/// A named, ordered group of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub id: SchemaId,
    pub scope: Scope,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Sorted by `display_order`, which runs densely from 0
    pub bindings: Vec<SchemaBinding>,
}

impl Schema {
    pub fn binding(&self, field_id: &FieldId) -> Option<&SchemaBinding> {
        self.bindings.iter().find(|b| &b.field.id == field_id)
    }

    /// Number of bindings flagged for summary display.
    pub fn visible_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.show_on_summary).count()
    }
}

/// A field's membership in a schema, joined with the field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaBinding {
    pub field: Field,
    pub display_order: u32,
    pub show_on_summary: bool,
}

/// Requested placement of a field inside a schema.
///
/// `display_order` is a sort key. Stored orders are always renumbered
/// densely, so callers may pass gaps or duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub field_id: FieldId,
    pub display_order: i64,
    #[serde(default)]
    pub show_on_summary: bool,
}

impl BindingSpec {
    pub fn new(field_id: FieldId, display_order: i64) -> Self {
        Self {
            field_id,
            display_order,
            show_on_summary: false,
        }
    }

    pub fn shown(mut self) -> Self {
        self.show_on_summary = true;
        self
    }
}

/// Partial update of a schema's own attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
