use metafield_fields::FieldValue;
use serde::Serialize;

use crate::ids::SchemaId;
use crate::types::Field;

/// One entry of an item's effective field list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub field: Field,
    /// Field name, or `"<schema>: <field>"` when the name is shared by
    /// fields of different kinds
    pub display_name: String,
    /// Schema through which the field was first reached
    pub schema_id: SchemaId,
    pub schema_name: String,
    pub display_order: u32,
    pub show_on_summary: bool,
    pub conflicted: bool,
    /// `None` when no value is stored for the item
    pub value: Option<FieldValue>,
}
