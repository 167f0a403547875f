//! RemoveFieldFromSchema command

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, SchemaId};
use crate::store::schemas;
use crate::types::Schema;
use crate::visibility::renumber;

/// Unbind a field from a schema. The remaining bindings are renumbered and
/// keep their summary flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveFieldFromSchema {
    pub schema_id: SchemaId,
    pub field_id: FieldId,
}

impl RemoveFieldFromSchema {
    pub fn new(schema_id: SchemaId, field_id: FieldId) -> Self {
        Self {
            schema_id,
            field_id,
        }
    }
}

impl Execute for RemoveFieldFromSchema {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        let schema = ctx.store().write(|conn| {
            let schema = schemas::require(conn, &self.schema_id)?;
            if !schemas::delete_binding(conn, &schema.id, &self.field_id)? {
                return Err(MetafieldError::BindingNotFound {
                    schema_id: schema.id,
                    field_id: self.field_id,
                });
            }

            let placed = renumber(
                schema
                    .bindings
                    .iter()
                    .filter(|b| b.field.id != self.field_id)
                    .map(|b| (b.field.id, b.show_on_summary)),
            );
            schemas::update_bindings(conn, &schema.id, &placed)?;
            schemas::touch(conn, &schema.id, Utc::now())?;
            schemas::require(conn, &schema.id)
        })?;

        debug!(
            schema_id = %self.schema_id,
            field_id = %self.field_id,
            "removed field from schema"
        );
        Ok(schema)
    }
}
