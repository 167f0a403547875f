//! SetShowOnSummary command

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, SchemaId};
use crate::store::schemas;
use crate::types::Schema;
use crate::visibility::{check_visible_limit, renumber};

/// Show or hide one bound field on summaries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetShowOnSummary {
    pub schema_id: SchemaId,
    pub field_id: FieldId,
    pub show: bool,
}

impl SetShowOnSummary {
    pub fn new(schema_id: SchemaId, field_id: FieldId, show: bool) -> Self {
        Self {
            schema_id,
            field_id,
            show,
        }
    }
}

impl Execute for SetShowOnSummary {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        let schema = ctx.store().write(|conn| {
            let schema = schemas::require(conn, &self.schema_id)?;
            if schema.binding(&self.field_id).is_none() {
                return Err(MetafieldError::BindingNotFound {
                    schema_id: schema.id,
                    field_id: self.field_id,
                });
            }

            let placed = renumber(schema.bindings.iter().map(|b| {
                let show = if b.field.id == self.field_id {
                    self.show
                } else {
                    b.show_on_summary
                };
                (b.field.id, show)
            }));
            check_visible_limit(&schema.id, &placed)?;

            schemas::update_bindings(conn, &schema.id, &placed)?;
            schemas::touch(conn, &schema.id, Utc::now())?;
            schemas::require(conn, &schema.id)
        })?;

        debug!(
            schema_id = %self.schema_id,
            field_id = %self.field_id,
            show = self.show,
            "set show on summary"
        );
        Ok(schema)
    }
}
