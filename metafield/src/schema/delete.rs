//! DeleteSchema command

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::SchemaId;
use crate::store::schemas;

/// Delete a schema and all of its bindings. Tags that referenced it are
/// left without a schema. Fields and values are untouched.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteSchema {
    pub id: SchemaId,
}

impl DeleteSchema {
    pub fn new(id: SchemaId) -> Self {
        Self { id }
    }
}

impl Execute for DeleteSchema {
    type Output = ();

    fn execute(&self, ctx: &MetafieldContext) -> Result<()> {
        let removed_bindings = ctx.store().write(|conn| {
            let schema = schemas::require(conn, &self.id)?;
            schemas::delete(conn, &self.id)?;
            Ok(schema.bindings.len())
        })?;
        debug!(id = %self.id, removed_bindings, "deleted schema");
        Ok(())
    }
}
