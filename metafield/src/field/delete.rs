//! DeleteField command

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::FieldId;
use crate::store::fields;

/// Delete a field that no schema binds. Stored values for it are removed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteField {
    pub id: FieldId,
}

impl DeleteField {
    pub fn new(id: FieldId) -> Self {
        Self { id }
    }
}

impl Execute for DeleteField {
    type Output = ();

    fn execute(&self, ctx: &MetafieldContext) -> Result<()> {
        ctx.store().write(|conn| {
            fields::require(conn, &self.id)?;
            let count = fields::binding_count(conn, &self.id)?;
            if count > 0 {
                warn!(id = %self.id, count, "refusing to delete bound field");
                return Err(MetafieldError::InUse {
                    field_id: self.id,
                    count,
                });
            }
            fields::delete(conn, &self.id)?;
            Ok(())
        })?;
        debug!(id = %self.id, "deleted field");
        Ok(())
    }
}
