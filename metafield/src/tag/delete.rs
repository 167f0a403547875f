//! DeleteTag command

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::TagId;
use crate::store::tags;

/// Delete a tag and remove it from every item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteTag {
    pub id: TagId,
}

impl DeleteTag {
    pub fn new(id: TagId) -> Self {
        Self { id }
    }
}

impl Execute for DeleteTag {
    type Output = ();

    fn execute(&self, ctx: &MetafieldContext) -> Result<()> {
        ctx.store().write(|conn| {
            tags::require_tag(conn, &self.id)?;
            tags::delete_tag(conn, &self.id)?;
            Ok(())
        })?;
        debug!(id = %self.id, "deleted tag");
        Ok(())
    }
}
