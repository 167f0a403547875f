//! DeleteItem command

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::ItemId;
use crate::store::tags;

/// Delete an item together with its tags and values
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteItem {
    pub id: ItemId,
}

impl DeleteItem {
    pub fn new(id: ItemId) -> Self {
        Self { id }
    }
}

impl Execute for DeleteItem {
    type Output = ();

    fn execute(&self, ctx: &MetafieldContext) -> Result<()> {
        ctx.store().write(|conn| {
            tags::require_item(conn, &self.id)?;
            tags::delete_item(conn, &self.id)?;
            Ok(())
        })?;
        debug!(id = %self.id, "deleted item");
        Ok(())
    }
}
