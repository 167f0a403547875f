//! ClearValue command

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::{FieldId, ItemId};
use crate::store::{fields, tags, values};

/// Remove an item's value for a field. Returns false when none was stored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClearValue {
    pub item_id: ItemId,
    pub field_id: FieldId,
}

impl ClearValue {
    pub fn new(item_id: ItemId, field_id: FieldId) -> Self {
        Self { item_id, field_id }
    }
}

impl Execute for ClearValue {
    type Output = bool;

    fn execute(&self, ctx: &MetafieldContext) -> Result<bool> {
        let cleared = ctx.store().write(|conn| {
            tags::require_item(conn, &self.item_id)?;
            fields::require(conn, &self.field_id)?;
            values::delete(conn, &self.item_id, &self.field_id)
        })?;
        debug!(item_id = %self.item_id, field_id = %self.field_id, cleared, "cleared value");
        Ok(cleared)
    }
}
