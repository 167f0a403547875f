//! CreateItem command

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::ItemId;
use crate::store::tags;
use crate::types::Item;

/// Register an item that can be tagged and carry values
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateItem {
    #[serde(default)]
    pub label: String,
}

impl CreateItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Execute for CreateItem {
    type Output = Item;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Item> {
        let item = Item {
            id: ItemId::new(),
            label: self.label.trim().to_string(),
            created_at: Utc::now(),
        };
        ctx.store().write(|conn| tags::insert_item(conn, &item))?;
        debug!(id = %item.id, label = %item.label, "created item");
        Ok(item)
    }
}
