//! GetValues command

use serde::{Deserialize, Serialize};

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::ItemId;
use crate::resolve::ResolveFieldsForItem;
use crate::types::ResolvedField;

/// An item's effective fields with their values, unset ones included.
///
/// Values of fields the item no longer reaches are not returned.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetValues {
    pub item_id: ItemId,
}

impl GetValues {
    pub fn new(item_id: ItemId) -> Self {
        Self { item_id }
    }
}

impl Execute for GetValues {
    type Output = Vec<ResolvedField>;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Vec<ResolvedField>> {
        ResolveFieldsForItem::new(self.item_id).execute(ctx)
    }
}
