//! ResolveFieldsForItem command

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use metafield_fields::value_from_slots;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::{ItemId, SchemaId};
use crate::resolve::engine::resolve;
use crate::store::{schemas, tags, values};
use crate::types::ResolvedField;

/// Compute the effective fields of an item, joined with its stored values.
///
/// Schemas are encountered in the order the tag source returns tags. A
/// stored value that the field's current configuration would reject reads
/// as unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolveFieldsForItem {
    pub item_id: ItemId,
}

impl ResolveFieldsForItem {
    pub fn new(item_id: ItemId) -> Self {
        Self { item_id }
    }
}

impl Execute for ResolveFieldsForItem {
    type Output = Vec<ResolvedField>;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Vec<ResolvedField>> {
        ctx.store()
            .read(|conn| tags::require_item(conn, &self.item_id))?;

        let source = ctx.tag_source();
        let mut encountered: IndexSet<SchemaId> = IndexSet::new();
        for tag in source.tags_for_item(&self.item_id)? {
            if let Some(schema_id) = source.schema_for_tag(&tag.id)? {
                encountered.insert(schema_id);
            }
        }
        let schema_ids: Vec<SchemaId> = encountered.into_iter().collect();
        if schema_ids.is_empty() {
            debug!(item_id = %self.item_id, "item reaches no schemas");
            return Ok(Vec::new());
        }

        let (reachable, stored) = ctx.store().read(|conn| {
            Ok((
                schemas::reachable_bindings(conn, &schema_ids)?,
                values::for_item(conn, &self.item_id)?,
            ))
        })?;

        let mut resolved = resolve(reachable);
        for entry in &mut resolved {
            entry.value = stored
                .get(&entry.field.id)
                .and_then(|slots| value_from_slots(&entry.field.config, slots));
        }

        debug!(
            item_id = %self.item_id,
            schemas = schema_ids.len(),
            fields = resolved.len(),
            conflicted = resolved.iter().filter(|r| r.conflicted).count(),
            "resolved item fields"
        );
        Ok(resolved)
    }
}
