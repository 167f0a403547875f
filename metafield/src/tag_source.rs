//! Where item → tag → schema associations come from.

use crate::error::Result;
use crate::ids::{ItemId, SchemaId, TagId};
use crate::store::{tags, Store};
use crate::types::Tag;

/// Read access to the tagging system.
///
/// Resolution walks tags in the order returned by [`TagSource::tags_for_item`],
/// so implementations must return a stable order.
pub trait TagSource: Send + Sync {
    fn tags_for_item(&self, item_id: &ItemId) -> Result<Vec<Tag>>;

    fn schema_for_tag(&self, tag_id: &TagId) -> Result<Option<SchemaId>>;
}

impl TagSource for Store {
    fn tags_for_item(&self, item_id: &ItemId) -> Result<Vec<Tag>> {
        self.read(|conn| tags::tags_for_item(conn, item_id))
    }

    fn schema_for_tag(&self, tag_id: &TagId) -> Result<Option<SchemaId>> {
        self.read(|conn| Ok(tags::require_tag(conn, tag_id)?.schema_id))
    }
}
