//! TagItem and UntagItem commands

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::{ItemId, TagId};
use crate::store::tags;

/// Apply a tag to an item. Returns false when it was already applied.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagItem {
    pub item_id: ItemId,
    pub tag_id: TagId,
}

impl TagItem {
    pub fn new(item_id: ItemId, tag_id: TagId) -> Self {
        Self { item_id, tag_id }
    }
}

impl Execute for TagItem {
    type Output = bool;

    fn execute(&self, ctx: &MetafieldContext) -> Result<bool> {
        let added = ctx.store().write(|conn| {
            tags::require_item(conn, &self.item_id)?;
            tags::require_tag(conn, &self.tag_id)?;
            tags::tag_item(conn, &self.item_id, &self.tag_id)
        })?;
        debug!(item_id = %self.item_id, tag_id = %self.tag_id, added, "tagged item");
        Ok(added)
    }
}

/// Remove a tag from an item. Values the item holds are kept.
/// Returns false when the tag was not applied.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UntagItem {
    pub item_id: ItemId,
    pub tag_id: TagId,
}

impl UntagItem {
    pub fn new(item_id: ItemId, tag_id: TagId) -> Self {
        Self { item_id, tag_id }
    }
}

impl Execute for UntagItem {
    type Output = bool;

    fn execute(&self, ctx: &MetafieldContext) -> Result<bool> {
        let removed = ctx.store().write(|conn| {
            tags::require_item(conn, &self.item_id)?;
            tags::require_tag(conn, &self.tag_id)?;
            tags::untag_item(conn, &self.item_id, &self.tag_id)
        })?;
        debug!(item_id = %self.item_id, tag_id = %self.tag_id, removed, "untagged item");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetafieldError;
    use crate::item::{CreateItem, DeleteItem};
    use crate::tag::{CreateTag, DeleteTag};

    #[test]
    fn test_tag_and_untag() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let item = ctx.run(CreateItem::new("IMG_0001")).unwrap();
        let tag = ctx.run(CreateTag::new("landscape")).unwrap();

        assert!(ctx.run(TagItem::new(item.id, tag.id)).unwrap());
        assert!(!ctx.run(TagItem::new(item.id, tag.id)).unwrap());
        assert!(ctx.run(UntagItem::new(item.id, tag.id)).unwrap());
        assert!(!ctx.run(UntagItem::new(item.id, tag.id)).unwrap());
    }

    #[test]
    fn test_missing_item_or_tag() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let item = ctx.run(CreateItem::new("IMG_0001")).unwrap();
        let tag = ctx.run(CreateTag::new("landscape")).unwrap();

        let err = ctx.run(TagItem::new(ItemId::new(), tag.id)).unwrap_err();
        assert!(matches!(err, MetafieldError::ItemNotFound { .. }));
        let err = ctx.run(TagItem::new(item.id, TagId::new())).unwrap_err();
        assert!(matches!(err, MetafieldError::TagNotFound { .. }));
    }

    #[test]
    fn test_deleting_tag_or_item_cleans_links() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let item = ctx.run(CreateItem::new("IMG_0001")).unwrap();
        let tag = ctx.run(CreateTag::new("landscape")).unwrap();
        ctx.run(TagItem::new(item.id, tag.id)).unwrap();

        ctx.run(DeleteTag::new(tag.id)).unwrap();
        assert!(ctx.tag_source().tags_for_item(&item.id).unwrap().is_empty());

        ctx.run(DeleteItem::new(item.id)).unwrap();
        assert!(ctx
            .run(DeleteItem::new(item.id))
            .unwrap_err()
            .is_not_found());
    }
}
