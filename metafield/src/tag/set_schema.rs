//! SetTagSchema command

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::{SchemaId, TagId};
use crate::store::{schemas, tags};
use crate::types::Tag;

/// Attach a schema to a tag, or detach it with `None`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetTagSchema {
    pub tag_id: TagId,
    pub schema_id: Option<SchemaId>,
}

impl SetTagSchema {
    pub fn new(tag_id: TagId, schema_id: Option<SchemaId>) -> Self {
        Self { tag_id, schema_id }
    }
}

impl Execute for SetTagSchema {
    type Output = Tag;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Tag> {
        let tag = ctx.store().write(|conn| {
            let mut tag = tags::require_tag(conn, &self.tag_id)?;
            if let Some(schema_id) = &self.schema_id {
                if !schemas::exists(conn, schema_id)? {
                    return Err(MetafieldError::SchemaNotFound { id: *schema_id });
                }
            }
            tags::set_tag_schema(conn, &tag.id, self.schema_id.as_ref())?;
            tag.schema_id = self.schema_id;
            Ok(tag)
        })?;
        debug!(id = %tag.id, schema_id = ?tag.schema_id, "set tag schema");
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CreateSchema, DeleteSchema};
    use crate::tag::{CreateTag, ListTags};

    #[test]
    fn test_attach_and_detach() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let schema = ctx.run(CreateSchema::new("photos", "Quality")).unwrap();
        let tag = ctx.run(CreateTag::new("landscape")).unwrap();

        let tag = ctx
            .run(SetTagSchema::new(tag.id, Some(schema.id)))
            .unwrap();
        assert_eq!(tag.schema_id, Some(schema.id));

        let tag = ctx.run(SetTagSchema::new(tag.id, None)).unwrap();
        assert!(tag.schema_id.is_none());
    }

    #[test]
    fn test_schema_delete_detaches_tags() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let schema = ctx.run(CreateSchema::new("photos", "Quality")).unwrap();
        ctx.run(CreateTag::new("landscape").with_schema(schema.id))
            .unwrap();

        ctx.run(DeleteSchema::new(schema.id)).unwrap();
        let tags = ctx.run(ListTags).unwrap();
        assert_eq!(tags.len(), 1);
        assert!(tags[0].schema_id.is_none());
    }

    #[test]
    fn test_missing_tag() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let err = ctx
            .run(SetTagSchema::new(TagId::new(), None))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::TagNotFound { .. }));
    }
}
