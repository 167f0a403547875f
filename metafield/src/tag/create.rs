//! CreateTag command

use chrono::Utc;
use metafield_fields::NormalizedName;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::{SchemaId, TagId};
use crate::store::{schemas, tags};
use crate::types::Tag;

/// Create a tag, optionally attached to a schema
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTag {
    pub name: String,
    #[serde(default)]
    pub schema_id: Option<SchemaId>,
}

impl CreateTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_id: None,
        }
    }

    pub fn with_schema(mut self, schema_id: SchemaId) -> Self {
        self.schema_id = Some(schema_id);
        self
    }
}

impl Execute for CreateTag {
    type Output = Tag;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Tag> {
        let name = NormalizedName::parse(&self.name).map_err(MetafieldError::InvalidName)?;
        let tag = Tag {
            id: TagId::new(),
            name: name.display,
            schema_id: self.schema_id,
            created_at: Utc::now(),
        };

        ctx.store().write(|conn| {
            if let Some(schema_id) = &tag.schema_id {
                if !schemas::exists(conn, schema_id)? {
                    return Err(MetafieldError::SchemaNotFound { id: *schema_id });
                }
            }
            tags::insert_tag(conn, &tag, &name.key)
        })?;

        debug!(id = %tag.id, name = %tag.name, "created tag");
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tag() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let tag = ctx.run(CreateTag::new(" landscape ")).unwrap();
        assert_eq!(tag.name, "landscape");
        assert!(tag.schema_id.is_none());

        let err = ctx.run(CreateTag::new("Landscape")).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_create_tag_with_missing_schema() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let err = ctx
            .run(CreateTag::new("landscape").with_schema(SchemaId::new()))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::SchemaNotFound { .. }));
    }
}
