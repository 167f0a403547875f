//! UpdateSchema command

use chrono::Utc;
use metafield_fields::{name_key, NormalizedName};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::SchemaId;
use crate::store::schemas;
use crate::types::{Schema, SchemaPatch};

/// Rename a schema or change its description
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateSchema {
    pub id: SchemaId,
    #[serde(flatten)]
    pub patch: SchemaPatch,
}

impl UpdateSchema {
    pub fn new(id: SchemaId) -> Self {
        Self {
            id,
            patch: SchemaPatch::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.patch = self.patch.with_name(name);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.patch = self.patch.with_description(description);
        self
    }
}

impl Execute for UpdateSchema {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        let name = self
            .patch
            .name
            .as_deref()
            .map(NormalizedName::parse)
            .transpose()
            .map_err(MetafieldError::InvalidName)?;

        let schema = ctx.store().write(|conn| {
            let mut schema = schemas::require(conn, &self.id)?;
            if self.patch.is_empty() {
                return Ok(schema);
            }

            let key = match name {
                Some(name) => {
                    if schemas::name_taken(conn, &schema.scope, &name.key, Some(&schema.id))? {
                        return Err(MetafieldError::conflict("schema", &name.display));
                    }
                    schema.name = name.display;
                    name.key
                }
                None => name_key(&schema.name),
            };
            if let Some(description) = &self.patch.description {
                schema.description = description.trim().to_string();
            }
            schema.updated_at = Utc::now();
            schemas::update(conn, &schema, &key)?;
            Ok(schema)
        })?;

        debug!(id = %schema.id, name = %schema.name, "updated schema");
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CreateSchema;

    #[test]
    fn test_update_schema_name_and_description() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let schema = ctx.run(CreateSchema::new("photos", "Quality")).unwrap();

        let updated = ctx
            .run(
                UpdateSchema::new(schema.id)
                    .with_name("Grade")
                    .with_description("Graded by hand"),
            )
            .unwrap();
        assert_eq!(updated.name, "Grade");
        assert_eq!(updated.description, "Graded by hand");
    }

    #[test]
    fn test_rename_conflict() {
        let ctx = MetafieldContext::in_memory().unwrap();
        ctx.run(CreateSchema::new("photos", "Quality")).unwrap();
        let other = ctx.run(CreateSchema::new("photos", "Review")).unwrap();

        let err = ctx
            .run(UpdateSchema::new(other.id).with_name("QUALITY"))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_update_missing_schema() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let err = ctx
            .run(UpdateSchema::new(SchemaId::new()).with_name("x"))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::SchemaNotFound { .. }));
    }
}
