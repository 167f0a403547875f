//! UpdateField command

use chrono::Utc;
use metafield_fields::{name_key, validate_config, NormalizedName};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::FieldId;
use crate::store::fields;
use crate::types::{Field, FieldPatch};

/// Rename a field or replace its configuration.
///
/// Replacing the configuration may change the kind. Values stored under the
/// old kind are kept but read as unset until overwritten.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateField {
    pub id: FieldId,
    #[serde(flatten)]
    pub patch: FieldPatch,
}

impl UpdateField {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            patch: FieldPatch::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.patch = self.patch.with_name(name);
        self
    }

    pub fn with_config(mut self, config: metafield_fields::FieldConfig) -> Self {
        self.patch = self.patch.with_config(config);
        self
    }
}

impl Execute for UpdateField {
    type Output = Field;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Field> {
        let name = self
            .patch
            .name
            .as_deref()
            .map(NormalizedName::parse)
            .transpose()
            .map_err(MetafieldError::InvalidName)?;
        let config = self.patch.config.as_ref().map(|c| c.trimmed());
        if let Some(config) = &config {
            validate_config(config).map_err(MetafieldError::InvalidConfig)?;
        }

        let field = ctx.store().write(|conn| {
            let mut field = fields::require(conn, &self.id)?;
            if name.is_none() && config.is_none() {
                return Ok(field);
            }

            let key = match name {
                Some(name) => {
                    if fields::name_taken(conn, &field.scope, &name.key, Some(&field.id))? {
                        return Err(MetafieldError::conflict("field", &name.display));
                    }
                    field.name = name.display;
                    name.key
                }
                None => name_key(&field.name),
            };
            if let Some(config) = config {
                field.config = config;
            }
            field.updated_at = Utc::now();
            fields::update(conn, &field, &key)?;
            Ok(field)
        })?;

        debug!(id = %field.id, name = %field.name, kind = %field.kind(), "updated field");
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::CreateField;
    use metafield_fields::FieldConfig;

    #[test]
    fn test_rename_field() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let field = ctx
            .run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
            .unwrap();

        let updated = ctx.run(UpdateField::new(field.id).with_name("Score")).unwrap();
        assert_eq!(updated.name, "Score");
        assert_eq!(updated.config, FieldConfig::scale(5));
        assert!(updated.updated_at >= field.updated_at);
    }

    #[test]
    fn test_rename_to_own_name_with_new_case() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let field = ctx
            .run(CreateField::new("photos", "rating", FieldConfig::scale(5)))
            .unwrap();
        let updated = ctx.run(UpdateField::new(field.id).with_name("Rating")).unwrap();
        assert_eq!(updated.name, "Rating");
    }

    #[test]
    fn test_rename_into_existing_name_conflicts() {
        let ctx = MetafieldContext::in_memory().unwrap();
        ctx.run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
            .unwrap();
        let other = ctx
            .run(CreateField::new("photos", "Notes", FieldConfig::text()))
            .unwrap();

        let err = ctx
            .run(UpdateField::new(other.id).with_name("rating"))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_change_kind() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let field = ctx
            .run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
            .unwrap();
        let updated = ctx
            .run(UpdateField::new(field.id).with_config(FieldConfig::boolean()))
            .unwrap();
        assert_eq!(updated.kind(), metafield_fields::FieldKind::Boolean);
    }

    #[test]
    fn test_update_missing_field() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let err = ctx
            .run(UpdateField::new(FieldId::new()).with_name("x"))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::FieldNotFound { .. }));
    }

    #[test]
    fn test_invalid_config_leaves_field_untouched() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let field = ctx
            .run(CreateField::new("photos", "Verdict", FieldConfig::choice(["Keep"])))
            .unwrap();
        let err = ctx
            .run(UpdateField::new(field.id).with_config(FieldConfig::choice(Vec::<String>::new())))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::InvalidConfig(_)));

        let loaded = ctx.run(crate::field::GetField::new(field.id)).unwrap();
        assert_eq!(loaded, field);
    }
}
