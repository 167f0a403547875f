//! CreateField command

use chrono::Utc;
use metafield_fields::{validate_config, FieldConfig, NormalizedName};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, Scope};
use crate::store::fields;
use crate::types::Field;

/// Create a field definition in a scope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateField {
    pub scope: Scope,
    pub name: String,
    pub config: FieldConfig,
}

impl CreateField {
    pub fn new(scope: impl Into<Scope>, name: impl Into<String>, config: FieldConfig) -> Self {
        Self {
            scope: scope.into(),
            name: name.into(),
            config,
        }
    }
}

impl Execute for CreateField {
    type Output = Field;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Field> {
        let name = NormalizedName::parse(&self.name).map_err(MetafieldError::InvalidName)?;
        let config = self.config.trimmed();
        validate_config(&config).map_err(MetafieldError::InvalidConfig)?;

        let now = Utc::now();
        let field = Field {
            id: FieldId::new(),
            scope: self.scope.clone(),
            name: name.display,
            config,
            created_at: now,
            updated_at: now,
        };

        ctx.store().write(|conn| {
            if fields::name_taken(conn, &field.scope, &name.key, None)? {
                return Err(MetafieldError::conflict("field", &field.name));
            }
            fields::insert(conn, &field, &name.key)
        })?;

        debug!(
            id = %field.id,
            scope = %field.scope,
            name = %field.name,
            kind = %field.kind(),
            "created field"
        );
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metafield_fields::FieldsError;

    #[test]
    fn test_create_field() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let field = ctx
            .run(CreateField::new("photos", "  Rating ", FieldConfig::scale(5)))
            .unwrap();

        assert_eq!(field.name, "Rating");
        assert_eq!(field.scope, Scope::new("photos"));
        assert_eq!(field.config, FieldConfig::scale(5));
        assert_eq!(field.created_at, field.updated_at);
    }

    #[test]
    fn test_duplicate_name_conflicts_ignoring_case_and_spaces() {
        let ctx = MetafieldContext::in_memory().unwrap();
        ctx.run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
            .unwrap();

        for name in ["rating ", "RATING", " Rating"] {
            let err = ctx
                .run(CreateField::new("photos", name, FieldConfig::text()))
                .unwrap_err();
            assert!(err.is_conflict(), "{name:?}: {err:?}");
        }
    }

    #[test]
    fn test_choice_options_are_trimmed() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let field = ctx
            .run(CreateField::new(
                "photos",
                "Verdict",
                FieldConfig::choice([" Keep ", "Archive"]),
            ))
            .unwrap();
        assert_eq!(field.config.options(), ["Keep", "Archive"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let err = ctx
            .run(CreateField::new("photos", "Rating", FieldConfig::scale(11)))
            .unwrap_err();
        assert!(matches!(
            err,
            MetafieldError::InvalidConfig(FieldsError::ScaleMaxOutOfRange { max: 11, .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let err = ctx
            .run(CreateField::new("photos", "   ", FieldConfig::boolean()))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::InvalidName(FieldsError::EmptyName)));
    }
}
