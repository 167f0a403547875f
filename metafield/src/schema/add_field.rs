//! AddFieldToSchema command

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{BindingProblem, MetafieldError, Result};
use crate::ids::{FieldId, SchemaId};
use crate::store::{fields, schemas};
use crate::types::Schema;
use crate::visibility::{check_visible_limit, renumber};

/// Bind a field to a schema, after every existing binding
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddFieldToSchema {
    pub schema_id: SchemaId,
    pub field_id: FieldId,
    #[serde(default)]
    pub show_on_summary: bool,
}

impl AddFieldToSchema {
    pub fn new(schema_id: SchemaId, field_id: FieldId) -> Self {
        Self {
            schema_id,
            field_id,
            show_on_summary: false,
        }
    }

    pub fn shown(mut self) -> Self {
        self.show_on_summary = true;
        self
    }
}

impl Execute for AddFieldToSchema {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        let schema = ctx.store().write(|conn| {
            let schema = schemas::require(conn, &self.schema_id)?;
            let field = fields::require(conn, &self.field_id)?;
            if field.scope != schema.scope {
                return Err(MetafieldError::invalid_binding(
                    field.id,
                    BindingProblem::ForeignScope {
                        field_scope: field.scope,
                    },
                ));
            }
            if schema.binding(&field.id).is_some() {
                return Err(MetafieldError::invalid_binding(
                    field.id,
                    BindingProblem::AlreadyBound,
                ));
            }

            let placed = renumber(
                schema
                    .bindings
                    .iter()
                    .map(|b| (b.field.id, b.show_on_summary))
                    .chain(std::iter::once((field.id, self.show_on_summary))),
            );
            check_visible_limit(&schema.id, &placed)?;

            if let Some(new) = placed.last() {
                schemas::insert_binding(conn, &schema.id, new)?;
            }
            schemas::touch(conn, &schema.id, Utc::now())?;
            schemas::require(conn, &schema.id)
        })?;

        debug!(
            schema_id = %self.schema_id,
            field_id = %self.field_id,
            bindings = schema.bindings.len(),
            "added field to schema"
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::CreateField;
    use crate::schema::test_support::fields;
    use crate::schema::CreateSchema;
    use crate::types::BindingSpec;
    use metafield_fields::FieldConfig;

    #[test]
    fn test_add_appends() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let f = fields(&ctx, &["A", "B"]);
        let schema = ctx
            .run(CreateSchema::new("photos", "Quality").with_binding(BindingSpec::new(f[0].id, 7)))
            .unwrap();

        let schema = ctx
            .run(AddFieldToSchema::new(schema.id, f[1].id).shown())
            .unwrap();
        let last = schema.bindings.last().unwrap();
        assert_eq!(last.field.id, f[1].id);
        assert_eq!(last.display_order, 1);
        assert!(last.show_on_summary);
    }

    #[test]
    fn test_add_twice_rejected() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let f = fields(&ctx, &["A"]);
        let schema = ctx.run(CreateSchema::new("photos", "Quality")).unwrap();
        ctx.run(AddFieldToSchema::new(schema.id, f[0].id)).unwrap();
        let err = ctx
            .run(AddFieldToSchema::new(schema.id, f[0].id))
            .unwrap_err();
        assert!(matches!(
            err,
            MetafieldError::InvalidBinding {
                problem: BindingProblem::AlreadyBound,
                ..
            }
        ));
    }

    #[test]
    fn test_add_visible_over_limit() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let f = fields(&ctx, &["A", "B", "C", "D"]);
        let schema = ctx
            .run(CreateSchema::new("photos", "Quality").with_bindings(
                f[..3]
                    .iter()
                    .enumerate()
                    .map(|(i, field)| BindingSpec::new(field.id, i as i64).shown()),
            ))
            .unwrap();
        let err = ctx
            .run(AddFieldToSchema::new(schema.id, f[3].id).shown())
            .unwrap_err();
        assert!(matches!(err, MetafieldError::MaxVisibleExceeded { .. }));

        let schema = ctx.run(AddFieldToSchema::new(schema.id, f[3].id)).unwrap();
        assert_eq!(schema.bindings.len(), 4);
    }

    #[test]
    fn test_add_foreign_field() {
        let ctx = MetafieldContext::in_memory().unwrap();
        let foreign = ctx
            .run(CreateField::new("docs", "Notes", FieldConfig::text()))
            .unwrap();
        let schema = ctx.run(CreateSchema::new("photos", "Quality")).unwrap();
        let err = ctx
            .run(AddFieldToSchema::new(schema.id, foreign.id))
            .unwrap_err();
        assert!(matches!(err, MetafieldError::InvalidBinding { .. }));
    }
}
