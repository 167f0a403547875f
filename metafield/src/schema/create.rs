//! CreateSchema command

use std::collections::HashSet;

use chrono::Utc;
use metafield_fields::NormalizedName;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{BindingProblem, MetafieldError, Result};
use crate::ids::{SchemaId, Scope};
use crate::store::{fields, schemas};
use crate::types::{BindingSpec, Schema};
use crate::visibility::{check_visible_limit, place};

/// Create a schema with an initial set of bindings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSchema {
    pub scope: Scope,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
}

impl CreateSchema {
    pub fn new(scope: impl Into<Scope>, name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            name: name.into(),
            description: String::new(),
            bindings: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_binding(mut self, binding: BindingSpec) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = BindingSpec>) -> Self {
        self.bindings.extend(bindings);
        self
    }
}

impl Execute for CreateSchema {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        let name = NormalizedName::parse(&self.name).map_err(MetafieldError::InvalidName)?;

        let mut seen = HashSet::new();
        for spec in &self.bindings {
            if !seen.insert(spec.field_id) {
                return Err(MetafieldError::invalid_binding(
                    spec.field_id,
                    BindingProblem::DuplicateField,
                ));
            }
        }

        let id = SchemaId::new();
        let placed = place(&self.bindings);
        check_visible_limit(&id, &placed)?;

        let now = Utc::now();
        let schema = Schema {
            id,
            scope: self.scope.clone(),
            name: name.display,
            description: self.description.trim().to_string(),
            created_at: now,
            updated_at: now,
            bindings: Vec::new(),
        };

        let schema = ctx.store().write(|conn| {
            for binding in &placed {
                match fields::get(conn, &binding.field_id)? {
                    None => {
                        return Err(MetafieldError::invalid_binding(
                            binding.field_id,
                            BindingProblem::UnknownField,
                        ))
                    }
                    Some(field) if field.scope != schema.scope => {
                        return Err(MetafieldError::invalid_binding(
                            binding.field_id,
                            BindingProblem::ForeignScope {
                                field_scope: field.scope,
                            },
                        ))
                    }
                    Some(_) => {}
                }
            }
            if schemas::name_taken(conn, &schema.scope, &name.key, None)? {
                return Err(MetafieldError::conflict("schema", &schema.name));
            }

            schemas::insert(conn, &schema, &name.key)?;
            for binding in &placed {
                schemas::insert_binding(conn, &schema.id, binding)?;
            }
            schemas::require(conn, &schema.id)
        })?;

        debug!(
            id = %schema.id,
            scope = %schema.scope,
            name = %schema.name,
            bindings = schema.bindings.len(),
            "created schema"
        );
        Ok(schema)
    }
}
