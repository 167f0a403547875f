//! UpdateSchemaBindings command

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{BindingProblem, MetafieldError, Result};
use crate::ids::SchemaId;
use crate::store::schemas;
use crate::types::{BindingSpec, Schema};
use crate::visibility::{check_visible_limit, renumber};

/// Change order and summary flags of several bindings at once.
///
/// Bindings not listed keep their relative order. A listed binding that
/// lands on the same position as an unlisted one goes before it when it
/// moved up and after it when it moved down, which matches dragging a
/// row to that position. Orders are renumbered densely afterwards.
///
/// The whole batch is checked against the summary limit as one change, so
/// swapping which fields are shown succeeds even at the limit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateSchemaBindings {
    pub schema_id: SchemaId,
    pub updates: Vec<BindingSpec>,
}

impl UpdateSchemaBindings {
    pub fn new(schema_id: SchemaId, updates: impl IntoIterator<Item = BindingSpec>) -> Self {
        Self {
            schema_id,
            updates: updates.into_iter().collect(),
        }
    }
}

impl Execute for UpdateSchemaBindings {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        let mut seen = HashSet::new();
        for update in &self.updates {
            if !seen.insert(update.field_id) {
                return Err(MetafieldError::invalid_binding(
                    update.field_id,
                    BindingProblem::DuplicateField,
                ));
            }
        }

        let schema = ctx.store().write(|conn| {
            let schema = schemas::require(conn, &self.schema_id)?;
            let updates: HashMap<_, _> = self.updates.iter().map(|u| (u.field_id, u)).collect();
            for update in &self.updates {
                if schema.binding(&update.field_id).is_none() {
                    return Err(MetafieldError::BindingNotFound {
                        schema_id: schema.id,
                        field_id: update.field_id,
                    });
                }
            }

            // (target position, tie rank, previous position)
            let mut keyed: Vec<_> = schema
                .bindings
                .iter()
                .map(|b| {
                    let current = i64::from(b.display_order);
                    match updates.get(&b.field.id) {
                        Some(u) => {
                            let tie = if u.display_order <= current { 0 } else { 2 };
                            ((u.display_order, tie, current), b.field.id, u.show_on_summary)
                        }
                        None => ((current, 1, current), b.field.id, b.show_on_summary),
                    }
                })
                .collect();
            keyed.sort_by_key(|(key, _, _)| *key);

            let placed = renumber(keyed.into_iter().map(|(_, id, show)| (id, show)));
            check_visible_limit(&schema.id, &placed)?;

            schemas::update_bindings(conn, &schema.id, &placed)?;
            schemas::touch(conn, &schema.id, Utc::now())?;
            schemas::require(conn, &schema.id)
        })?;

        debug!(
            id = %schema.id,
            updated = self.updates.len(),
            visible = schema.visible_count(),
            "updated schema bindings"
        );
        Ok(schema)
    }
}
