//! GetSchema command

use serde::{Deserialize, Serialize};

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::SchemaId;
use crate::store::schemas;
use crate::types::Schema;

/// Get a schema with its bindings in display order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetSchema {
    pub id: SchemaId,
}

impl GetSchema {
    pub fn new(id: SchemaId) -> Self {
        Self { id }
    }
}

impl Execute for GetSchema {
    type Output = Schema;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Schema> {
        ctx.store().read(|conn| schemas::require(conn, &self.id))
    }
}
