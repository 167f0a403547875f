//! GetField command

use serde::{Deserialize, Serialize};

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::FieldId;
use crate::store::fields;
use crate::types::Field;

/// Get a field by id
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetField {
    pub id: FieldId,
}

impl GetField {
    pub fn new(id: FieldId) -> Self {
        Self { id }
    }
}

impl Execute for GetField {
    type Output = Field;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Field> {
        ctx.store().read(|conn| fields::require(conn, &self.id))
    }
}
