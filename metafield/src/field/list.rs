//! ListFields command

use serde::{Deserialize, Serialize};

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::Scope;
use crate::store::fields;
use crate::types::Field;

/// List the fields of a scope, newest first
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListFields {
    pub scope: Scope,
}

impl ListFields {
    pub fn new(scope: impl Into<Scope>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Execute for ListFields {
    type Output = Vec<Field>;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Vec<Field>> {
        ctx.store().read(|conn| fields::list(conn, &self.scope))
    }
}
