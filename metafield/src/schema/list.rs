//! ListSchemas command

use serde::{Deserialize, Serialize};

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::ids::Scope;
use crate::store::schemas;
use crate::types::Schema;

/// List the schemas of a scope, newest first, each with bindings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListSchemas {
    pub scope: Scope,
}

impl ListSchemas {
    pub fn new(scope: impl Into<Scope>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Execute for ListSchemas {
    type Output = Vec<Schema>;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Vec<Schema>> {
        ctx.store().read(|conn| schemas::list(conn, &self.scope))
    }
}
