//! ListTags command

use serde::{Deserialize, Serialize};

use crate::context::{Execute, MetafieldContext};
use crate::error::Result;
use crate::store::tags;
use crate::types::Tag;

/// List every tag by name
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListTags;

impl Execute for ListTags {
    type Output = Vec<Tag>;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Vec<Tag>> {
        ctx.store().read(tags::list_tags)
    }
}
