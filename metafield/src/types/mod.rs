//! Records returned by metafield operations and the inputs that describe
//! changes to them.

mod field;
mod resolved;
mod schema;
mod tag;

pub use field::{Field, FieldPatch};
pub use resolved::ResolvedField;
pub use schema::{BindingSpec, Schema, SchemaBinding, SchemaPatch};
pub use tag::{Item, Tag, ValueWrite};
