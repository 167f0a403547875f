//! Typed custom fields for tagged items
//!
//! Field definitions are grouped into schemas, schemas are attached to tags,
//! and the fields that apply to an item are the union of the schemas reachable
//! through its tags.
//!
//! ## Architecture
//!
//! - **Commands**: one struct per operation, each implementing [`Execute`]
//! - **Context**: [`MetafieldContext`] owns the SQLite [`Store`] and the
//!   [`TagSource`] used during resolution
//! - **Validation**: field kinds, configurations and values come from
//!   [`metafield_fields`]
//!
//! ## Usage
//!
//! ```no_run
//! use metafield::{
//!     field::CreateField, item::{CreateItem, TagItem}, resolve::ResolveFieldsForItem,
//!     schema::CreateSchema, tag::CreateTag, value::SetValue, BindingSpec, FieldConfig,
//!     MetafieldContext,
//! };
//!
//! # fn main() -> metafield::Result<()> {
//! let ctx = MetafieldContext::in_memory()?;
//! let rating = ctx.run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))?;
//! let quality = ctx.run(
//!     CreateSchema::new("photos", "Quality").with_binding(BindingSpec::new(rating.id, 0).shown()),
//! )?;
//! let tag = ctx.run(CreateTag::new("landscape").with_schema(quality.id))?;
//! let item = ctx.run(CreateItem::new("IMG_0001"))?;
//! ctx.run(TagItem::new(item.id, tag.id))?;
//! ctx.run(SetValue::new(item.id, rating.id, 4))?;
//!
//! let fields = ctx.run(ResolveFieldsForItem::new(item.id))?;
//! assert_eq!(fields[0].display_name, "Rating");
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod ids;
mod store;
mod tag_source;
mod types;
pub mod visibility;

pub mod field;
pub mod item;
pub mod resolve;
pub mod schema;
pub mod tag;
pub mod value;

pub use context::{Execute, MetafieldContext, MetafieldContextBuilder};
pub use error::{BindingProblem, MetafieldError, Result};
pub use ids::{FieldId, ItemId, SchemaId, Scope, TagId};
pub use store::Store;
pub use tag_source::TagSource;
pub use types::{
    BindingSpec, Field, FieldPatch, Item, ResolvedField, Schema, SchemaBinding, SchemaPatch, Tag,
    ValueWrite,
};
pub use visibility::MAX_VISIBLE_ON_SUMMARY;

pub use metafield_config::StoreConfig;
pub use metafield_fields::{FieldConfig, FieldKind, FieldValue, FieldsError};
