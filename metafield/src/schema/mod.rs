//! Schema registry operations
//!
//! Every binding mutation builds the complete proposed binding set,
//! normalizes its display order and checks the summary limit before writing.

mod add_field;
mod create;
mod delete;
mod get;
mod list;
mod remove_field;
mod set_visibility;
mod update;
mod update_bindings;

pub use add_field::AddFieldToSchema;
pub use create::CreateSchema;
pub use delete::DeleteSchema;
pub use get::GetSchema;
pub use list::ListSchemas;
pub use remove_field::RemoveFieldFromSchema;
pub use set_visibility::SetShowOnSummary;
pub use update::UpdateSchema;
pub use update_bindings::UpdateSchemaBindings;
