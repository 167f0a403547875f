//! Tag operations

mod create;
mod delete;
mod list;
mod set_schema;

pub use create::CreateTag;
pub use delete::DeleteTag;
pub use list::ListTags;
pub use set_schema::SetTagSchema;
