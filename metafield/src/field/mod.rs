//! Field registry operations

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::CreateField;
pub use delete::DeleteField;
pub use get::GetField;
pub use list::ListFields;
pub use update::UpdateField;
