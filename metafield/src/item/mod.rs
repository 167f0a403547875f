//! Item operations

mod create;
mod delete;
mod tag;

pub use create::CreateItem;
pub use delete::DeleteItem;
pub use tag::{TagItem, UntagItem};
