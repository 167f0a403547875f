//! Field resolution: from an item's tags to its effective field list

mod engine;
mod item;

pub use engine::{qualified_name, resolve, ReachableBinding};
pub use item::ResolveFieldsForItem;
