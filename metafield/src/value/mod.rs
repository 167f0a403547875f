//! Value store operations
//!
//! Values are validated against the field's current configuration before
//! anything is written. A value stays stored when its field leaves every
//! schema reachable from the item, and becomes visible again when the field
//! is reachable again.

mod clear;
mod get;
mod set;

pub use clear::ClearValue;
pub use get::GetValues;
pub use set::{SetValue, SetValues};
