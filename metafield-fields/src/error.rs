//! Error types for field configuration and value validation

use thiserror::Error;

use crate::types::FieldKind;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while validating field names, configurations and values.
///
/// Every variant carries the data a caller needs to build its own message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldsError {
    /// Name is empty after trimming
    #[error("name cannot be empty")]
    EmptyName,

    /// Name exceeds the maximum length
    #[error("name is {len} characters, maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    /// Choice field declared without options
    #[error("choice field needs at least one option")]
    NoOptions,

    /// Choice option is blank
    #[error("choice option {index} is blank")]
    BlankOption { index: usize },

    /// Choice option appears twice
    #[error("duplicate choice option: {option}")]
    DuplicateOption { option: String },

    /// Scale maximum outside the allowed range
    #[error("scale maximum {max} is outside {min_allowed}..={max_allowed}")]
    ScaleMaxOutOfRange {
        max: i64,
        min_allowed: i64,
        max_allowed: i64,
    },

    /// Text maximum length outside the allowed range
    #[error("text max length {max_length} is outside 1..={max_allowed}")]
    TextMaxLengthOutOfRange { max_length: u32, max_allowed: u32 },

    /// Value does not have the shape the field type expects
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch {
        expected: FieldKind,
        found: &'static str,
    },

    /// Choice value is not one of the configured options
    #[error("'{value}' is not one of the configured options")]
    NotAnOption { value: String },

    /// Scale value outside 1..=max
    #[error("scale value {value} is outside 1..={max}")]
    ScaleOutOfRange { value: i64, max: i64 },

    /// Text value longer than the configured maximum
    #[error("text is {len} characters, maximum is {max}")]
    TextTooLong { len: usize, max: u32 },
}
