//! Process exit codes

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;
/// The request was refused: not found, conflict, or invalid input
pub const EXIT_REJECTED: i32 = 1;
/// Configuration, storage or I/O failure
pub const EXIT_ERROR: i32 = 2;
