//! Command-line front end for metafield
//!
//! The binary in `main.rs` is a thin shell over these modules so that
//! argument parsing and rendering can be tested without spawning a process.

pub mod cli;
pub mod commands;
pub mod error;
pub mod exit_codes;
pub mod output;
