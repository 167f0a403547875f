//! Error handling for the metafield CLI
//!
//! Keeps the source error for the cause chain and picks an exit code from
//! the kind of failure.

use std::error::Error;
use std::fmt;

use metafield::MetafieldError;
use metafield_config::ConfigError;

use crate::exit_codes::{EXIT_ERROR, EXIT_REJECTED, EXIT_SUCCESS};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// A usage problem the argument parser could not catch.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, EXIT_REJECTED)
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            let text = err.to_string();
            if !result.contains(&text) {
                result.push_str(&format!("\n  Caused by: {text}"));
            }
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<MetafieldError> for CliError {
    fn from(error: MetafieldError) -> Self {
        let exit_code = if error.is_not_found()
            || error.is_conflict()
            || error.is_validation()
            || matches!(error, MetafieldError::InUse { .. })
        {
            EXIT_REJECTED
        } else {
            EXIT_ERROR
        };
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self {
            message: error.to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            message: format!("failed to render output: {error}"),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_yaml_ng::Error> for CliError {
    fn from(error: serde_yaml_ng::Error) -> Self {
        Self {
            message: format!("failed to render output: {error}"),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("{}", e.full_chain());
            e.exit_code
        }
    }
}
