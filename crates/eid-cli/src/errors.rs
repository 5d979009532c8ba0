//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use eid_core::{EidError, FailureKind};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Invalid flag combination or value
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a session failure kind.
pub fn exit_code_for(kind: FailureKind) -> i32 {
    match kind {
        FailureKind::LibraryLoad => exit_codes::LIBRARY_LOAD,
        FailureKind::Initialization => exit_codes::INITIALIZATION,
        FailureKind::NoReaderDetected => exit_codes::NO_READER,
        FailureKind::NoObjectsFound => exit_codes::SUCCESS,
        FailureKind::Unexpected => exit_codes::FAILURE,
    }
}

/// Contextual hint shown under a session failure.
pub fn hint_for(err: &EidError) -> Option<&'static str> {
    match err {
        EidError::LibraryLoad { .. } => {
            Some("Check the eID middleware installation, or pass --library <PATH>.")
        }
        EidError::NoReaderDetected => Some("Connect a card reader and insert the card."),
        EidError::Initialization(_) | EidError::Token { .. } | EidError::Panicked(_) => None,
    }
}
