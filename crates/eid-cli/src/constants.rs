//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success (including an empty card and a declined confirmation)
/// - 1: General error and fatal exceptions
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Session failures
pub mod exit_codes {
    /// Run completed, or the user chose not to continue.
    pub const SUCCESS: i32 = 0;

    /// Unexpected native fault or caught panic.
    pub const FAILURE: i32 = 1;

    /// Middleware library missing or invalid.
    pub const LIBRARY_LOAD: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// C_Initialize returned a failure code.
    pub const INITIALIZATION: i32 = 5;

    /// No slot with a token present.
    pub const NO_READER: i32 = 6;
}

/// Environment variable names.
pub mod env {
    /// Log filter override (EnvFilter syntax).
    pub const LOG: &str = "EID_LOG";
}

/// Message announced before the library is loaded.
pub fn loading_message(library_path: &str) -> String {
    format!("Loading library: {}", library_path)
}

/// Confirmation asked after a read pass when `--confirm` is set.
pub const CONTINUE_PROMPT: &str = "Continue ?";
