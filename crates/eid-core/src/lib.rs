//! # eID Core
//!
//! Core library for reading identity data objects off a smart card through a
//! PKCS#11 middleware.
//!
//! This crate owns the token session lifecycle and is independent of the CLI
//! interface and of any dialog mechanism.
//!
//! ## Architecture
//!
//! - **platform**: platform identity and middleware path resolution
//! - **token**: token interface binding traits, the `cryptoki` binding and a
//!   test double
//! - **session**: the session controller state machine
//! - **guard**: the finalize-exactly-once guard
//! - **object**: data objects, label normalization and previews
//! - **error**: failure taxonomy

pub mod error;
pub mod guard;
pub mod object;
pub mod platform;
pub mod session;
pub mod token;

pub use error::{EidError, FailureKind, Result};
pub use object::DataObject;
pub use platform::Platform;
pub use session::{ReadOutcome, SessionController, SessionReport, SessionState};
pub use token::{TokenInterface, TokenLoader};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
