//! Error types for token session operations.
//!
//! Every failure of a read pass is terminal for that pass. Errors are
//! descriptive at the core level; the CLI layer maps them to exit codes
//! through [`FailureKind`].

use thiserror::Error;

use crate::token::ReturnCode;

/// Result type alias for eID core operations.
pub type Result<T> = std::result::Result<T, EidError>;

/// Core error type for a token read pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EidError {
    /// The middleware library is missing, unreadable or not a PKCS#11 module
    #[error("Failed to load PKCS#11 library at {path}: {reason}")]
    LibraryLoad { path: String, reason: String },

    /// C_Initialize returned something other than CKR_OK
    #[error("C_Initialize failed with code: {0}")]
    Initialization(ReturnCode),

    /// The token interface reported no slot with a token present
    #[error("No slot/reader detected")]
    NoReaderDetected,

    /// A native call failed after initialization
    #[error("{operation} failed: {reason}")]
    Token {
        operation: &'static str,
        reason: String,
    },

    /// A panic escaped the pipeline and was caught at the outer boundary
    #[error("Exception occurred: {0}")]
    Panicked(String),
}

impl EidError {
    /// Build a [`EidError::Token`] for a failed native call.
    pub fn token(operation: &'static str, reason: impl Into<String>) -> Self {
        EidError::Token {
            operation,
            reason: reason.into(),
        }
    }

    /// Classify this error for reporting and exit-code mapping.
    pub fn kind(&self) -> FailureKind {
        match self {
            EidError::LibraryLoad { .. } => FailureKind::LibraryLoad,
            EidError::Initialization(_) => FailureKind::Initialization,
            EidError::NoReaderDetected => FailureKind::NoReaderDetected,
            EidError::Token { .. } | EidError::Panicked(_) => FailureKind::Unexpected,
        }
    }
}

/// Failure taxonomy of a read pass.
///
/// `NoObjectsFound` is informational: it never appears as an [`EidError`],
/// only as the outcome of a run that otherwise succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    LibraryLoad,
    Initialization,
    NoReaderDetected,
    NoObjectsFound,
    Unexpected,
}

impl FailureKind {
    /// Stable snake_case name, used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::LibraryLoad => "library_load_error",
            FailureKind::Initialization => "initialization_error",
            FailureKind::NoReaderDetected => "no_reader_detected",
            FailureKind::NoObjectsFound => "no_objects_found",
            FailureKind::Unexpected => "unexpected_exception",
        }
    }

    /// Whether this kind ends the run as a failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FailureKind::NoObjectsFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_message_carries_code() {
        let err = EidError::Initialization(ReturnCode(5));
        assert_eq!(err.to_string(), "C_Initialize failed with code: 5");
        assert_eq!(err.kind(), FailureKind::Initialization);
    }

    #[test]
    fn test_library_load_message_carries_path() {
        let err = EidError::LibraryLoad {
            path: "/usr/lib/libbeidpkcs11.so".to_string(),
            reason: "not found".to_string(),
        };
        assert!(err.to_string().contains("/usr/lib/libbeidpkcs11.so"));
        assert_eq!(err.kind(), FailureKind::LibraryLoad);
    }

    #[test]
    fn test_unexpected_kinds() {
        assert_eq!(
            EidError::token("C_FindObjects", "device removed").kind(),
            FailureKind::Unexpected
        );
        assert_eq!(
            EidError::Panicked("boom".to_string()).kind(),
            FailureKind::Unexpected
        );
    }

    #[test]
    fn test_no_objects_found_is_not_fatal() {
        assert!(!FailureKind::NoObjectsFound.is_fatal());
        assert!(FailureKind::NoReaderDetected.is_fatal());
    }
}
