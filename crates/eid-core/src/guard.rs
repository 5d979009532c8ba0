//! Scoped finalize guarantee for an initialized token.

use tracing::{debug, warn};

use crate::error::Result;
use crate::token::TokenInterface;

/// Owns the "needs finalize" flag of an initialized token.
///
/// Create one only after C_Initialize returned success. Finalize then runs
/// exactly once: explicitly through [`FinalizeGuard::finalize`], or from
/// `Drop` if the guard goes out of scope first (early return or unwinding
/// panic).
pub struct FinalizeGuard<'a, T: TokenInterface> {
    token: &'a mut T,
    needs_finalize: bool,
}

impl<'a, T: TokenInterface> FinalizeGuard<'a, T> {
    pub fn new(token: &'a mut T) -> Self {
        Self {
            token,
            needs_finalize: true,
        }
    }

    /// The guarded token.
    pub fn token(&mut self) -> &mut T {
        self.token
    }

    /// Finalize now and disarm the guard.
    pub fn finalize(mut self) -> Result<()> {
        self.needs_finalize = false;
        debug!("Finalizing...");
        self.token.finalize()
    }
}

impl<T: TokenInterface> Drop for FinalizeGuard<'_, T> {
    fn drop(&mut self) {
        if !self.needs_finalize {
            return;
        }
        self.needs_finalize = false;
        debug!("Finalizing after abnormal exit...");
        if let Err(err) = self.token.finalize() {
            warn!("Finalize failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::mock::MockToken;

    #[test]
    fn test_explicit_finalize_runs_once() {
        let mut token = MockToken::new();
        let log = token.log();
        let guard = FinalizeGuard::new(&mut token);
        guard.finalize().unwrap();
        assert_eq!(log.finalize_count(), 1);
    }

    #[test]
    fn test_drop_finalizes_once() {
        let mut token = MockToken::new();
        let log = token.log();
        {
            let _guard = FinalizeGuard::new(&mut token);
        }
        assert_eq!(log.finalize_count(), 1);
    }

    #[test]
    fn test_finalize_error_is_returned_and_not_retried() {
        let mut token = MockToken::new().with_finalize_fault("device removed");
        let log = token.log();
        let guard = FinalizeGuard::new(&mut token);
        assert!(guard.finalize().is_err());
        assert_eq!(log.finalize_count(), 1);
    }

    #[test]
    fn test_unwinding_finalizes() {
        let mut token = MockToken::new();
        let log = token.log();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = FinalizeGuard::new(&mut token);
            panic!("enumeration fault");
        }));
        assert!(result.is_err());
        assert_eq!(log.finalize_count(), 1);
    }
}
