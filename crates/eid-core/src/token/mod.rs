//! Token interface binding.
//!
//! The `TokenLoader` and `TokenInterface` traits define the call surface the
//! session controller needs from a PKCS#11 middleware: library load,
//! initialize, slot listing, data-object listing and finalize. The native
//! implementation lives in [`native`]; tests drive the controller through
//! the in-memory [`mock`] double.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

pub mod native;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use native::{CryptokiLoader, CryptokiToken};

/// Identifier of a reader slot exposed by the token interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object reference, valid only while the context that produced it is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw `CK_RV` returned by C_Initialize.
///
/// Zero is the only success value; any other code is surfaced verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReturnCode(pub u64);

impl ReturnCode {
    /// CKR_OK
    pub const OK: ReturnCode = ReturnCode(0);

    pub fn is_ok(&self) -> bool {
        *self == Self::OK
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `CKO_DATA` object as the binding returns it.
///
/// Label and value are independently optional; the binding reports what the
/// token exposes without normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDataObject {
    pub label: Option<String>,
    pub handle: ObjectHandle,
    pub value: Option<Vec<u8>>,
}

/// Loads a middleware library and hands out its token interface.
pub trait TokenLoader {
    type Token: TokenInterface;

    /// Load the native module at `path`.
    ///
    /// # Errors
    ///
    /// Returns `EidError::LibraryLoad` if the path is missing, unreadable or
    /// not a PKCS#11 module for this platform. Nothing is acquired on
    /// failure.
    fn load(&self, path: &Path) -> Result<Self::Token>;
}

/// Calls onto an initialized (or initializable) PKCS#11 module.
///
/// Only `initialize` may be called before a successful initialize, and
/// `finalize` must be called at most once, only after initialize returned
/// [`ReturnCode::OK`]. The session controller enforces both.
pub trait TokenInterface {
    /// C_Initialize. Returns the raw return code.
    fn initialize(&mut self) -> ReturnCode;

    /// C_GetSlotList, restricted to slots with a token present.
    ///
    /// # Errors
    ///
    /// Returns `EidError::Token` if the native call faults.
    fn slot_list(&mut self) -> Result<Vec<SlotId>>;

    /// Enumerate all `CKO_DATA` objects on `slot`.
    ///
    /// `Ok(None)` means the binding produced no result at all; it is treated
    /// the same as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `EidError::Token` if opening a session or searching faults,
    /// for example when the card is pulled mid-read.
    fn list_data_objects(&mut self, slot: SlotId) -> Result<Option<Vec<RawDataObject>>>;

    /// C_Finalize.
    ///
    /// # Errors
    ///
    /// Returns `EidError::Token` if the binding observes a teardown failure.
    /// Callers log and move on. The native binding cannot observe one; see
    /// [`CryptokiToken`].
    fn finalize(&mut self) -> Result<()>;
}
