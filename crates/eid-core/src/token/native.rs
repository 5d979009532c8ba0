//! Native PKCS#11 binding backed by the `cryptoki` crate.

use std::path::Path;

use cryptoki::context::{CInitializeArgs, Pkcs11};
use cryptoki::error::{Error as CryptokiError, RvError};
use cryptoki::object::{Attribute, AttributeType, ObjectClass};
use cryptoki::slot::Slot;
use tracing::{debug, warn};

use super::{ObjectHandle, RawDataObject, ReturnCode, SlotId, TokenInterface, TokenLoader};
use crate::error::{EidError, Result};

// Return values C_Initialize is allowed to produce.
const CKR_HOST_MEMORY: u64 = 0x0000_0002;
const CKR_GENERAL_ERROR: u64 = 0x0000_0005;
const CKR_FUNCTION_FAILED: u64 = 0x0000_0006;
const CKR_ARGUMENTS_BAD: u64 = 0x0000_0007;
const CKR_NEED_TO_CREATE_THREADS: u64 = 0x0000_0009;
const CKR_CANT_LOCK: u64 = 0x0000_000A;
const CKR_CRYPTOKI_ALREADY_INITIALIZED: u64 = 0x0000_0191;

/// Loads PKCS#11 modules from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptokiLoader;

impl TokenLoader for CryptokiLoader {
    type Token = CryptokiToken;

    fn load(&self, path: &Path) -> Result<CryptokiToken> {
        let ctx = Pkcs11::new(path).map_err(|e| EidError::LibraryLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(CryptokiToken {
            ctx: Some(ctx),
            slots: Vec::new(),
        })
    }
}

/// A loaded PKCS#11 module.
pub struct CryptokiToken {
    ctx: Option<Pkcs11>,
    // Slots from the last listing; the binding needs its own handle type back.
    slots: Vec<Slot>,
}

impl CryptokiToken {
    fn ctx(&self, operation: &'static str) -> Result<&Pkcs11> {
        self.ctx
            .as_ref()
            .ok_or_else(|| EidError::token(operation, "library context already finalized"))
    }

    /// Give up the context after a failed C_Initialize.
    ///
    /// Dropping a `Pkcs11` sends C_Finalize, which must never reach a module
    /// that did not initialize. The context is leaked instead and the module
    /// stays mapped until the process exits.
    fn abandon(&mut self) {
        self.slots.clear();
        if let Some(ctx) = self.ctx.take() {
            std::mem::forget(ctx);
        }
    }

    fn read_object(
        session: &cryptoki::session::Session,
        handle: cryptoki::object::ObjectHandle,
    ) -> Option<RawDataObject> {
        let raw_handle = match handle.to_string().parse::<u64>() {
            Ok(value) => ObjectHandle(value),
            Err(err) => {
                warn!("Unreadable object handle {}: {}", handle, err);
                return None;
            }
        };

        // Objects whose label cannot be read are skipped entirely.
        let label = match session.get_attributes(handle, &[AttributeType::Label]) {
            Ok(attributes) => attributes.into_iter().find_map(|attribute| match attribute {
                Attribute::Label(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                _ => None,
            }),
            Err(err) => {
                debug!("Skipping object {}: label unreadable ({})", raw_handle, err);
                return None;
            }
        };

        let value = match session.get_attributes(handle, &[AttributeType::Value]) {
            Ok(attributes) => attributes.into_iter().find_map(|attribute| match attribute {
                Attribute::Value(bytes) => Some(bytes),
                _ => None,
            }),
            Err(err) => {
                debug!("Object {} has no readable value: {}", raw_handle, err);
                None
            }
        };

        Some(RawDataObject {
            label,
            handle: raw_handle,
            value,
        })
    }
}

impl TokenInterface for CryptokiToken {
    fn initialize(&mut self) -> ReturnCode {
        let ctx = match self.ctx.as_mut() {
            Some(ctx) => ctx,
            None => return ReturnCode(CKR_GENERAL_ERROR),
        };
        let rv = match ctx.initialize(CInitializeArgs::OsThreads) {
            Ok(()) => return ReturnCode::OK,
            Err(CryptokiError::Pkcs11(rv, ..)) => initialize_rv(rv),
            Err(err) => {
                warn!("C_Initialize failed outside the module: {}", err);
                CKR_GENERAL_ERROR
            }
        };
        self.abandon();
        ReturnCode(rv)
    }

    fn slot_list(&mut self) -> Result<Vec<SlotId>> {
        let slots = self
            .ctx("C_GetSlotList")?
            .get_slots_with_token()
            .map_err(|e| EidError::token("C_GetSlotList", e.to_string()))?;
        let ids = slots.iter().map(|slot| SlotId(slot.id())).collect();
        self.slots = slots;
        Ok(ids)
    }

    fn list_data_objects(&mut self, slot: SlotId) -> Result<Option<Vec<RawDataObject>>> {
        let native_slot = self
            .slots
            .iter()
            .copied()
            .find(|candidate| candidate.id() == slot.0)
            .ok_or_else(|| EidError::token("C_OpenSession", format!("unknown slot {}", slot)))?;

        let session = self
            .ctx("C_OpenSession")?
            .open_ro_session(native_slot)
            .map_err(|e| EidError::token("C_OpenSession", e.to_string()))?;

        let handles = session
            .find_objects(&[Attribute::Class(ObjectClass::DATA)])
            .map_err(|e| EidError::token("C_FindObjects", e.to_string()))?;

        let objects = handles
            .into_iter()
            .filter_map(|handle| Self::read_object(&session, handle))
            .collect();

        // The session closes on drop, before the caller can finalize.
        drop(session);
        Ok(Some(objects))
    }

    /// Releases the context; `cryptoki` sends C_Finalize when the last
    /// reference drops. A failing C_Finalize is only logged by `cryptoki`,
    /// so this never reports a teardown error.
    fn finalize(&mut self) -> Result<()> {
        let ctx = self
            .ctx
            .take()
            .ok_or_else(|| EidError::token("C_Finalize", "library context already finalized"))?;
        self.slots.clear();
        // The binding issues C_Finalize when the last context reference is dropped.
        drop(ctx);
        Ok(())
    }
}

fn initialize_rv(rv: RvError) -> u64 {
    match rv {
        RvError::HostMemory => CKR_HOST_MEMORY,
        RvError::GeneralError => CKR_GENERAL_ERROR,
        RvError::FunctionFailed => CKR_FUNCTION_FAILED,
        RvError::ArgumentsBad => CKR_ARGUMENTS_BAD,
        RvError::NeedToCreateThreads => CKR_NEED_TO_CREATE_THREADS,
        RvError::CantLock => CKR_CANT_LOCK,
        RvError::CryptokiAlreadyInitialized => CKR_CRYPTOKI_ALREADY_INITIALIZED,
        other => {
            warn!("C_Initialize returned an unexpected code: {}", other);
            CKR_GENERAL_ERROR
        }
    }
}
