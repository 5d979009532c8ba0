//! In-memory token double for driving the session controller in tests.
//!
//! Every call made through a [`MockLoader`] or its tokens is recorded in a
//! shared [`CallLog`], so tests can assert on ordering and on how often
//! finalize ran even after the controller has consumed the token.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{ObjectHandle, RawDataObject, ReturnCode, SlotId, TokenInterface, TokenLoader};
use crate::error::{EidError, Result};

/// A call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    Load(String),
    Initialize,
    SlotList,
    ListDataObjects(SlotId),
    Finalize,
}

/// Shared, cloneable record of token calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<TokenCall>>>);

impl CallLog {
    fn push(&self, call: TokenCall) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call);
        }
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<TokenCall> {
        self.0.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of times `call` was observed.
    pub fn count(&self, call: &TokenCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn finalize_count(&self) -> usize {
        self.count(&TokenCall::Finalize)
    }
}

/// What `list_data_objects` does when called.
#[derive(Debug, Clone)]
pub enum Enumeration {
    Objects(Vec<RawDataObject>),
    /// The binding returns no result at all
    Null,
    /// The binding reports a native fault
    Fault(String),
    /// The binding panics mid-enumeration
    Panic(String),
}

/// Scripted token behaviour.
#[derive(Debug, Clone)]
pub struct MockToken {
    init_code: ReturnCode,
    slots: Vec<SlotId>,
    slot_fault: Option<String>,
    enumeration: Enumeration,
    finalize_fault: Option<String>,
    log: CallLog,
}

impl Default for MockToken {
    fn default() -> Self {
        Self::new()
    }
}

impl MockToken {
    /// A token that initializes, exposes slot 0 and holds no data objects.
    pub fn new() -> Self {
        Self {
            init_code: ReturnCode::OK,
            slots: vec![SlotId(0)],
            slot_fault: None,
            enumeration: Enumeration::Objects(Vec::new()),
            finalize_fault: None,
            log: CallLog::default(),
        }
    }

    pub fn with_init_code(mut self, code: u64) -> Self {
        self.init_code = ReturnCode(code);
        self
    }

    pub fn with_slots(mut self, slots: &[u64]) -> Self {
        self.slots = slots.iter().copied().map(SlotId).collect();
        self
    }

    pub fn with_slot_fault(mut self, reason: &str) -> Self {
        self.slot_fault = Some(reason.to_string());
        self
    }

    pub fn with_objects(mut self, objects: Vec<RawDataObject>) -> Self {
        self.enumeration = Enumeration::Objects(objects);
        self
    }

    pub fn with_enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumeration = enumeration;
        self
    }

    pub fn with_finalize_fault(mut self, reason: &str) -> Self {
        self.finalize_fault = Some(reason.to_string());
        self
    }

    /// The log shared by this token and anything cloned from it.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl TokenInterface for MockToken {
    fn initialize(&mut self) -> ReturnCode {
        self.log.push(TokenCall::Initialize);
        self.init_code
    }

    fn slot_list(&mut self) -> Result<Vec<SlotId>> {
        self.log.push(TokenCall::SlotList);
        match &self.slot_fault {
            Some(reason) => Err(EidError::token("C_GetSlotList", reason.clone())),
            None => Ok(self.slots.clone()),
        }
    }

    fn list_data_objects(&mut self, slot: SlotId) -> Result<Option<Vec<RawDataObject>>> {
        self.log.push(TokenCall::ListDataObjects(slot));
        match &self.enumeration {
            Enumeration::Objects(objects) => Ok(Some(objects.clone())),
            Enumeration::Null => Ok(None),
            Enumeration::Fault(reason) => Err(EidError::token("C_FindObjects", reason.clone())),
            Enumeration::Panic(message) => panic!("{}", message),
        }
    }

    fn finalize(&mut self) -> Result<()> {
        self.log.push(TokenCall::Finalize);
        match &self.finalize_fault {
            Some(reason) => Err(EidError::token("C_Finalize", reason.clone())),
            None => Ok(()),
        }
    }
}

/// Loader that hands out clones of a scripted [`MockToken`].
#[derive(Debug, Clone)]
pub struct MockLoader {
    token: MockToken,
    load_failure: Option<String>,
}

impl MockLoader {
    pub fn new(token: MockToken) -> Self {
        Self {
            token,
            load_failure: None,
        }
    }

    /// A loader whose library never loads.
    pub fn failing(reason: &str) -> Self {
        Self {
            token: MockToken::new(),
            load_failure: Some(reason.to_string()),
        }
    }

    pub fn log(&self) -> CallLog {
        self.token.log()
    }
}

impl TokenLoader for MockLoader {
    type Token = MockToken;

    fn load(&self, path: &Path) -> Result<MockToken> {
        let path = path.display().to_string();
        self.token.log.push(TokenCall::Load(path.clone()));
        match &self.load_failure {
            Some(reason) => Err(EidError::LibraryLoad {
                path,
                reason: reason.clone(),
            }),
            None => Ok(self.token.clone()),
        }
    }
}

/// Convenience constructor for a raw object.
pub fn raw_object(label: Option<&str>, handle: u64, value: Option<&[u8]>) -> RawDataObject {
    RawDataObject {
        label: label.map(str::to_string),
        handle: ObjectHandle(handle),
        value: value.map(<[u8]>::to_vec),
    }
}
