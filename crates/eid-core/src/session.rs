//! Session controller: one best-effort read pass over a token.
//!
//! ```text
//! Unstarted -> LibraryLoaded -> Initialized -> SlotFound -> ObjectsRead -> Finalized
//!      \              \              \             \
//!       `--------------`--------------`-------------`--> Failed(kind)
//! ```
//!
//! Once C_Initialize succeeds, finalize runs exactly once on every exit
//! path, including a panic unwinding out of the binding. It never runs if
//! the library failed to load or initialize.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, trace, warn};

use crate::error::{EidError, FailureKind, Result};
use crate::guard::FinalizeGuard;
use crate::object::DataObject;
use crate::platform::Platform;
use crate::token::{SlotId, TokenInterface, TokenLoader};

/// Lifecycle state of a [`SessionController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unstarted,
    LibraryLoaded,
    Initialized,
    SlotFound,
    ObjectsRead,
    Finalized,
    Failed(FailureKind),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Finalized | SessionState::Failed(_))
    }

    /// Whether `next` is a legal successor of this state.
    pub fn allows(&self, next: &SessionState) -> bool {
        use SessionState::*;
        match (self, next) {
            (from, Failed(_)) => !from.is_terminal(),
            (Unstarted, LibraryLoaded)
            | (LibraryLoaded, Initialized)
            | (Initialized, SlotFound)
            | (SlotFound, ObjectsRead)
            | (ObjectsRead, Finalized) => true,
            _ => false,
        }
    }
}

/// What the enumeration step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Objects(Vec<DataObject>),
    /// Null or empty enumeration; informational, not a failure
    NoObjectsFound,
}

impl ReadOutcome {
    pub fn objects(&self) -> &[DataObject] {
        match self {
            ReadOutcome::Objects(objects) => objects,
            ReadOutcome::NoObjectsFound => &[],
        }
    }

    /// The informational kind carried by this outcome, if any.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ReadOutcome::Objects(_) => None,
            ReadOutcome::NoObjectsFound => Some(FailureKind::NoObjectsFound),
        }
    }
}

/// Result of a completed read pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub library_path: PathBuf,
    /// Number of slots the token interface reported
    pub slot_count: usize,
    /// The slot that was read
    pub slot: SlotId,
    pub outcome: ReadOutcome,
}

/// First-slot policy: always index 0, no check that a card sits there.
pub fn select_slot(slots: &[SlotId]) -> Option<SlotId> {
    slots.first().copied()
}

/// Drives one load → initialize → discover → enumerate → finalize pass.
pub struct SessionController<L: TokenLoader> {
    loader: L,
    library_path: PathBuf,
    state: SessionState,
    finalized: bool,
}

impl<L: TokenLoader> SessionController<L> {
    pub fn new(loader: L, library_path: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            library_path: library_path.into(),
            state: SessionState::Unstarted,
            finalized: false,
        }
    }

    /// Controller for the middleware location of `platform`.
    pub fn for_platform(loader: L, platform: &Platform) -> Self {
        Self::new(loader, platform.middleware_path())
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether finalize has been issued by this controller.
    pub fn finalized(&self) -> bool {
        self.finalized
    }

    /// Run the read pass to completion.
    ///
    /// # Errors
    ///
    /// - `EidError::LibraryLoad`: nothing acquired, no finalize
    /// - `EidError::Initialization`: no slot discovery, no finalize
    /// - `EidError::NoReaderDetected`: finalized
    /// - `EidError::Token`: native fault after initialize, finalized
    ///
    /// A controller runs once; a second call fails with `EidError::Token`.
    pub fn run(&mut self) -> Result<SessionReport> {
        if self.state != SessionState::Unstarted {
            return Err(EidError::token("run", "session already ran"));
        }

        debug!("Loading library: {}", self.library_path.display());
        let mut token = match self.loader.load(&self.library_path) {
            Ok(token) => token,
            Err(err) => {
                error!("Library context is null. Check middleware installation.");
                return Err(self.fail(err));
            }
        };
        self.advance(SessionState::LibraryLoaded);

        let rv = token.initialize();
        debug!("C_Initialize RV: {}", rv);
        if !rv.is_ok() {
            let err = EidError::Initialization(rv);
            error!("{}", err);
            return Err(self.fail(err));
        }
        self.advance(SessionState::Initialized);

        let mut guard = FinalizeGuard::new(&mut token);
        let read = self.read(guard.token());
        let teardown = guard.finalize();
        self.finalized = true;
        if let Err(err) = teardown {
            warn!("C_Finalize failed: {}", err);
        }

        match read {
            Ok(report) => {
                self.advance(SessionState::Finalized);
                Ok(report)
            }
            Err(err) => {
                error!("{}", err);
                Err(self.fail(err))
            }
        }
    }

    fn read(&mut self, token: &mut L::Token) -> Result<SessionReport> {
        let slots = token.slot_list()?;
        debug!("Slots found: {}", slots.len());
        let slot = select_slot(&slots).ok_or(EidError::NoReaderDetected)?;
        self.advance(SessionState::SlotFound);
        debug!("Using Slot ID: {}", slot);

        debug!("Calling listDataObjects...");
        let objects = token.list_data_objects(slot)?.unwrap_or_default();
        self.advance(SessionState::ObjectsRead);

        let outcome = if objects.is_empty() {
            warn!("No CKO_DATA objects found. Is the card inserted?");
            ReadOutcome::NoObjectsFound
        } else {
            info!("Found {} objects", objects.len());
            let objects: Vec<DataObject> = objects.into_iter().map(DataObject::from_raw).collect();
            for (index, object) in objects.iter().enumerate() {
                debug!(
                    "[{}] Label: {} | Handle: {} | Size: {}",
                    index,
                    object.label,
                    object.handle,
                    object.size()
                );
            }
            ReadOutcome::Objects(objects)
        };

        Ok(SessionReport {
            library_path: self.library_path.clone(),
            slot_count: slots.len(),
            slot,
            outcome,
        })
    }

    fn advance(&mut self, next: SessionState) {
        debug_assert!(
            self.state.allows(&next),
            "invalid session transition {:?} -> {:?}",
            self.state,
            next
        );
        trace!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
    }

    fn fail(&mut self, err: EidError) -> EidError {
        self.advance(SessionState::Failed(err.kind()));
        err
    }
}
