//! Resume store: the single authoritative holder of [`ResumeState`].
//!
//! Every write goes through [`ResumeStore::set_state`], which merges the
//! patch, persists the whole document and then notifies every listener in
//! registration order. All of it runs synchronously on the caller's thread.
//!
//! Listeners only ever see `&ResumeState`; the store is mutably borrowed for
//! the whole of `set_state`, so a listener cannot issue a nested write.

pub mod entries;
pub mod storage;

use tracing::{debug, info, warn};

use crate::models::{ResumePatch, ResumeState};
use storage::{StorageBackend, StorageError};

/// Outcome of the persistence step of a write. An `Err` never means the
/// write was lost: the in-memory state has already been updated.
pub type Persisted = Result<(), StorageError>;

pub type Listener = Box<dyn FnMut(&ResumeState) + Send>;

pub struct ResumeStore {
    state: ResumeState,
    backend: Box<dyn StorageBackend>,
    key: String,
    listeners: Vec<Listener>,
}

impl ResumeStore {
    /// Opens the store over `backend`, loading whatever is persisted under
    /// `key` or falling back to the seed document.
    pub fn open(backend: Box<dyn StorageBackend>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = initial_state(backend.as_ref(), &key);
        Self {
            state,
            backend,
            key,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &ResumeState {
        &self.state
    }

    pub fn snapshot(&self) -> ResumeState {
        self.state.clone()
    }

    pub fn set_state(&mut self, patch: ResumePatch) -> Persisted {
        self.state.apply(patch);
        let persisted = self.persist();
        debug!(
            "Resume updated, notifying {} listener(s)",
            self.listeners.len()
        );
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
        persisted
    }

    /// Registers `listener` for every future write. There is no
    /// unsubscribe and no deduplication.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ResumeState) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn persist(&self) -> Persisted {
        let blob = serde_json::to_string(&self.state).map_err(StorageError::Serialize)?;
        self.backend.set(&self.key, &blob)
    }
}

/// Reads and parses the persisted document. `Ok(None)` means nothing is
/// stored under `key`.
pub fn load_persisted(
    backend: &dyn StorageBackend,
    key: &str,
) -> Result<Option<ResumeState>, StorageError> {
    let Some(blob) = backend.get(key)? else {
        return Ok(None);
    };
    let state = serde_json::from_str(&blob).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    entries::validate_state(&state).map_err(|source| StorageError::Invalid {
        key: key.to_string(),
        source,
    })?;
    Ok(Some(state))
}

/// Never fails: anything short of a well-formed persisted document yields
/// the seed.
pub fn initial_state(backend: &dyn StorageBackend, key: &str) -> ResumeState {
    match load_persisted(backend, key) {
        Ok(Some(state)) => {
            info!("Loaded persisted resume from '{key}'");
            state
        }
        Ok(None) => {
            info!("No persisted resume under '{key}', starting from seed");
            ResumeState::seed()
        }
        Err(e) => {
            warn!("Discarding persisted resume: {e}");
            ResumeState::seed()
        }
    }
}
