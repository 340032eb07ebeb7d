use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use crate::binder::preview::Preview;
use crate::config::Config;
use crate::editor::Editor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One editor for the whole process. Handlers hold the lock for a single
    /// synchronous store operation and never across an await.
    editor: Arc<Mutex<Editor>>,
    /// Same output the editor's binder renders into; readable without the lock.
    pub preview: Preview,
    pub config: Config,
}

impl AppState {
    pub fn new(editor: Editor, preview: Preview, config: Config) -> Self {
        Self {
            editor: Arc::new(Mutex::new(editor)),
            preview,
            config,
        }
    }

    pub fn editor(&self) -> MutexGuard<'_, Editor> {
        self.editor.lock().unwrap_or_else(|poisoned| {
            // A handler panicked while holding the lock. `set_state` finishes
            // its merge before persisting or notifying, so the resume itself is
            // whole, but a panicking listener skips those after it and the
            // preview can lag until the next write.
            warn!("Editor lock was poisoned by a panicked request, recovering");
            poisoned.into_inner()
        })
    }
}
