//! View binder: connects bindable form fields and the read-only preview to
//! the resume store. It keeps no copy of the resume: field values are read
//! from the store on demand and edits are written straight back.

pub mod form;
pub mod path;
pub mod preview;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ResumePatch, ResumeState};
use crate::store::{Persisted, ResumeStore};
use path::{FieldPath, PathError};
use preview::Preview;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Binder is not initialized")]
    NotInitialized,
}

/// A bindable field with its current displayed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundField {
    pub path: String,
    pub value: String,
}

impl BoundField {
    pub fn new(state: &ResumeState, path: FieldPath) -> Self {
        Self {
            path: path.to_string(),
            value: field_value(state, path).to_string(),
        }
    }
}

pub struct Binder {
    preview: Preview,
    initialized: bool,
}

impl Binder {
    pub fn new(preview: Preview) -> Self {
        Self {
            preview,
            initialized: false,
        }
    }

    /// One-time setup: renders the preview from the current state and
    /// subscribes it to every future write. Returns `false` if the binder
    /// was already initialized, in which case nothing happens.
    pub fn init(&mut self, store: &mut ResumeStore) -> bool {
        if self.initialized {
            debug!("Binder already initialized, skipping");
            return false;
        }
        self.preview.render(store.state());
        let preview = self.preview.clone();
        store.subscribe(move |state| preview.render(state));
        self.initialized = true;
        info!("Binder initialized");
        true
    }

    /// Displayed values for every bindable field, in form order.
    pub fn fields(&self, state: &ResumeState) -> Vec<BoundField> {
        FieldPath::all()
            .map(|path| BoundField::new(state, path))
            .collect()
    }

    /// The change handler of a bound field. Copies the current sub-record,
    /// overrides the one leaf and writes the whole sub-record back.
    pub fn handle_change(
        &self,
        store: &mut ResumeStore,
        path: FieldPath,
        value: String,
    ) -> Result<Persisted, BindError> {
        if !self.initialized {
            return Err(BindError::NotInitialized);
        }
        let patch = match path {
            FieldPath::Personal(field) => {
                let mut personal = store.state().personal.clone();
                field.set(&mut personal, value);
                ResumePatch::personal(personal)
            }
        };
        debug!("Field {path} changed");
        Ok(store.set_state(patch))
    }
}

pub fn field_value(state: &ResumeState, path: FieldPath) -> &str {
    match path {
        FieldPath::Personal(field) => field.get(&state.personal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    fn setup() -> (ResumeStore, Binder, Preview) {
        let mut store = ResumeStore::open(Box::new(MemoryStorage::new()), "resumeState");
        let preview = Preview::new();
        let mut binder = Binder::new(preview.clone());
        assert!(binder.init(&mut store));
        (store, binder, preview)
    }

    #[test]
    fn test_init_renders_immediately() {
        let (_store, _binder, preview) = setup();
        assert_eq!(preview.current().revision, 1);
        assert!(preview.current().html.contains("John Doe"));
    }

    #[test]
    fn test_second_init_is_noop() {
        let (mut store, mut binder, preview) = setup();
        assert!(!binder.init(&mut store));
        store.set_state(ResumePatch::skills("Rust")).unwrap();
        // One subscription only: initial render plus one re-render.
        assert_eq!(preview.current().revision, 2);
    }

    #[test]
    fn test_change_before_init_is_rejected() {
        let mut store = ResumeStore::open(Box::new(MemoryStorage::new()), "resumeState");
        let binder = Binder::new(Preview::new());
        assert_eq!(
            binder
                .handle_change(&mut store, path("personal.email"), "x@y.z".to_string())
                .unwrap_err(),
            BindError::NotInitialized
        );
        assert_eq!(*store.state(), ResumeState::seed());
    }

    #[test]
    fn test_fields_reflect_state() {
        let (store, binder, _) = setup();
        let fields = binder.fields(store.state());
        assert_eq!(fields.len(), 7);
        assert_eq!(
            fields[0],
            BoundField {
                path: "personal.fullName".to_string(),
                value: "John Doe".to_string(),
            }
        );
        assert!(fields
            .iter()
            .any(|f| f.path == "personal.email" && f.value == "john.doe@example.com"));
    }

    #[test]
    fn test_edit_keeps_sibling_fields_and_updates_preview() {
        let (mut store, binder, preview) = setup();

        binder
            .handle_change(&mut store, path("personal.fullName"), "Jane Smith".to_string())
            .unwrap()
            .unwrap();

        assert_eq!(store.state().personal.full_name, "Jane Smith");
        assert_eq!(store.state().personal.email, "john.doe@example.com");

        let html = preview.current().html;
        assert!(html.contains("Jane Smith"));
        assert!(html.contains("john.doe@example.com"));
        assert!(!html.contains("John Doe"));
    }

    #[test]
    fn test_bound_field_reads_edited_value() {
        let (mut store, binder, _) = setup();
        binder
            .handle_change(&mut store, path("personal.website"), "jane.dev".to_string())
            .unwrap()
            .unwrap();
        assert_eq!(
            BoundField::new(store.state(), path("personal.website")),
            BoundField {
                path: "personal.website".to_string(),
                value: "jane.dev".to_string(),
            }
        );
    }

    #[test]
    fn test_edit_reports_failed_persistence() {
        let storage = MemoryStorage::new();
        let mut store = ResumeStore::open(Box::new(storage.clone()), "resumeState");
        let preview = Preview::new();
        let mut binder = Binder::new(preview.clone());
        binder.init(&mut store);

        storage.set_fail_writes(true);
        let persisted = binder
            .handle_change(&mut store, path("personal.phone"), "555".to_string())
            .unwrap();

        assert!(persisted.is_err());
        assert_eq!(store.state().personal.phone, "555");
        assert!(preview.current().html.contains("555"));
    }
}
