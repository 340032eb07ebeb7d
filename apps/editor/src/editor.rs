use crate::binder::preview::Preview;
use crate::binder::Binder;
use crate::store::ResumeStore;

/// The store and its binder, wired together once at startup.
pub struct Editor {
    pub store: ResumeStore,
    pub binder: Binder,
}

impl Editor {
    pub fn new(mut store: ResumeStore, preview: Preview) -> Self {
        let mut binder = Binder::new(preview);
        binder.init(&mut store);
        Self { store, binder }
    }
}
