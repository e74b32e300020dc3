use std::{fmt, sync::Arc};

/// A side-effect-only callback run before a write statement.
pub type Trigger = Arc<dyn Fn() + Send + Sync>;

/// The optional hooks of an entity. Each one, when present, is called exactly
/// once before its statement is sent to the store.
#[derive(Clone, Default)]
pub struct Triggers {
    pub pre_insert: Option<Trigger>,
    pub pre_update: Option<Trigger>,
    pub pre_delete: Option<Trigger>,
}

impl Triggers {
    pub fn fire_pre_insert(&self) {
        if let Some(hook) = &self.pre_insert {
            hook();
        }
    }

    pub fn fire_pre_update(&self) {
        if let Some(hook) = &self.pre_update {
            hook();
        }
    }

    pub fn fire_pre_delete(&self) {
        if let Some(hook) = &self.pre_delete {
            hook();
        }
    }
}

impl fmt::Debug for Triggers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Triggers")
            .field("pre_insert", &self.pre_insert.is_some())
            .field("pre_update", &self.pre_update.is_some())
            .field("pre_delete", &self.pre_delete.is_some())
            .finish()
    }
}
