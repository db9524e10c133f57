//! Singleton lifecycle plumbing
//!
//! Process-wide singletons are modeled as explicit slots owned by the log
//! service rather than ambient globals. A slot creates its value lazily on
//! first use; the first successful create wins and later create calls return
//! the existing instance, ignoring their arguments, until an explicit clear.

use crate::core::error::{LoggerError, Result};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct Lifecycle<T> {
    component: &'static str,
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Lifecycle<T> {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            slot: RwLock::new(None),
        }
    }

    /// Return the existing instance, or create one with `init`. A failed
    /// `init` leaves the slot empty so a corrected call can retry.
    pub fn get_or_create<F>(&self, init: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut slot = self.slot.write();
        if let Some(existing) = slot.as_ref() {
            return Ok(Arc::clone(existing));
        }
        let created = Arc::new(init()?);
        *slot = Some(Arc::clone(&created));
        Ok(created)
    }

    /// Accessor form: fails when the slot is empty.
    pub fn get(&self) -> Result<Arc<T>> {
        self.slot
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| LoggerError::not_initialized(self.component))
    }

    pub fn peek(&self) -> Option<Arc<T>> {
        self.slot.read().as_ref().map(Arc::clone)
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Destroy the instance. Callers still holding a reference keep it;
    /// the next create call builds a fresh one.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}
