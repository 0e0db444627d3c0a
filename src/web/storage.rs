// `window.localStorage` behind the `KeyValueStore` seam.
use web_sys::{Storage, window};

use crate::error::PenduError;
use crate::scores::KeyValueStore;

pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Fails when storage is disabled (private browsing, sandboxed frames).
    pub fn open() -> Result<Self, PenduError> {
        let win = window().ok_or(PenduError::Js("no window".into()))?;
        let storage = win
            .local_storage()
            .map_err(|e| PenduError::Storage(crate::error::describe_js(&e)))?
            .ok_or_else(|| PenduError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PenduError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PenduError::Storage(crate::error::describe_js(&e)))
    }
}
