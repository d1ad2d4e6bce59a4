// window.localStorage (только WASM)

use crate::storage::KeyValueStore;
use crate::utils::error::{js_error, MomentsError, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| MomentsError::StorageError("not running in a browser".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage is unavailable", e))?
            .ok_or_else(|| MomentsError::StorageError("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error(&format!("Failed to read {}", key), e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // QuotaExceededError на больших списках
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error(&format!("Failed to write {}", key), e))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error(&format!("Failed to remove {}", key), e))
    }
}
