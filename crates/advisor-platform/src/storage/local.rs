//! `window.localStorage` backend.
//! Persistent across reloads, scoped to the page origin. String values only.

use async_trait::async_trait;
use web_sys::Storage;

use advisor_core::ports::StoragePort;
use advisor_types::{AdvisorError, Result};

const PROBE_KEY: &str = "msfeaAdvisor:probe";

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open localStorage and check it accepts writes.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| AdvisorError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| AdvisorError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| AdvisorError::Storage("localStorage not available".to_string()))?;

        // Safari private mode hands out a storage that throws on write
        storage
            .set_item(PROBE_KEY, "1")
            .map_err(|e| AdvisorError::Storage(format!("{:?}", e)))?;
        let _ = storage.remove_item(PROBE_KEY);

        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| AdvisorError::Storage(format!("{:?}", e)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AdvisorError::Storage(format!("{:?}", e)))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| AdvisorError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
