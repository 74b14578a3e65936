//! Backend selection.
//!
//! `Auto` prefers localStorage and falls back to memory when the browser
//! refuses it. An explicit `LocalStorage` choice falls back the same way
//! rather than leaving the widget without storage.

use std::rc::Rc;
use advisor_core::ports::StoragePort;
use advisor_types::config::StorageBackendType;
use super::{LocalStorage, MemoryStorage};

/// Open the configured backend. Never fails: memory is always available.
pub fn open_storage(backend: StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::Auto | StorageBackendType::LocalStorage => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Rc::new(local)
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Rc::new(MemoryStorage::new())
            }
        },
    }
}
