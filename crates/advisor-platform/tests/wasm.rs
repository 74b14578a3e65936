//! WASM-target tests for advisor-platform (Node.js runtime).
//!
//! Tests MemoryStorage, backend selection and BrowserTimer under
//! wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! localStorage and location helpers need a browser and are not covered here.

use wasm_bindgen_test::*;

use advisor_core::conversation::{ConversationStore, MESSAGES_KEY};
use advisor_core::ports::{StoragePort, TimerPort};
use advisor_platform::storage::{MemoryStorage, open_storage};
use advisor_platform::timer::BrowserTimer;
use advisor_types::config::StorageBackendType;
use advisor_types::message::Message;
use std::cell::Cell;
use std::rc::Rc;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
    assert!(storage.is_empty());
}

#[wasm_bindgen_test]
async fn memory_storage_set_get_delete() {
    let storage = MemoryStorage::new();
    assert!(storage.get("missing").await.unwrap().is_none());

    storage.set("key", "v1").await.unwrap();
    storage.set("key", "v2").await.unwrap();
    assert_eq!(storage.get("key").await.unwrap().as_deref(), Some("v2"));
    assert!(storage.exists("key").await.unwrap());

    storage.delete("key").await.unwrap();
    assert!(!storage.exists("key").await.unwrap());
    storage.delete("key").await.unwrap();
}

#[wasm_bindgen_test]
async fn memory_storage_restores_conversation() {
    let storage = MemoryStorage::new();
    let saved = serde_json::to_string(&vec![Message::greeting(), Message::user("hi")]).unwrap();
    storage.set(MESSAGES_KEY, &saved).await.unwrap();

    let store = ConversationStore::load(&storage).await;
    assert_eq!(store.len(), 2);
}

#[wasm_bindgen_test]
fn explicit_memory_backend() {
    let storage = open_storage(StorageBackendType::Memory);
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
fn auto_backend_falls_back_without_window() {
    // Node has no window, so localStorage cannot open
    let storage = open_storage(StorageBackendType::Auto);
    assert_eq!(storage.backend_name(), "memory");
}

// ─── BrowserTimer Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn timer_clock_is_wall_time() {
    let timer = BrowserTimer::new();
    assert!(timer.now_ms() > 1_600_000_000_000.0);
}

#[wasm_bindgen_test]
async fn timer_sleep_elapses() {
    let timer = BrowserTimer::new();
    let start = timer.now_ms();
    timer.sleep(20).await;
    assert!(timer.now_ms() - start >= 15.0);
}

#[wasm_bindgen_test]
async fn scheduled_task_runs() {
    let timer = BrowserTimer::new();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let handle = timer.schedule(10, Box::pin(async move { flag.set(true) }));

    timer.sleep(50).await;
    assert!(fired.get());
    drop(handle);
}

#[wasm_bindgen_test]
async fn cancelled_task_never_runs() {
    let timer = BrowserTimer::new();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let handle = timer.schedule(10, Box::pin(async move { flag.set(true) }));
    handle.cancel();

    timer.sleep(50).await;
    assert!(!fired.get());
}
