//! Conversation log and its best-effort persistence.
//!
//! The log is append-mostly: push, pop-last, insert-before-last and
//! filtered removal are the only mutations. Persistence follows one of two
//! mutually exclusive strategies:
//!
//! - `Local`: the whole log is written to storage after each mutation batch;
//! - `Server`: the backend owns history, only the session id is kept locally.

use advisor_types::{Result, message::Message};
use crate::ports::StoragePort;

pub const SESSION_ID_KEY: &str = "msfeaAdvisorSessionId";
pub const MESSAGES_KEY: &str = "msfeaAdvisorMessages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Local,
    Server { session_id: String },
}

/// A single storage operation produced by [`ConversationStore::take_writes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWrite {
    Set { key: String, value: String },
    Delete { key: String },
}

#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    persistence: Persistence,
    forget_session: bool,
}

impl ConversationStore {
    /// Fresh log holding only the greeting
    pub fn new() -> Self {
        Self::from_messages(Vec::new())
    }

    /// Log from restored messages; an empty list gets the greeting
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let messages = if messages.is_empty() {
            vec![Message::greeting()]
        } else {
            messages
        };
        Self {
            messages,
            persistence: Persistence::Local,
            forget_session: false,
        }
    }

    /// Rebuild from what storage held.
    ///
    /// A stored session id means the server owns history and the local log
    /// is ignored. Otherwise the saved JSON list is used when it parses to a
    /// non-empty array.
    pub fn restore(session_id: Option<String>, saved_messages: Option<&str>) -> Self {
        if let Some(session_id) = session_id.filter(|s| !s.is_empty()) {
            let mut store = Self::new();
            store.persistence = Persistence::Server { session_id };
            return store;
        }

        let messages = saved_messages
            .and_then(|json| match serde_json::from_str::<Vec<Message>>(json) {
                Ok(messages) => Some(messages),
                Err(e) => {
                    log::warn!("Error parsing saved messages: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        Self::from_messages(messages)
    }

    /// Read both persistence keys and restore. Storage errors leave a fresh log.
    pub async fn load(storage: &dyn StoragePort) -> Self {
        let session_id = storage.get(SESSION_ID_KEY).await.unwrap_or_else(|e| {
            log::warn!("Could not read session id: {}", e);
            None
        });
        let saved = if session_id.is_none() {
            storage.get(MESSAGES_KEY).await.unwrap_or_else(|e| {
                log::warn!("Could not read saved messages: {}", e);
                None
            })
        } else {
            None
        };
        let store = Self::restore(session_id, saved.as_deref());
        log::info!(
            "Conversation restored from {} ({} messages)",
            storage.backend_name(),
            store.len()
        );
        store
    }

    // ─── Reads ───────────────────────────────────────────────

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn has_thinking(&self) -> bool {
        self.messages.iter().any(|m| m.is_thinking)
    }

    /// Only the greeting so far (the UI offers suggested questions then)
    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1 && self.messages[0].is_bot()
    }

    /// Department of the most recent real bot reply
    pub fn last_bot_department(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_bot() && !m.is_thinking)
            .and_then(|m| m.department.as_deref())
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn session_id(&self) -> Option<&str> {
        match &self.persistence {
            Persistence::Server { session_id } => Some(session_id),
            Persistence::Local => None,
        }
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Append a message. A thinking placeholder replaces any existing one.
    pub fn push(&mut self, msg: Message) {
        if msg.is_thinking {
            self.messages.retain(|m| !m.is_thinking);
        }
        self.messages.push(msg);
    }

    pub fn pop(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    /// Pop the last message if it is the thinking placeholder
    pub fn pop_thinking(&mut self) -> Option<Message> {
        if self.messages.last().is_some_and(|m| m.is_thinking) {
            self.messages.pop()
        } else {
            None
        }
    }

    /// Insert directly before the last message (or append when empty)
    pub fn insert_before_last(&mut self, msg: Message) {
        let at = self.messages.len().saturating_sub(1);
        self.messages.insert(at, msg);
    }

    /// Drop every message matching `pred`; returns how many were removed
    pub fn remove_where(&mut self, pred: impl Fn(&Message) -> bool) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| !pred(m));
        before - self.messages.len()
    }

    /// Replace the log with a single message
    pub fn reset_to(&mut self, msg: Message) {
        self.messages = vec![msg];
    }

    /// Switch to server-owned history
    pub fn attach_session(&mut self, session_id: impl Into<String>) {
        let session_id = session_id.into();
        if self.session_id() != Some(session_id.as_str()) {
            log::info!("Server session assigned: {}", session_id);
        }
        self.persistence = Persistence::Server { session_id };
        self.forget_session = false;
    }

    /// Back to local persistence; returns the session id that was dropped
    pub fn detach_session(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.persistence, Persistence::Local) {
            Persistence::Server { session_id } => {
                self.forget_session = true;
                Some(session_id)
            }
            Persistence::Local => None,
        }
    }

    // ─── Persistence ─────────────────────────────────────────

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.messages)?)
    }

    /// Storage operations that bring storage in line with the log.
    /// Owned so they can be awaited without holding a borrow on the store.
    pub fn take_writes(&mut self) -> Result<Vec<StorageWrite>> {
        let mut writes = Vec::new();
        if std::mem::take(&mut self.forget_session) {
            writes.push(StorageWrite::Delete {
                key: SESSION_ID_KEY.to_string(),
            });
        }
        match &self.persistence {
            Persistence::Local => writes.push(StorageWrite::Set {
                key: MESSAGES_KEY.to_string(),
                value: self.to_json()?,
            }),
            Persistence::Server { session_id } => writes.push(StorageWrite::Set {
                key: SESSION_ID_KEY.to_string(),
                value: session_id.clone(),
            }),
        }
        Ok(writes)
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply writes in order. Failures are logged and skipped: persistence is
/// best-effort.
pub async fn apply_writes(storage: &dyn StoragePort, writes: Vec<StorageWrite>) {
    for write in writes {
        let result = match &write {
            StorageWrite::Set { key, value } => storage.set(key, value).await,
            StorageWrite::Delete { key } => storage.delete(key).await,
        };
        if let Err(e) = result {
            log::warn!("Persisting {:?} to {} failed: {}", write, storage.backend_name(), e);
        }
    }
}
