//! Per-widget chat state: the conversation log plus the department router.
//!
//! Everything here is synchronous. The [`ChatClient`](crate::client::ChatClient)
//! owns an `AdvisorSession` behind `Rc<RefCell<_>>` and drives it around
//! the awaits, so no borrow is ever held while a request is pending.

use advisor_types::{
    AdvisorError, Result,
    config::Language,
    department,
    message::Message,
};
use crate::conversation::ConversationStore;
use crate::ports::{AdvisoryRequest, AdvisoryResponse};
use crate::router::{self, DepartmentRouter, RevertOutcome, SwitchOutcome};

pub const NO_CONTENT_TEXT: &str = "No content available";

pub const CONNECTION_ERROR_TEXT: &str = "Could not connect to the advisor service. \
     Please check your internet connection and try again.";

pub const SERVER_ERROR_TEXT: &str = "The server returned an error. Please try again. \
     If the problem persists, try a different question or contact technical support.";

/// User-facing copy for a failed query
pub fn error_copy(error: &AdvisorError) -> &'static str {
    if error.is_connection_failure() {
        CONNECTION_ERROR_TEXT
    } else {
        SERVER_ERROR_TEXT
    }
}

/// A query that has been accepted and is waiting for its reply
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub turn_id: u64,
    pub request: AdvisoryRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The reply was appended; `switch` says what the router did
    Answered { turn_id: u64, switch: SwitchOutcome },
    /// The error copy was appended in place of a reply
    Failed { turn_id: u64, error: AdvisorError },
    /// The turn was abandoned (by a reset) before its reply arrived
    Stale { turn_id: u64 },
}

pub struct AdvisorSession {
    store: ConversationStore,
    router: DepartmentRouter,
    turn_counter: u64,
    in_flight: Option<u64>,
}

impl AdvisorSession {
    pub fn new(store: ConversationStore) -> Self {
        Self {
            store,
            router: DepartmentRouter::new(),
            turn_counter: 0,
            in_flight: None,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn router(&self) -> &DepartmentRouter {
        &self.router
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Swap in a restored log. Any turn in flight is abandoned.
    pub fn replace_store(&mut self, store: ConversationStore) {
        self.store = store;
        self.in_flight = None;
    }

    /// Accept a user message and show the thinking placeholder.
    ///
    /// Returns None for blank input, or while another turn is in flight
    /// (there is never more than one placeholder).
    pub fn begin_turn(&mut self, text: &str, language: Language) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(turn_id) = self.in_flight {
            log::warn!("Turn {} still in flight, ignoring new message", turn_id);
            return None;
        }

        self.turn_counter += 1;
        let turn_id = self.turn_counter;
        self.in_flight = Some(turn_id);

        self.store.push(Message::user(text));
        self.store.push(Message::thinking(
            self.router.current_department(),
            self.router.current_icon(),
        ));

        Some(PendingTurn {
            turn_id,
            request: AdvisoryRequest {
                text: text.to_string(),
                language,
                session_id: self.store.session_id().map(str::to_string),
            },
        })
    }

    /// Replace the placeholder with the reply (or the error copy).
    pub fn complete_turn(
        &mut self,
        turn_id: u64,
        query: &str,
        result: Result<AdvisoryResponse>,
        now_ms: f64,
    ) -> TurnOutcome {
        if self.in_flight != Some(turn_id) {
            log::debug!("Dropping reply for abandoned turn {}", turn_id);
            return TurnOutcome::Stale { turn_id };
        }
        self.in_flight = None;

        if self.store.pop_thinking().is_none() {
            self.store.remove_where(|m| m.is_thinking);
        }

        match result {
            Ok(response) => {
                let switch = self.adopt_reply(query, response, now_ms);
                TurnOutcome::Answered { turn_id, switch }
            }
            Err(error) => {
                log::error!("Advisory query failed: {}", error);
                self.store.push(Message::bot(
                    error_copy(&error),
                    self.router.current_department(),
                    self.router.current_icon(),
                ));
                TurnOutcome::Failed { turn_id, error }
            }
        }
    }

    fn adopt_reply(&mut self, query: &str, response: AdvisoryResponse, now_ms: f64) -> SwitchOutcome {
        let resolved = DepartmentRouter::resolve(response.department.as_deref(), query);
        let switch = self.router.adopt(&resolved, now_ms);

        if let SwitchOutcome::Reverted(RevertOutcome::Announced { notice }) = &switch {
            self.announce_return(notice);
        }

        let content = response
            .content
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| NO_CONTENT_TEXT.to_string());
        let icon = department::icon_for(&resolved);
        self.store.push(Message::bot(content, resolved.as_str(), icon));

        if let SwitchOutcome::Switched { notice, .. } = &switch {
            self.store.insert_before_last(Message::system(notice.as_str()));
        }

        if let Some(session_id) = response.session_id.filter(|s| !s.is_empty()) {
            self.store.attach_session(session_id);
        }

        switch
    }

    /// The scheduled return to the default advisor fired
    pub fn apply_revert(&mut self, now_ms: f64) -> RevertOutcome {
        let outcome = self.router.revert(now_ms);
        if let RevertOutcome::Announced { notice } = &outcome {
            self.announce_return(notice);
        }
        outcome
    }

    fn announce_return(&mut self, notice: &str) {
        let removed = self.store.remove_where(router::is_returned_notice);
        if removed > 0 {
            log::debug!("Removed {} earlier return notice(s)", removed);
        }
        self.store.push(Message::system(notice));
    }

    /// Back to the greeting and the default advisor. Returns the server
    /// session id the backend should forget, if there was one.
    pub fn reset(&mut self) -> Option<String> {
        self.router.reset();
        self.in_flight = None;
        self.store.reset_to(Message::greeting());
        self.store.detach_session()
    }
}

impl Default for AdvisorSession {
    fn default() -> Self {
        Self::new(ConversationStore::new())
    }
}
