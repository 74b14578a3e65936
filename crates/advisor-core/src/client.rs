//! Chat client: runs one advisory turn at a time against the ports.
//!
//! Per user message:
//! 1. Push the user message and the thinking placeholder, persist
//! 2. Query the backend (bounded by the request timeout) while the
//!    thinking grace delay runs; wait for both
//! 3. Swap the placeholder for the reply or the error copy, persist
//! 4. If a department took over, schedule the return to the default advisor
//!
//! Must be driven from `wasm_bindgen_futures::spawn_local` in the browser.

use std::cell::RefCell;
use std::rc::Rc;
use futures::future::{self, Either};
use advisor_types::{
    AdvisorError, Result,
    config::AdvisorConfig,
    event::AdvisorEvent,
    message::Message,
};
use crate::conversation::{self, ConversationStore};
use crate::event_bus::EventBus;
use crate::ports::*;
use crate::router::{RevertOutcome, SwitchOutcome};
use crate::session::{AdvisorSession, TurnOutcome};

/// Clone-cheap handle; clones share one session.
#[derive(Clone)]
pub struct ChatClient {
    config: Rc<RefCell<AdvisorConfig>>,
    session: Rc<RefCell<AdvisorSession>>,
    api: Rc<dyn AdvisoryPort>,
    storage: Rc<dyn StoragePort>,
    timer: Rc<dyn TimerPort>,
    event_bus: EventBus,
    pending_revert: Rc<RefCell<Option<ScheduledTask>>>,
}

impl ChatClient {
    pub fn new(
        config: AdvisorConfig,
        api: Rc<dyn AdvisoryPort>,
        storage: Rc<dyn StoragePort>,
        timer: Rc<dyn TimerPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            config: Rc::new(RefCell::new(config)),
            session: Rc::new(RefCell::new(AdvisorSession::default())),
            api,
            storage,
            timer,
            event_bus,
            pending_revert: Rc::new(RefCell::new(None)),
        }
    }

    /// Restore the conversation persisted by an earlier page load
    pub async fn restore(&self) {
        let store = ConversationStore::load(self.storage.as_ref()).await;
        self.session.borrow_mut().replace_store(store);
        self.event_bus.emit(AdvisorEvent::MessagesChanged);
    }

    // ─── Reads ───────────────────────────────────────────────

    /// Snapshot of the conversation log
    pub fn messages(&self) -> Vec<Message> {
        self.session.borrow().messages().to_vec()
    }

    /// Active department name and icon
    pub fn current_department(&self) -> (String, String) {
        let session = self.session.borrow();
        let router = session.router();
        (
            router.current_department().to_string(),
            router.current_icon().to_string(),
        )
    }

    pub fn session_id(&self) -> Option<String> {
        self.session.borrow().store().session_id().map(str::to_string)
    }

    pub fn is_busy(&self) -> bool {
        self.session.borrow().is_busy()
    }

    pub fn has_pending_revert(&self) -> bool {
        self.pending_revert.borrow().is_some()
    }

    pub fn config(&self) -> AdvisorConfig {
        self.config.borrow().clone()
    }

    pub fn set_config(&self, config: AdvisorConfig) {
        *self.config.borrow_mut() = config;
    }

    // ─── Turns ───────────────────────────────────────────────

    /// Send one user message and wait for the reply.
    ///
    /// Blank input and messages sent while a turn is in flight are ignored.
    /// A failed query has already been written to the log as error copy when
    /// its error is returned here.
    pub async fn send(&self, text: &str) -> Result<()> {
        let (language, timeout_ms, thinking_ms) = {
            let config = self.config.borrow();
            (
                config.language,
                config.api.request_timeout_ms,
                config.timing.thinking_delay_ms,
            )
        };

        let Some(turn) = self.session.borrow_mut().begin_turn(text, language) else {
            return Ok(());
        };
        let turn_id = turn.turn_id;
        let query = turn.request.text.clone();

        self.cancel_pending_revert();
        self.event_bus.emit(AdvisorEvent::TurnStart { turn_id });
        self.event_bus.emit(AdvisorEvent::MessagesChanged);
        self.persist().await;

        let (result, ()) = futures::join!(
            self.query_with_timeout(turn.request, timeout_ms),
            self.timer.sleep(thinking_ms)
        );

        let now = self.timer.now_ms();
        let outcome = self
            .session
            .borrow_mut()
            .complete_turn(turn_id, &query, result, now);

        let outcome = match outcome {
            TurnOutcome::Stale { .. } => return Ok(()),
            TurnOutcome::Answered { switch, .. } => {
                self.apply_switch(switch);
                Ok(())
            }
            TurnOutcome::Failed { error, .. } => {
                // The revert was cancelled when this turn began; a switched
                // department must still time out
                let switched = self.session.borrow().router().state().is_switched();
                if switched {
                    self.schedule_revert();
                }
                self.event_bus.emit(AdvisorEvent::Error {
                    message: error.to_string(),
                });
                Err(error)
            }
        };

        self.event_bus.emit(AdvisorEvent::MessagesChanged);
        self.event_bus.emit(AdvisorEvent::TurnEnd { turn_id });
        self.persist().await;
        outcome
    }

    async fn query_with_timeout(&self, req: AdvisoryRequest, timeout_ms: u32) -> Result<AdvisoryResponse> {
        let query = self.api.query(req);
        let deadline = self.timer.sleep(timeout_ms);
        match future::select(query, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                log::warn!("Advisory query timed out after {}ms", timeout_ms);
                Err(AdvisorError::Timeout(timeout_ms))
            }
        }
    }

    fn apply_switch(&self, switch: SwitchOutcome) {
        match switch {
            SwitchOutcome::StayedDefault => {}
            SwitchOutcome::Reverted(RevertOutcome::AlreadyDefault) => {}
            SwitchOutcome::Reverted(_) => {
                self.event_bus.emit(AdvisorEvent::DepartmentReverted);
            }
            SwitchOutcome::Switched { department, icon, .. } => {
                self.event_bus
                    .emit(AdvisorEvent::DepartmentSwitched { department, icon });
                self.schedule_revert();
            }
        }
    }

    // ─── Revert timer ────────────────────────────────────────

    fn schedule_revert(&self) {
        let delay = self.config.borrow().timing.revert_delay_ms();
        let client = self.clone();
        let task = self.timer.schedule(
            delay,
            Box::pin(async move {
                client.fire_revert().await;
            }),
        );
        log::debug!("Return to default advisor scheduled in {}ms", delay);
        // Replacing the handle cancels the previous timer
        let previous = self.pending_revert.borrow_mut().replace(task);
        drop(previous);
    }

    /// Cancel the scheduled return, if any
    pub fn cancel_pending_revert(&self) {
        let pending = self.pending_revert.borrow_mut().take();
        if let Some(task) = pending {
            log::debug!("Pending return to default advisor cancelled");
            task.cancel();
        }
    }

    /// Return to the default advisor now. Called by the revert timer.
    pub async fn fire_revert(&self) {
        let fired = self.pending_revert.borrow_mut().take();
        if let Some(task) = fired {
            task.disarm();
        }

        let now = self.timer.now_ms();
        let outcome = self.session.borrow_mut().apply_revert(now);
        match outcome {
            RevertOutcome::AlreadyDefault => return,
            RevertOutcome::Announced { .. } => {
                self.event_bus.emit(AdvisorEvent::DepartmentReverted);
                self.event_bus.emit(AdvisorEvent::MessagesChanged);
            }
            RevertOutcome::Debounced => {
                self.event_bus.emit(AdvisorEvent::DepartmentReverted);
            }
        }
        self.persist().await;
    }

    // ─── Reset & persistence ─────────────────────────────────

    /// Start over: greeting only, default advisor, backend told to forget.
    pub async fn reset(&self) {
        self.cancel_pending_revert();
        let was_switched = self.session.borrow().router().state().is_switched();
        let session_id = self.session.borrow_mut().reset();

        if was_switched {
            self.event_bus.emit(AdvisorEvent::DepartmentReverted);
        }
        self.event_bus.emit(AdvisorEvent::MessagesChanged);
        self.persist().await;

        match self.api.reset(session_id.as_deref()).await {
            Ok(()) => log::info!("Conversation reset"),
            Err(e) => log::warn!("Backend reset failed: {}", e),
        }
    }

    /// Write the log (or the session id) to storage. Best-effort.
    pub async fn persist(&self) {
        let writes = match self.session.borrow_mut().store_mut().take_writes() {
            Ok(writes) => writes,
            Err(e) => {
                log::warn!("Could not serialize conversation: {}", e);
                return;
            }
        };
        conversation::apply_writes(self.storage.as_ref(), writes).await;
    }
}
