//! Event queue between the chat client (and its revert timer) and the UI.
//!
//! Single-threaded: producers are `spawn_local` futures and timer callbacks,
//! the consumer is the egui frame loop, which drains the queue each frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use advisor_types::event::AdvisorEvent;

/// Shared, clone-cheap handle to the queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<AdvisorEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: AdvisorEvent) {
        let mut queue = self.queue.borrow_mut();
        // A second "re-read the log" right behind the first adds nothing
        if event == AdvisorEvent::MessagesChanged
            && queue.back() == Some(&AdvisorEvent::MessagesChanged)
        {
            return;
        }
        queue.push_back(event);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<AdvisorEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_pending()
    }
}
