use serde::{Deserialize, Serialize};

/// Events emitted by the chat client.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdvisorEvent {
    /// A query was sent; the thinking placeholder is showing
    TurnStart { turn_id: u64 },

    /// The query finished (successfully or not)
    TurnEnd { turn_id: u64 },

    /// The active advisor changed to a department
    DepartmentSwitched { department: String, icon: String },

    /// The active advisor went back to the faculty default
    DepartmentReverted,

    /// The conversation log was mutated and should be re-read
    MessagesChanged,

    /// A request failed; the log already carries the user-facing copy
    Error { message: String },
}
