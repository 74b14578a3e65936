//! UI-level state that drives rendering.
//!
//! A read-only projection of the chat client: the app drains the EventBus
//! into [`UiState::process_events`] each frame and, when the log changed,
//! hands a fresh snapshot to [`UiState::set_messages`].

use std::collections::HashMap;

use advisor_core::calendar::CourseLinks;
use advisor_core::schedule::{extract_schedule, ScheduleExtraction};
use advisor_core::timetable::{list_rows, ScheduleRow, WeeklyGrid, WeeklyGridBuilder};
use advisor_types::config::Language;
use advisor_types::department::{DEFAULT_DEPARTMENT, DEFAULT_ICON};
use advisor_types::event::AdvisorEvent;
use advisor_types::message::{Message, Role};
use advisor_types::schedule::ScheduleData;

/// Questions offered on a fresh conversation
pub const SUGGESTIONS: [&str; 4] = [
    "What majors are offered at MSFEA?",
    "How can I declare my major?",
    "What are the graduation requirements for ECE?",
    "What electives are available for my department?",
];

/// State visible to UI panels
pub struct UiState {
    /// Conversation log, prepared for display
    pub entries: Vec<ChatEntry>,
    /// A turn is in flight
    pub busy: bool,
    pub status_text: String,
    pub current_department: String,
    pub current_icon: String,
    pub input_text: String,
    pub show_settings: bool,
    pub show_sidebar: bool,
    pub language: Language,
    /// List/week choice per schedule, keyed by entry index
    pub schedule_views: HashMap<usize, ScheduleView>,
    /// Open calendar window, if any
    pub calendar: Option<CalendarView>,
    pub toast: Option<Toast>,
    needs_refresh: bool,
}

/// A log entry with its schedule, if the reply carried one
#[derive(Clone)]
pub struct ChatEntry {
    pub message: Message,
    /// Content with the schedule JSON removed
    pub display_text: String,
    pub schedule: Option<ScheduleData>,
    pub grid: Option<WeeklyGrid>,
    pub list_rows: Vec<ScheduleRow>,
}

impl ChatEntry {
    pub fn from_message(message: Message) -> Self {
        // Only settled bot replies can carry a schedule
        let extraction = if message.is_bot() && !message.is_thinking {
            extract_schedule(&message.content)
        } else {
            ScheduleExtraction::NotFound
        };

        match extraction {
            ScheduleExtraction::Found { data, display_text } => {
                let grid = WeeklyGridBuilder::build(&data);
                if grid.conflicts() > 0 {
                    log::debug!("Schedule has {} overlapping placements", grid.conflicts());
                }
                Self {
                    list_rows: list_rows(&data),
                    grid: Some(grid),
                    schedule: Some(data),
                    display_text: display_text.trim().to_string(),
                    message,
                }
            }
            ScheduleExtraction::NotFound | ScheduleExtraction::Invalid(_) => Self {
                display_text: message.content.clone(),
                schedule: None,
                grid: None,
                list_rows: Vec::new(),
                message,
            },
        }
    }

    pub fn role(&self) -> Role {
        self.message.role
    }

    pub fn is_thinking(&self) -> bool {
        self.message.is_thinking
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleView {
    #[default]
    List,
    Week,
}

/// Calendar export requested from a schedule
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarAction {
    /// Per-meeting "add event" links
    Links(ScheduleData),
    /// One link for the whole schedule
    SingleLink(ScheduleData),
    /// OAuth round trip that creates the events
    Google(ScheduleData),
}

/// What the calendar window shows
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarView {
    Options(ScheduleData),
    Loading,
    Links(Vec<CourseLinks>),
    Single(String),
    Failed(String),
}

/// Transient banner, e.g. the outcome of the OAuth callback
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub success: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            entries: vec![ChatEntry::from_message(Message::greeting())],
            busy: false,
            status_text: "Ready".to_string(),
            current_department: DEFAULT_DEPARTMENT.to_string(),
            current_icon: DEFAULT_ICON.to_string(),
            input_text: String::new(),
            show_settings: false,
            show_sidebar: true,
            language: Language::default(),
            schedule_views: HashMap::new(),
            calendar: None,
            toast: None,
            needs_refresh: true,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<AdvisorEvent>) {
        for event in events {
            match event {
                AdvisorEvent::TurnStart { .. } => {
                    self.busy = true;
                    self.status_text = "Thinking...".to_string();
                }
                AdvisorEvent::TurnEnd { .. } => {
                    self.busy = false;
                    self.status_text = "Ready".to_string();
                }
                AdvisorEvent::DepartmentSwitched { department, icon } => {
                    self.current_department = department;
                    self.current_icon = icon;
                }
                AdvisorEvent::DepartmentReverted => {
                    self.current_department = DEFAULT_DEPARTMENT.to_string();
                    self.current_icon = DEFAULT_ICON.to_string();
                }
                AdvisorEvent::MessagesChanged => {
                    self.needs_refresh = true;
                }
                AdvisorEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    /// Whether the log should be re-read; clears the flag
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.needs_refresh)
    }

    /// Replace the displayed log with a snapshot from the client
    pub fn set_messages(&mut self, messages: Vec<Message>) {
        if messages.len() < self.entries.len() {
            // Shrunk: a reset, so earlier view choices no longer line up
            self.schedule_views.clear();
        }
        self.entries = messages.into_iter().map(ChatEntry::from_message).collect();
    }

    /// Only the greeting is showing
    pub fn is_fresh(&self) -> bool {
        self.entries.len() <= 1
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn view_for(&self, entry: usize) -> ScheduleView {
        self.schedule_views.get(&entry).copied().unwrap_or_default()
    }

    pub fn set_view(&mut self, entry: usize, view: ScheduleView) {
        self.schedule_views.insert(entry, view);
    }

    pub fn open_calendar(&mut self, schedule: ScheduleData) {
        self.calendar = Some(CalendarView::Options(schedule));
    }

    pub fn close_calendar(&mut self) {
        self.calendar = None;
    }

    pub fn show_toast(&mut self, message: impl Into<String>, success: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            success,
        });
    }

    /// Take the typed text for sending; None when blank or busy
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() || self.busy {
            return None;
        }
        self.input_text.clear();
        Some(text)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
