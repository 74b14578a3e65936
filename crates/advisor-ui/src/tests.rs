#[cfg(test)]
mod tests {
    use crate::markdown::{bold_spans, Span};
    use crate::panels::settings::storage_description;
    use crate::state::*;
    use crate::theme::{course_border, course_fill, hsl};
    use advisor_types::config::{Language, StorageBackendType};
    use advisor_types::department::{DEFAULT_DEPARTMENT, DEFAULT_ICON};
    use advisor_types::event::AdvisorEvent;
    use advisor_types::message::*;
    use egui::Color32;

    const SCHEDULE_REPLY: &str = "Here is your schedule:\n```json\n{\"is_schedule\": true, \"schedule\": [{\"course_code\": \"EECE 230\", \"section\": 2, \"instructor\": \"Dr. Saab\", \"meetings\": [{\"days\": [\"Tuesday\", \"Thursday\"], \"start_time\": \"2:00 pm\", \"end_time\": \"3:15 pm\", \"location\": \"Bechtel 110\"}]}]}\n```";

    fn plain(text: &str) -> Span<'_> {
        Span { text, bold: false }
    }

    fn bold(text: &str) -> Span<'_> {
        Span { text, bold: true }
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].message.content, GREETING);
        assert!(state.is_fresh());
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
        assert_eq!(state.current_department, DEFAULT_DEPARTMENT);
        assert_eq!(state.current_icon, DEFAULT_ICON);
        assert_eq!(state.language, Language::English);
        assert!(state.calendar.is_none());
    }

    #[test]
    fn test_ui_state_turn_lifecycle() {
        let mut state = UiState::new();
        state.process_events(vec![AdvisorEvent::TurnStart { turn_id: 1 }]);
        assert!(state.is_busy());
        assert_eq!(state.status_text, "Thinking...");

        state.process_events(vec![AdvisorEvent::TurnEnd { turn_id: 1 }]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_department_events() {
        let mut state = UiState::new();
        state.process_events(vec![AdvisorEvent::DepartmentSwitched {
            department: "Mechanical Engineering".to_string(),
            icon: "images/department_icons/mechanical.png".to_string(),
        }]);
        assert_eq!(state.current_department, "Mechanical Engineering");

        state.process_events(vec![AdvisorEvent::DepartmentReverted]);
        assert_eq!(state.current_department, DEFAULT_DEPARTMENT);
        assert_eq!(state.current_icon, DEFAULT_ICON);
    }

    #[test]
    fn test_ui_state_error_sets_status() {
        let mut state = UiState::new();
        state.process_events(vec![AdvisorEvent::Error {
            message: "Request timed out".to_string(),
        }]);
        assert!(state.status_text.contains("Request timed out"));
        // The log already carries the error copy; no entry is added here
        assert_eq!(state.entries.len(), 1);
    }

    #[test]
    fn test_ui_state_refresh_flag() {
        let mut state = UiState::new();
        assert!(state.take_refresh());
        assert!(!state.take_refresh());

        state.process_events(vec![AdvisorEvent::MessagesChanged]);
        assert!(state.take_refresh());
        assert!(!state.take_refresh());
    }

    #[test]
    fn test_ui_state_take_input() {
        let mut state = UiState::new();
        state.input_text = "   ".to_string();
        assert_eq!(state.take_input(), None);

        state.input_text = "  How do I declare?  ".to_string();
        assert_eq!(state.take_input().as_deref(), Some("How do I declare?"));
        assert!(state.input_text.is_empty());

        state.busy = true;
        state.input_text = "again".to_string();
        assert_eq!(state.take_input(), None);
        assert_eq!(state.input_text, "again");
    }

    // ─── ChatEntry Tests ─────────────────────────────────────

    #[test]
    fn test_entry_extracts_schedule_from_bot_reply() {
        let entry = ChatEntry::from_message(Message::bot(
            SCHEDULE_REPLY,
            DEFAULT_DEPARTMENT,
            DEFAULT_ICON,
        ));

        assert_eq!(entry.display_text, "Here is your schedule:");
        let schedule = entry.schedule.as_ref().unwrap();
        assert_eq!(schedule.schedule[0].section, "2");
        assert_eq!(entry.list_rows.len(), 1);
        assert_eq!(entry.list_rows[0].days, "Tuesday, Thursday");
        assert_eq!(entry.grid.as_ref().unwrap().placed(), 2);
    }

    #[test]
    fn test_entry_ignores_schedule_in_user_text() {
        let entry = ChatEntry::from_message(Message::user(SCHEDULE_REPLY));
        assert!(entry.schedule.is_none());
        assert_eq!(entry.display_text, SCHEDULE_REPLY);
    }

    #[test]
    fn test_entry_invalid_json_shown_unchanged() {
        let content = "Try this:\n```json\n{\"is_schedule\": true, \"schedule\": [}\n```";
        let entry = ChatEntry::from_message(Message::bot(content, DEFAULT_DEPARTMENT, DEFAULT_ICON));
        assert!(entry.schedule.is_none());
        assert!(entry.grid.is_none());
        assert_eq!(entry.display_text, content);
    }

    #[test]
    fn test_thinking_entry_not_scanned() {
        let entry = ChatEntry::from_message(Message::thinking(DEFAULT_DEPARTMENT, DEFAULT_ICON));
        assert!(entry.is_thinking());
        assert!(entry.schedule.is_none());
        assert_eq!(entry.role(), Role::Bot);
    }

    #[test]
    fn test_set_messages_and_views() {
        let mut state = UiState::new();
        state.set_messages(vec![
            Message::greeting(),
            Message::user("Build my schedule"),
            Message::bot(SCHEDULE_REPLY, DEFAULT_DEPARTMENT, DEFAULT_ICON),
        ]);
        assert!(!state.is_fresh());
        assert_eq!(state.view_for(2), ScheduleView::List);

        state.set_view(2, ScheduleView::Week);
        assert_eq!(state.view_for(2), ScheduleView::Week);

        // Growing the log keeps view choices
        let mut grown: Vec<Message> = state.entries.iter().map(|e| e.message.clone()).collect();
        grown.push(Message::user("thanks"));
        state.set_messages(grown);
        assert_eq!(state.view_for(2), ScheduleView::Week);

        // A reset shrinks it and forgets them
        state.set_messages(vec![Message::greeting()]);
        assert!(state.is_fresh());
        assert_eq!(state.view_for(2), ScheduleView::List);
    }

    #[test]
    fn test_calendar_window_state() {
        let mut state = UiState::new();
        let entry = ChatEntry::from_message(Message::bot(
            SCHEDULE_REPLY,
            DEFAULT_DEPARTMENT,
            DEFAULT_ICON,
        ));
        let schedule = entry.schedule.unwrap();

        state.open_calendar(schedule.clone());
        assert_eq!(state.calendar, Some(CalendarView::Options(schedule)));

        state.calendar = Some(CalendarView::Loading);
        state.close_calendar();
        assert!(state.calendar.is_none());
    }

    #[test]
    fn test_toast() {
        let mut state = UiState::new();
        state.show_toast("Successfully added 4 events to your Google Calendar.", true);
        let toast = state.toast.as_ref().unwrap();
        assert!(toast.success);
        assert!(toast.message.contains("4 events"));
    }

    // ─── Markdown Tests ──────────────────────────────────────

    #[test]
    fn test_bold_spans() {
        assert_eq!(bold_spans("plain text"), vec![plain("plain text")]);
        assert_eq!(
            bold_spans("Take **EECE 230** and **MATH 201** first"),
            vec![
                plain("Take "),
                bold("EECE 230"),
                plain(" and "),
                bold("MATH 201"),
                plain(" first"),
            ]
        );
    }

    #[test]
    fn test_bold_unpaired_stays_literal() {
        assert_eq!(
            bold_spans("**Note** 2 ** 3"),
            vec![bold("Note"), plain(" 2 ** 3")]
        );
    }

    #[test]
    fn test_bold_does_not_cross_lines() {
        assert_eq!(
            bold_spans("**open\nclose**"),
            vec![plain("**open"), plain("\n"), plain("close**")]
        );
        assert!(bold_spans("").is_empty());
    }

    // ─── Theme Tests ─────────────────────────────────────────

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl(0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl(120, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
        assert_eq!(hsl(240, 1.0, 0.5), Color32::from_rgb(0, 0, 255));
        assert_eq!(hsl(0, 0.0, 1.0), Color32::WHITE);
        assert_eq!(hsl(360, 1.0, 0.5), hsl(0, 1.0, 0.5));
    }

    #[test]
    fn test_course_colors_are_stable_pastels() {
        assert_eq!(course_fill("EECE 230"), course_fill("EECE 230"));
        // Hue 0: light red fill, darker border
        assert_eq!(course_fill(""), Color32::from_rgb(252, 217, 217));
        let border = course_border("");
        assert!(border.g() < 217);
    }

    #[test]
    fn test_storage_descriptions() {
        for backend in StorageBackendType::all() {
            assert!(storage_description(*backend).contains("reload"));
        }
    }
}
