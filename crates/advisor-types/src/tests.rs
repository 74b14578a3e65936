#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::department::*;
    use crate::schedule::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.department.is_none());
        assert!(!msg.is_thinking);
        assert!(!msg.is_system);
    }

    #[test]
    fn test_message_bot_carries_department() {
        let msg = Message::bot("Hi", "Civil Engineering", "images/department_icons/civil.png");
        assert_eq!(msg.role, Role::Bot);
        assert_eq!(msg.department.as_deref(), Some("Civil Engineering"));
        assert_eq!(
            msg.department_icon.as_deref(),
            Some("images/department_icons/civil.png")
        );
        assert!(msg.is_bot());
    }

    #[test]
    fn test_message_thinking() {
        let msg = Message::thinking(DEFAULT_DEPARTMENT, DEFAULT_ICON);
        assert_eq!(msg.role, Role::Bot);
        assert!(msg.is_thinking);
        assert_eq!(msg.content, THINKING_TEXT);
    }

    #[test]
    fn test_message_system() {
        let msg = Message::system("Switched to Civil Engineering Department Advisor");
        assert_eq!(msg.role, Role::System);
        assert!(msg.is_system);
        assert!(!msg.is_bot());
    }

    #[test]
    fn test_message_notification_restored_from_log() {
        let json = r#"{"role":"system","content":"heads up","isNotification":true}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.is_notification);
        assert!(!msg.is_system);
        assert!(!msg.is_bot());
    }

    #[test]
    fn test_message_greeting() {
        let msg = Message::greeting();
        assert_eq!(msg.content, GREETING);
        assert_eq!(msg.department.as_deref(), Some(DEFAULT_DEPARTMENT));
        assert_eq!(msg.department_icon.as_deref(), Some(DEFAULT_ICON));
    }

    #[test]
    fn test_message_wire_format_is_camel_case() {
        let msg = Message::thinking("Civil Engineering", "x.png");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"bot""#));
        assert!(json.contains(r#""departmentIcon":"x.png""#));
        assert!(json.contains(r#""isThinking":true"#));
        // false flags are omitted
        assert!(!json.contains("isSystem"));
    }

    #[test]
    fn test_message_restores_from_legacy_json() {
        let json = r#"{"role":"system","isSystem":true,"content":"Returned to MSFEA General Advisor"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, Role::System);
        assert!(msg.is_system);
        assert!(!msg.is_thinking);
        assert!(msg.department.is_none());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), r#""bot""#);
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
    }

    // ─── Department Tests ────────────────────────────────────

    #[test]
    fn test_catalog_has_six_entries_with_default_first() {
        assert_eq!(DEPARTMENTS.len(), 6);
        assert_eq!(DEPARTMENTS[0].name, DEFAULT_DEPARTMENT);
        assert_eq!(DEPARTMENTS[0].icon, DEFAULT_ICON);
    }

    #[test]
    fn test_department_find() {
        let mech = find("Mechanical Engineering").unwrap();
        assert_eq!(mech.id, "mech");
        assert!(find("Astrophysics").is_none());
    }

    #[test]
    fn test_icon_for_falls_back_to_default() {
        assert_eq!(icon_for("Civil Engineering"), "images/department_icons/civil.png");
        assert_eq!(icon_for("Electrical & Computer Engineering"), DEFAULT_ICON);
    }

    #[test]
    fn test_display_name_aliases() {
        assert_eq!(display_name("Computer Science Engineering"), "CSE");
        assert_eq!(display_name("Computer & Communications Engineering"), "CCE");
        assert_eq!(display_name("Civil Engineering"), "Civil Engineering");
    }

    #[test]
    fn test_keyword_table_order_is_fixed() {
        let keys: Vec<&str> = DEPARTMENT_KEYWORDS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys[0], "mechanical");
        assert_eq!(keys[1], "mech");
        let computer = keys.iter().position(|k| *k == "computer").unwrap();
        let cse = keys.iter().position(|k| *k == "cse").unwrap();
        assert!(computer < cse);
    }

    // ─── Schedule Tests ──────────────────────────────────────

    #[test]
    fn test_schedule_deserialization() {
        let json = r#"{
            "is_schedule": true,
            "schedule": [{
                "course_code": "MECH 310",
                "section": 2,
                "meetings": [{"days": ["Monday", "Wednesday"], "start_time": "9:30 am", "end_time": "10:45 am"}]
            }]
        }"#;
        let data: ScheduleData = serde_json::from_str(json).unwrap();
        assert!(data.is_schedule);
        assert_eq!(data.schedule[0].section, "2");
        assert!(data.schedule[0].instructor.is_none());
        assert_eq!(data.schedule[0].meetings[0].days.len(), 2);
        assert!(data.schedule[0].meetings[0].location.is_none());
    }

    #[test]
    fn test_course_display_title() {
        let mut course = Course {
            course_code: "CIVE 210".to_string(),
            section: "1".to_string(),
            title: None,
            instructor: None,
            meetings: vec![],
        };
        assert_eq!(course.display_title(), "CIVE 210");
        course.title = Some("Statics".to_string());
        assert_eq!(course.display_title(), "Statics");
    }

    #[test]
    fn test_meeting_time_range() {
        let meeting = Meeting {
            days: vec!["Tuesday".to_string()],
            start_time: Some("2:00 pm".to_string()),
            end_time: Some("3:15 pm".to_string()),
            location: None,
        };
        assert_eq!(meeting.time_range(), "2:00 pm - 3:15 pm");
    }

    #[test]
    fn test_calendar_link_deserialization() {
        let json = r#"{"course":"MECH 310","day":"Monday","time":"9:30 am - 10:45 am","url":"https://calendar.google.com/x"}"#;
        let link: CalendarLink = serde_json::from_str(json).unwrap();
        assert_eq!(link.course, "MECH 310");
        assert_eq!(link.day, "Monday");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_event_serialization() {
        let event = AdvisorEvent::DepartmentSwitched {
            department: "Civil Engineering".to_string(),
            icon: "civil.png".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("DepartmentSwitched"));
        assert!(json.contains("Civil Engineering"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.api.query_url, "http://localhost:8000/api/advisor/query");
        assert_eq!(config.api.request_timeout_ms, 60_000);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.timing.revert_delay_ms, 2000);
        assert_eq!(config.timing.thinking_delay_ms, 500);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
    }

    #[test]
    fn test_config_partial_json_fills_defaults() {
        let config: AdvisorConfig = serde_json::from_str(r#"{"language":"Arabic"}"#).unwrap();
        assert_eq!(config.language, Language::Arabic);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_revert_delay_is_clamped() {
        let mut timing = TimingConfig::default();
        timing.revert_delay_ms = 50;
        assert_eq!(timing.revert_delay_ms(), MIN_REVERT_DELAY_MS);
        timing.revert_delay_ms = 10_000;
        assert_eq!(timing.revert_delay_ms(), MAX_REVERT_DELAY_MS);
        timing.revert_delay_ms = 800;
        assert_eq!(timing.revert_delay_ms(), 800);
    }

    #[test]
    fn test_api_urls() {
        let api = ApiConfig::default();
        assert_eq!(
            api.reset_url("abc"),
            "http://localhost:8000/api/advisor/query/reset/abc"
        );
        assert_eq!(api.calendar_url("auth-url"), "/api/gcalendar/auth-url");
    }

    #[test]
    fn test_language() {
        assert_eq!(Language::English.api_value(), "english");
        assert_eq!(Language::Arabic.api_value(), "arabic");
        assert_eq!(Language::English.label(), "En");
        assert_eq!(Language::English.toggled(), Language::Arabic);
        assert!(Language::Arabic.is_rtl());
        assert!(!Language::English.is_rtl());
    }

    #[test]
    fn test_storage_backend_labels() {
        assert_eq!(StorageBackendType::all().len(), 3);
        assert_eq!(StorageBackendType::LocalStorage.label(), "localStorage");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = AdvisorError::Server { status: 500, message: "Internal Server Error".to_string() };
        assert_eq!(
            err.to_string(),
            "The server returned an error (HTTP 500): Internal Server Error"
        );
        assert_eq!(AdvisorError::Timeout(100).to_string(),
            "Could not connect to the advisor service: no reply after 100ms");
    }

    #[test]
    fn test_error_connection_classification() {
        assert!(AdvisorError::Network("Failed to fetch".to_string()).is_connection_failure());
        assert!(AdvisorError::Timeout(60_000).is_connection_failure());
        assert!(!AdvisorError::Server { status: 502, message: "Bad Gateway".to_string() }
            .is_connection_failure());
        assert!(!AdvisorError::Serialization("eof".to_string()).is_connection_failure());
    }

    #[test]
    fn test_server_body_mentioning_connection_is_not_connection_failure() {
        let err = AdvisorError::Server {
            status: 500,
            message: "could not connect to vector store".to_string(),
        };
        assert!(err.to_string().contains("connect"));
        assert!(!err.is_connection_failure());
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: AdvisorError = serde_err.into();
        assert!(matches!(err, AdvisorError::Serialization(_)));
    }
}
