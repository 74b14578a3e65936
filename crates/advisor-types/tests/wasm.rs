//! WASM-target tests for advisor-types.
//!
//! Mirrors a subset of the native unit tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use advisor_types::message::*;
use advisor_types::department::*;
use advisor_types::schedule::*;
use advisor_types::config::*;
use advisor_types::error::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_roundtrip_keeps_flags() {
    let msgs = vec![
        Message::greeting(),
        Message::user("What are mech requirements?"),
        Message::system("Switched to Mechanical Engineering Department Advisor"),
        Message::bot("Here they are", "Mechanical Engineering", icon_for("Mechanical Engineering")),
    ];
    let json = serde_json::to_string(&msgs).unwrap();
    let restored: Vec<Message> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, msgs);
}

#[wasm_bindgen_test]
fn message_thinking_is_bot() {
    let msg = Message::thinking(DEFAULT_DEPARTMENT, DEFAULT_ICON);
    assert_eq!(msg.role, Role::Bot);
    assert!(msg.is_thinking);
}

// ─── Department Tests ────────────────────────────────────

#[wasm_bindgen_test]
fn department_icon_fallback() {
    assert_eq!(icon_for("Unknown"), DEFAULT_ICON);
    assert_eq!(icon_for("Industrial Engineering"), "images/department_icons/industrial.png");
}

// ─── Schedule Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn schedule_accepts_numeric_section() {
    let json = r#"{"is_schedule":true,"schedule":[{"course_code":"EECE 230","section":3,"meetings":[]}]}"#;
    let data: ScheduleData = serde_json::from_str(json).unwrap();
    assert_eq!(data.schedule[0].section, "3");
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn config_roundtrip() {
    let mut config = AdvisorConfig::default();
    config.language = Language::Arabic;
    let json = serde_json::to_string(&config).unwrap();
    let restored: AdvisorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

// ─── Error Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn error_classification() {
    assert!(AdvisorError::Network("TypeError: Failed to fetch".to_string()).is_connection_failure());
    assert!(!AdvisorError::Server { status: 404, message: "Not Found".to_string() }.is_connection_failure());
}
