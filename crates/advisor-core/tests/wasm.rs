//! WASM-target tests for advisor-core.
//!
//! Runs the time parser, timetable layout, schedule extraction, router and
//! session tests under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use advisor_core::conversation::ConversationStore;
use advisor_core::event_bus::EventBus;
use advisor_core::ports::AdvisoryResponse;
use advisor_core::router::*;
use advisor_core::schedule::*;
use advisor_core::session::*;
use advisor_core::time::ClockTime;
use advisor_core::timetable::*;
use advisor_types::config::Language;
use advisor_types::department::DEFAULT_DEPARTMENT;
use advisor_types::event::AdvisorEvent;
use advisor_types::message::Message;

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(AdvisorEvent::TurnStart { turn_id: 1 });
    bus.emit(AdvisorEvent::MessagesChanged);
    assert_eq!(bus.drain().len(), 2);
    assert!(!bus.has_pending());
}

// ─── Time & Timetable Tests ──────────────────────────────

#[wasm_bindgen_test]
fn clock_time_conversions() {
    assert_eq!(ClockTime::parse("12:00 am").unwrap().hour, 0);
    assert_eq!(ClockTime::parse("12:00 pm").unwrap().hour, 12);
    assert_eq!(ClockTime::parse("1:30 pm").unwrap(), ClockTime { hour: 13, minute: 30 });
}

#[wasm_bindgen_test]
fn timetable_from_reply() {
    let reply = "Schedule:\n```json\n{\"is_schedule\": true, \"schedule\": [{\"course_code\": \"CIVE 210\", \"section\": \"1\", \"meetings\": [{\"days\": [\"Tuesday\", \"Thursday\"], \"start_time\": \"2:00 pm\", \"end_time\": \"3:15 pm\", \"location\": \"Bechtel 101\"}]}]}\n```";
    let extraction = extract_schedule(reply);
    let data = extraction.schedule().expect("schedule");
    let grid = WeeklyGridBuilder::build(data);

    match grid.cell(12, 1) {
        Some(GridCell::Start(block)) => {
            assert_eq!(block.duration, 3);
            assert_eq!(block.location, "Bechtel 101");
        }
        other => panic!("expected start cell, got {:?}", other),
    }
    assert!(matches!(grid.cell(12, 3), Some(GridCell::Start(_))));
    assert_eq!(grid.placed(), 2);
    assert_eq!(extraction.display_text(reply).trim(), "Schedule:");
}

// ─── Router & Session Tests ──────────────────────────────

#[wasm_bindgen_test]
fn router_keyword_resolution() {
    assert_eq!(
        DepartmentRouter::resolve(None, "What are mech requirements?"),
        "Mechanical Engineering"
    );
    assert_eq!(DepartmentRouter::resolve(None, "hello"), DEFAULT_DEPARTMENT);
}

#[wasm_bindgen_test]
fn session_switch_then_revert() {
    let mut session = AdvisorSession::new(ConversationStore::new());
    let turn = session.begin_turn("mech electives", Language::English).unwrap();
    let response = AdvisoryResponse {
        content: Some("MECH 501 and MECH 502".to_string()),
        department: None,
        session_id: None,
    };
    let outcome = session.complete_turn(turn.turn_id, "mech electives", Ok(response), 0.0);
    assert!(matches!(
        outcome,
        TurnOutcome::Answered { switch: SwitchOutcome::Switched { .. }, .. }
    ));

    assert!(matches!(session.apply_revert(2000.0), RevertOutcome::Announced { .. }));
    let last: &Message = session.messages().last().unwrap();
    assert_eq!(last.content, RETURNED_NOTICE);
    assert_eq!(session.router().current_department(), DEFAULT_DEPARTMENT);
}
