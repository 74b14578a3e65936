//! Platform-free core of the advisor chat widget.
//!
//! Everything here runs on plain Rust; browser access goes through the
//! traits in [`ports`], implemented by `advisor-platform`.

pub mod ports;
pub mod event_bus;
pub mod time;
pub mod timetable;
pub mod schedule;
pub mod router;
pub mod conversation;
pub mod session;
pub mod client;
pub mod calendar;
