pub mod chat;
pub mod sidebar;
pub mod schedule;
pub mod calendar;
pub mod settings;
