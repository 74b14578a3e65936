//! egui rendering for the advisor chat.
//!
//! Panels read a [`state::UiState`] projection that the app refreshes from
//! the chat client; user intent flows back out as returned actions.

pub mod state;
pub mod theme;
pub mod markdown;
pub mod panels;

#[cfg(test)]
mod tests;
