pub mod message;
pub mod department;
pub mod schedule;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::AdvisorError;
pub type Result<T> = std::result::Result<T, AdvisorError>;
