//! Browser adapters for the advisor-core ports.
//!
//! - [`http`]: advisory query/reset over `fetch` (gloo-net)
//! - [`calendar`]: Google Calendar helper routes
//! - [`storage`]: localStorage and in-memory key/value backends
//! - [`timer`]: wall clock, sleeps and cancellable scheduled tasks
//! - [`location`]: OAuth callback query handling and redirects

pub mod http;
pub mod calendar;
pub mod storage;
pub mod timer;
pub mod location;

pub use http::HttpAdvisoryApi;
pub use calendar::HttpCalendarApi;
pub use timer::BrowserTimer;
