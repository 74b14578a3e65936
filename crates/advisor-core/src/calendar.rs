//! Exporting a schedule to Google Calendar.
//!
//! Two routes: pre-filled event links (no sign-in), or an OAuth round trip
//! that creates the events server-side. The OAuth route leaves the page, so
//! the schedule is stashed in storage under [`PENDING_SCHEDULE_KEY`] and
//! picked up again when the browser comes back with `?code=...`.

use std::rc::Rc;
use advisor_types::{
    AdvisorError, Result,
    schedule::{CalendarLink, ScheduleData},
};
use crate::ports::{CalendarPort, StoragePort};

pub const PENDING_SCHEDULE_KEY: &str = "pendingGoogleSchedule";
pub const NO_LINKS_TEXT: &str = "No calendar links available";

/// Links for one course, in the order the backend returned them
#[derive(Debug, Clone, PartialEq)]
pub struct CourseLinks {
    pub course: String,
    pub links: Vec<CalendarLink>,
}

/// Group links by course, courses in first-seen order
pub fn group_links(links: Vec<CalendarLink>) -> Vec<CourseLinks> {
    let mut groups: Vec<CourseLinks> = Vec::new();
    for link in links {
        match groups.iter_mut().find(|g| g.course == link.course) {
            Some(group) => group.links.push(link),
            None => groups.push(CourseLinks {
                course: link.course.clone(),
                links: vec![link],
            }),
        }
    }
    groups
}

pub struct CalendarFlow {
    calendar: Rc<dyn CalendarPort>,
    storage: Rc<dyn StoragePort>,
}

impl CalendarFlow {
    pub fn new(calendar: Rc<dyn CalendarPort>, storage: Rc<dyn StoragePort>) -> Self {
        Self { calendar, storage }
    }

    fn ensure_courses(schedule: &ScheduleData) -> Result<()> {
        if schedule.schedule.is_empty() {
            return Err(AdvisorError::Calendar("schedule has no courses".to_string()));
        }
        Ok(())
    }

    /// Per-meeting links grouped by course
    pub async fn links_by_course(&self, schedule: &ScheduleData) -> Result<Vec<CourseLinks>> {
        Self::ensure_courses(schedule)?;
        let links = self.calendar.generate_links(schedule).await?;
        if links.is_empty() {
            return Err(AdvisorError::Calendar(NO_LINKS_TEXT.to_string()));
        }
        Ok(group_links(links))
    }

    /// One link for the whole schedule
    pub async fn single_link(&self, schedule: &ScheduleData) -> Result<String> {
        Self::ensure_courses(schedule)?;
        let link = self.calendar.generate_all_link(schedule).await?;
        if link.is_empty() {
            return Err(AdvisorError::Calendar(NO_LINKS_TEXT.to_string()));
        }
        Ok(link)
    }

    /// Stash the schedule and fetch the consent URL to redirect to
    pub async fn start_auth(&self, schedule: &ScheduleData) -> Result<String> {
        Self::ensure_courses(schedule)?;
        let json = serde_json::to_string(schedule)?;
        self.storage.set(PENDING_SCHEDULE_KEY, &json).await?;

        match self.calendar.auth_url().await {
            Ok(url) => {
                log::info!("Redirecting to Google consent screen");
                Ok(url)
            }
            Err(e) => {
                log::error!("Error starting Google authentication: {}", e);
                Err(e)
            }
        }
    }

    pub async fn has_pending(&self) -> bool {
        self.storage
            .exists(PENDING_SCHEDULE_KEY)
            .await
            .unwrap_or(false)
    }

    /// Finish the OAuth round trip: add the stashed schedule's events.
    /// The stash is cleared whatever the outcome, so a refresh cannot
    /// replay the same code.
    pub async fn complete_auth(&self, code: &str) -> Result<u32> {
        let result = self.add_pending(code).await;
        if let Err(e) = self.storage.delete(PENDING_SCHEDULE_KEY).await {
            log::warn!("Could not clear pending schedule: {}", e);
        }
        match &result {
            Ok(count) => log::info!("Added {} events to Google Calendar", count),
            Err(e) => log::error!("Error adding events to Google Calendar: {}", e),
        }
        result
    }

    async fn add_pending(&self, code: &str) -> Result<u32> {
        if code.is_empty() {
            return Err(AdvisorError::Calendar("missing authorization code".to_string()));
        }
        let json = self
            .storage
            .get(PENDING_SCHEDULE_KEY)
            .await?
            .ok_or_else(|| AdvisorError::Calendar("no pending schedule".to_string()))?;
        let schedule: ScheduleData = serde_json::from_str(&json)?;
        self.calendar.add_events(code, &schedule.schedule).await
    }
}
