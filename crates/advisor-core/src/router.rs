//! Department routing.
//!
//! Two conceptual states, the faculty-wide default advisor and a specific
//! department. Replies switch the state (announced with a banner); a timed
//! revert brings it back. Reverts are debounced: a revert less than
//! [`REVERT_DEBOUNCE_MS`] after the last announced one still returns to the
//! default but adds no banner.
//!
//! Timers are not owned here. The router tells the caller when a revert
//! should be scheduled and is told when it fires.

use advisor_types::department::{self, DEFAULT_DEPARTMENT, DEFAULT_ICON, DEPARTMENT_KEYWORDS};
use advisor_types::message::Message;

pub const REVERT_DEBOUNCE_MS: f64 = 5000.0;
pub const RETURNED_NOTICE: &str = "Returned to MSFEA General Advisor";

pub fn switched_notice(department: &str) -> String {
    format!("Switched to {} Department Advisor", department)
}

/// True for the banner appended by an announced revert
pub fn is_returned_notice(msg: &Message) -> bool {
    msg.is_system && msg.content.contains("Returned to MSFEA")
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DepartmentState {
    #[default]
    Default,
    Switched(String),
}

impl DepartmentState {
    /// State after a reply attributed to `resolved`
    pub fn after_reply(&self, resolved: &str) -> DepartmentState {
        if resolved.is_empty() || department::is_default(resolved) {
            DepartmentState::Default
        } else {
            DepartmentState::Switched(resolved.to_string())
        }
    }

    /// State after a revert, announced or not
    pub fn after_revert(&self) -> DepartmentState {
        DepartmentState::Default
    }

    pub fn name(&self) -> &str {
        match self {
            DepartmentState::Default => DEFAULT_DEPARTMENT,
            DepartmentState::Switched(name) => name,
        }
    }

    pub fn is_switched(&self) -> bool {
        matches!(self, DepartmentState::Switched(_))
    }
}

/// Outcome of adopting a resolved department
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Reply belongs to the default advisor and nothing was switched before
    StayedDefault,
    /// Reply belongs to the default advisor while a department was active;
    /// the router reverted on the spot
    Reverted(RevertOutcome),
    /// A department became active. The caller shows `notice` and
    /// schedules a revert.
    Switched {
        department: String,
        icon: String,
        notice: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertOutcome {
    /// Nothing was switched
    AlreadyDefault,
    /// Back to default, with a fresh "returned" banner
    Announced { notice: String },
    /// Back to default within the debounce window; no banner
    Debounced,
}

#[derive(Debug, Clone)]
pub struct DepartmentRouter {
    state: DepartmentState,
    icon: String,
    last_return_ms: Option<f64>,
}

impl DepartmentRouter {
    pub fn new() -> Self {
        Self {
            state: DepartmentState::Default,
            icon: DEFAULT_ICON.to_string(),
            last_return_ms: None,
        }
    }

    pub fn state(&self) -> &DepartmentState {
        &self.state
    }

    pub fn current_department(&self) -> &str {
        self.state.name()
    }

    pub fn current_icon(&self) -> &str {
        &self.icon
    }

    /// Department a reply belongs to.
    ///
    /// An explicit non-default department from the API wins. Otherwise the
    /// lower-cased query is scanned against the keyword table in order.
    pub fn resolve(api_department: Option<&str>, query: &str) -> String {
        if let Some(dept) = api_department
            .map(str::trim)
            .filter(|d| !d.is_empty() && !department::is_default(d))
        {
            log::debug!("Using department from API: {}", dept);
            return dept.to_string();
        }

        let query = query.to_lowercase();
        DEPARTMENT_KEYWORDS
            .iter()
            .find(|(keyword, _)| query.contains(keyword))
            .map(|(keyword, dept)| {
                log::debug!("Detected department {} from keyword {:?}", dept, keyword);
                dept.to_string()
            })
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string())
    }

    /// Adopt the department a reply was resolved to.
    pub fn adopt(&mut self, resolved: &str, now_ms: f64) -> SwitchOutcome {
        match self.state.after_reply(resolved) {
            DepartmentState::Default if self.state.is_switched() => {
                SwitchOutcome::Reverted(self.revert(now_ms))
            }
            DepartmentState::Default => SwitchOutcome::StayedDefault,
            next @ DepartmentState::Switched(_) => {
                let name = next.name().to_string();
                self.icon = department::icon_for(&name).to_string();
                self.state = next;
                log::info!("Switched to department: {}", name);
                SwitchOutcome::Switched {
                    notice: switched_notice(&name),
                    icon: self.icon.clone(),
                    department: name,
                }
            }
        }
    }

    /// Timed return to the default advisor.
    pub fn revert(&mut self, now_ms: f64) -> RevertOutcome {
        if !self.state.is_switched() {
            return RevertOutcome::AlreadyDefault;
        }

        self.state = self.state.after_revert();
        self.icon = DEFAULT_ICON.to_string();

        if let Some(last) = self.last_return_ms {
            if now_ms - last < REVERT_DEBOUNCE_MS {
                log::debug!("Skipping duplicate return notice ({}ms since last)", now_ms - last);
                return RevertOutcome::Debounced;
            }
        }
        self.last_return_ms = Some(now_ms);
        log::info!("Returned to {}", DEFAULT_DEPARTMENT);
        RevertOutcome::Announced {
            notice: RETURNED_NOTICE.to_string(),
        }
    }

    /// Back to a fresh router, forgetting the debounce clock
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DepartmentRouter {
    fn default() -> Self {
        Self::new()
    }
}
