//! Weekly timetable layout.
//!
//! Lays course meetings onto a half-hour × weekday grid the way an HTML
//! table with rowspans would show them: the first slot of a meeting is a
//! start cell spanning `duration` rows, the slots below it are covered and
//! emit nothing.
//!
//! Overlapping meetings are not resolved. Cells are written in a fixed order
//! (course, then meeting, then day token, then slot) and the last write wins.
//! Overwrites are counted in [`WeeklyGrid::conflicts`].

use advisor_types::schedule::{Course, Meeting, ScheduleData};
use crate::time::ClockTime;

pub const DAY_COLUMNS: usize = 6;

/// Columns of the grid. Sunday is recognised but has no column.
pub const DAYS: [&str; DAY_COLUMNS] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const START_HOUR: u32 = 8;
pub const END_HOUR: u32 = 21;
pub const TIME_SLOTS: usize = ((END_HOUR - START_HOUR) * 2) as usize;

/// What a start cell shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseBlock {
    pub course: String,
    pub section: String,
    pub title: String,
    pub location: String,
    pub instructor: String,
    /// Rows spanned, always ≥ 1
    pub duration: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridCell {
    #[default]
    Empty,
    Start(CourseBlock),
    Covered,
}

/// One emitted table row. Covered slots contribute no cell, so `cells`
/// may be shorter than [`DAYS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    pub slot: usize,
    pub label: String,
    pub cells: Vec<RowCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCell {
    Empty { day: usize },
    Course { day: usize, block: CourseBlock },
}

/// Built grid, indexed `[slot][day]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrid {
    cells: Vec<[GridCell; DAY_COLUMNS]>,
    conflicts: usize,
    placed: usize,
}

pub struct WeeklyGridBuilder;

impl WeeklyGridBuilder {
    pub fn build(schedule: &ScheduleData) -> WeeklyGrid {
        let mut grid = WeeklyGrid {
            cells: vec![Default::default(); TIME_SLOTS],
            conflicts: 0,
            placed: 0,
        };

        for course in &schedule.schedule {
            for meeting in &course.meetings {
                Self::place_meeting(&mut grid, course, meeting);
            }
        }

        grid
    }

    fn place_meeting(grid: &mut WeeklyGrid, course: &Course, meeting: &Meeting) {
        if meeting.days.is_empty() {
            return;
        }
        let Some((start, end)) = meeting_slots(meeting) else {
            log::debug!(
                "Dropping {} meeting with times {:?}–{:?}",
                course.course_code,
                meeting.start_time,
                meeting.end_time
            );
            return;
        };

        let block = CourseBlock {
            course: course.course_code.clone(),
            section: course.section.clone(),
            title: course.display_title().to_string(),
            location: meeting.location.clone().unwrap_or_else(|| "TBA".to_string()),
            instructor: course.instructor.clone().unwrap_or_else(|| "TBA".to_string()),
            duration: end - start,
        };

        for token in &meeting.days {
            let Some(day) = resolve_day(token).filter(|d| *d < DAY_COLUMNS) else {
                log::debug!("Skipping day {:?} for {}", token, course.course_code);
                continue;
            };

            let overwrote = (start..end).any(|slot| grid.cells[slot][day] != GridCell::Empty);
            if overwrote {
                grid.conflicts += 1;
                log::debug!(
                    "{} on {} overwrites an earlier meeting",
                    course.course_code,
                    DAYS[day]
                );
            }

            grid.cells[start][day] = GridCell::Start(block.clone());
            for slot in start + 1..end {
                grid.cells[slot][day] = GridCell::Covered;
            }
            grid.placed += 1;
        }
    }
}

/// Clamped `[start, end)` slot range, or None when the meeting has no
/// usable times or falls outside the visible window.
fn meeting_slots(meeting: &Meeting) -> Option<(usize, usize)> {
    let start = ClockTime::parse(meeting.start_time.as_deref()?).ok()?;
    let end = ClockTime::parse(meeting.end_time.as_deref()?).ok()?;

    let start_slot = start.start_slot(START_HOUR).max(0);
    let end_slot = end.end_slot(START_HOUR).min(TIME_SLOTS as i32);
    if start_slot >= TIME_SLOTS as i32 || end_slot <= 0 || start_slot >= end_slot {
        return None;
    }
    Some((start_slot as usize, end_slot as usize))
}

/// Index into Monday..Sunday for a day token.
///
/// Exact name first, then a case-insensitive substring match in either
/// direction (`"Mon"`, `"monday"`, `"Mondays"`), first weekday wins.
pub fn resolve_day(token: &str) -> Option<usize> {
    if token.trim().is_empty() {
        return None;
    }
    if let Some(i) = WEEKDAYS.iter().position(|d| *d == token) {
        return Some(i);
    }
    let token = token.to_lowercase();
    WEEKDAYS.iter().position(|d| {
        let day = d.to_lowercase();
        day.contains(&token) || token.contains(&day)
    })
}

/// Hue (0–359) for a course code: sum of UTF-16 code units mod 360.
pub fn course_hue(course_code: &str) -> u32 {
    course_code.encode_utf16().map(u32::from).sum::<u32>() % 360
}

/// Row label for a slot, e.g. `8:00 am`, `12:30 pm`
pub fn slot_label(slot: usize) -> String {
    let hour = slot as u32 / 2 + START_HOUR;
    let time = ClockTime {
        hour,
        minute: if slot % 2 == 0 { 0 } else { 30 },
    };
    time.to_string()
}

impl WeeklyGrid {
    pub fn cell(&self, slot: usize, day: usize) -> Option<&GridCell> {
        self.cells.get(slot).and_then(|row| row.get(day))
    }

    /// How many meeting-day placements overwrote an earlier one
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// How many meeting-day placements landed on the grid
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    /// Rows top to bottom, covered slots omitted
    pub fn rows(&self) -> Vec<TimetableRow> {
        self.cells
            .iter()
            .enumerate()
            .map(|(slot, days)| TimetableRow {
                slot,
                label: slot_label(slot),
                cells: days
                    .iter()
                    .enumerate()
                    .filter_map(|(day, cell)| match cell {
                        GridCell::Empty => Some(RowCell::Empty { day }),
                        GridCell::Start(block) => Some(RowCell::Course {
                            day,
                            block: block.clone(),
                        }),
                        GridCell::Covered => None,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Start cells with their slot and day, for painters that position
    /// blocks directly instead of walking rows
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize, &CourseBlock)> {
        self.cells.iter().enumerate().flat_map(|(slot, days)| {
            days.iter().enumerate().filter_map(move |(day, cell)| match cell {
                GridCell::Start(block) => Some((slot, day, block)),
                _ => None,
            })
        })
    }
}

/// One row of the list view: a single meeting. The course code, section
/// and instructor cells span all of a course's meetings and are only
/// present on its first row (`span` is Some there).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub span: Option<usize>,
    pub course: String,
    pub section: String,
    pub instructor: String,
    pub days: String,
    pub time: String,
    pub location: String,
}

/// List-view rows in course order. Courses without meetings get no row.
pub fn list_rows(schedule: &ScheduleData) -> Vec<ScheduleRow> {
    schedule
        .schedule
        .iter()
        .flat_map(|course| {
            let span = course.meetings.len();
            course.meetings.iter().enumerate().map(move |(i, meeting)| ScheduleRow {
                span: (i == 0).then_some(span),
                course: course.course_code.clone(),
                section: course.section.clone(),
                instructor: course.instructor.clone().unwrap_or_else(|| "TBA".to_string()),
                days: meeting.days.join(", "),
                time: meeting.time_range(),
                location: meeting.location.clone().unwrap_or_else(|| "TBA".to_string()),
            })
        })
        .collect()
}
