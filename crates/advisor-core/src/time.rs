//! Meeting-time parsing: `H:MM am|pm` → 24-hour clock → half-hour slots.

use std::sync::OnceLock;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unparseable meeting time: {0:?}")]
pub struct TimeParseError(pub String);

/// A wall-clock time of day, 24-hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+):(\d+)\s*(am|pm)").expect("static time regex")
    })
}

impl ClockTime {
    /// Parse the first `H:MM am|pm` occurrence in `input`.
    ///
    /// The hour must be 1–12 and the minute 0–59; anything else is
    /// unparseable.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let unparseable = || TimeParseError(input.to_string());

        let caps = time_pattern().captures(input).ok_or_else(unparseable)?;
        let hour: u32 = caps[1].parse().map_err(|_| unparseable())?;
        let minute: u32 = caps[2].parse().map_err(|_| unparseable())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(unparseable());
        }

        let pm = caps[3].eq_ignore_ascii_case("pm");
        let hour = match (pm, hour) {
            (true, h) if h < 12 => h + 12,
            (false, 12) => 0,
            (_, h) => h,
        };
        Ok(Self { hour, minute })
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Slot this time starts in, for a grid whose first row is `grid_start_hour`.
    /// A start at :30 or later falls in the second half-hour. May be negative.
    pub fn start_slot(&self, grid_start_hour: u32) -> i32 {
        let base = (self.hour as i32 - grid_start_hour as i32) * 2;
        base + i32::from(self.minute >= 30)
    }

    /// Exclusive end slot: any minutes past the hour occupy the next half-hour.
    pub fn end_slot(&self, grid_start_hour: u32) -> i32 {
        let base = (self.hour as i32 - grid_start_hour as i32) * 2;
        base + i32::from(self.minute > 0)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        let period = if self.hour < 12 { "am" } else { "pm" };
        write!(f, "{}:{:02} {}", display_hour, self.minute, period)
    }
}
