//! Reminder time formatting and parsing in one display offset.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

const DISPLAY_FORMAT: &str = "%d %b %Y, %I:%M %p";
const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Placeholder shown in the remind-at input.
pub const INPUT_HINT: &str = "YYYY-MM-DD HH:MM";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeInputError {
    #[error("Reminder time is required")]
    Empty,
    #[error("Use the format {INPUT_HINT}")]
    Format,
    #[error("That time does not exist in the display timezone")]
    Nonexistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Local,
    Fixed(FixedOffset),
}

/// Converts reminder times between UTC and the user's display offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderClock {
    zone: Zone,
}

impl Default for ReminderClock {
    fn default() -> Self {
        Self::local()
    }
}

impl ReminderClock {
    /// Uses the system timezone.
    #[must_use]
    pub const fn local() -> Self {
        Self { zone: Zone::Local }
    }

    /// Uses a fixed offset east of UTC; `None` if out of range.
    #[must_use]
    pub fn fixed(offset_minutes: i32) -> Option<Self> {
        offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self {
                zone: Zone::Fixed(offset),
            })
    }

    /// Builds the clock from the configured offset, falling back to local time.
    #[must_use]
    pub fn from_config(offset_minutes: Option<i32>) -> Self {
        offset_minutes
            .and_then(Self::fixed)
            .unwrap_or_else(Self::local)
    }

    /// Formats a reminder time, e.g. `05 Jun 2025, 02:30 PM`.
    #[must_use]
    pub fn format(&self, at: DateTime<Utc>) -> String {
        match self.zone {
            Zone::Local => at.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
            Zone::Fixed(offset) => at.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
        }
    }

    /// Parses user input in the display offset and converts it to UTC.
    ///
    /// # Errors
    /// Returns error if the input is blank, malformed, or falls in a DST gap.
    pub fn parse_input(&self, input: &str) -> Result<DateTime<Utc>, TimeInputError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TimeInputError::Empty);
        }

        let naive = INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
            .ok_or(TimeInputError::Format)?;

        let utc = match self.zone {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|at| at.with_timezone(&Utc)),
        };
        utc.ok_or(TimeInputError::Nonexistent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test_case(0, "05 Jun 2025, 02:30 PM" ; "utc")]
    #[test_case(120, "05 Jun 2025, 04:30 PM" ; "east")]
    #[test_case(-300, "05 Jun 2025, 09:30 AM" ; "west")]
    fn test_format(offset: i32, expected: &str) {
        let clock = ReminderClock::fixed(offset).unwrap();
        assert_eq!(clock.format(at(2025, 6, 5, 14, 30)), expected);
    }

    #[test_case("2025-06-05 16:30" ; "space")]
    #[test_case("2025-06-05T16:30" ; "t separator")]
    #[test_case("  2025-06-05 16:30  " ; "padded")]
    fn test_parse_converts_to_utc(input: &str) {
        let clock = ReminderClock::fixed(120).unwrap();
        assert_eq!(clock.parse_input(input).unwrap(), at(2025, 6, 5, 14, 30));
    }

    #[test]
    fn test_parse_errors() {
        let clock = ReminderClock::fixed(0).unwrap();
        assert_eq!(clock.parse_input("  "), Err(TimeInputError::Empty));
        assert_eq!(clock.parse_input("tomorrow"), Err(TimeInputError::Format));
        assert_eq!(
            clock.parse_input("2025-13-01 10:00"),
            Err(TimeInputError::Format)
        );
    }

    #[test]
    fn test_parse_and_format_share_offset() {
        let clock = ReminderClock::fixed(-90).unwrap();
        let parsed = clock.parse_input("2025-01-31 21:45").unwrap();
        assert_eq!(parsed, at(2025, 1, 31, 23, 15));
        assert_eq!(clock.format(parsed), "31 Jan 2025, 09:45 PM");
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_local() {
        assert!(ReminderClock::fixed(24 * 60).is_none());
        assert_eq!(ReminderClock::from_config(Some(24 * 60)), ReminderClock::local());
        assert_eq!(ReminderClock::from_config(None), ReminderClock::local());
    }
}
