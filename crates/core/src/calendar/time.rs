//! Time-of-day and calendar-date helpers shared by the expanders.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

/// Shown instead of an end time that marks the end of the day.
pub const END_OF_DAY_LABEL: &str = "End of day";

/// Shown for a middle day of a multi-day event.
pub const ALL_DAY_LABEL: &str = "All day";

/// Marks the open side of a time range that continues on another day.
pub const CONTINUATION_MARK: &str = "…";

/// Converts a time of day to fractional hours, e.g. 14:30 -> 14.5.
///
/// Seconds are ignored.
pub fn hour_value(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}

/// Drops the seconds of a time so that "08:00" and "08:00:30" compare equal.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Formats a time as "HH:MM".
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Formats an end time, substituting the end-of-day label for "23:59" and "00:00".
pub fn display_end(time: NaiveTime) -> String {
    let time = truncate_to_minute(time);
    if time == NaiveTime::MIN || (time.hour() == 23 && time.minute() == 59) {
        END_OF_DAY_LABEL.to_string()
    } else {
        format_hhmm(time)
    }
}

/// Returns the calendar date an instant falls on at the given UTC offset.
///
/// Shifting by the offset before truncating keeps evening instants west of UTC (and
/// early-morning instants east of it) on the local date instead of the UTC one.
pub fn local_date_at(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    offset.from_utc_datetime(&instant.naive_utc()).date_naive()
}

/// Returns the calendar date an instant falls on in the machine's local time zone.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Normalizes an instant to its local "YYYY-MM-DD" key.
pub fn local_date_key(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    local_date_at(instant, offset).format("%Y-%m-%d").to_string()
}
