use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::EntityError;
use super::types::{
    Cancellation, CustomEvent, EventList, Exam, Filters, ScheduleEntry, Semester, Subject,
};

/// Indexes subjects by id for lookups during expansion.
pub fn index_subjects(subjects: &[Subject]) -> HashMap<Uuid, &Subject> {
    subjects.iter().map(|subject| (subject.id, subject)).collect()
}

/// Collects cancellations into a set of (entry id, date) pairs.
pub fn cancelled_occurrences(cancellations: &[Cancellation]) -> HashSet<(Uuid, NaiveDate)> {
    cancellations
        .iter()
        .map(|cancellation| (cancellation.entry_id, cancellation.date))
        .collect()
}

/// Returns true if the semester filter lets the subject through.
pub fn subject_selected(filters: &Filters, subject: &Subject) -> bool {
    filters.semester_ids.is_empty() || filters.semester_ids.contains(&subject.semester_id)
}

/// Returns true if the list filter lets the event through.
///
/// While a list filter is active, events that belong to no list are filtered out.
pub fn event_selected(filters: &Filters, event: &CustomEvent) -> bool {
    filters.list_ids.is_empty()
        || event
            .list_id
            .is_some_and(|list_id| filters.list_ids.contains(&list_id))
}

/// Validates a semester before creation or update.
pub fn validate_semester(semester: &Semester) -> Result<(), EntityError> {
    validate_name(&semester.name)
}

/// Validates an event list before creation.
pub fn validate_event_list(list: &EventList) -> Result<(), EntityError> {
    validate_name(&list.name)?;
    match &list.color {
        Some(color) if !is_valid_color(color) => Err(EntityError::InvalidColor(color.clone())),
        _ => Ok(()),
    }
}

/// Validates a subject before creation or update.
pub fn validate_subject(subject: &Subject) -> Result<(), EntityError> {
    validate_name(&subject.name)?;
    if !is_valid_color(&subject.color) {
        return Err(EntityError::InvalidColor(subject.color.clone()));
    }
    if let (Some(start), Some(end)) = (subject.start_datetime, subject.end_datetime) {
        if end.date() < start.date() {
            return Err(EntityError::InvalidDateRange);
        }
    }
    Ok(())
}

/// Validates one weekly slot before creation or update.
pub fn validate_schedule_entry(entry: &ScheduleEntry) -> Result<(), EntityError> {
    validate_day_of_week(entry.day_of_week)?;
    if entry.end_time <= entry.start_time {
        return Err(EntityError::InvalidTimeRange);
    }
    Ok(())
}

/// Validates an exam before creation or update.
pub fn validate_exam(exam: &Exam) -> Result<(), EntityError> {
    validate_title(&exam.title)
}

/// Validates a custom event before creation or update.
pub fn validate_custom_event(event: &CustomEvent) -> Result<(), EntityError> {
    validate_title(&event.title)?;
    if let Some(color) = &event.color {
        if !is_valid_color(color) {
            return Err(EntityError::InvalidColor(color.clone()));
        }
    }

    let single_day = if event.is_recurring {
        let day = event.day_of_week.ok_or(EntityError::MissingDayOfWeek)?;
        validate_day_of_week(day)?;
        if let (Some(start), Some(end)) = (event.start_date, event.end_date) {
            if end < start {
                return Err(EntityError::InvalidDateRange);
            }
        }
        true
    } else {
        let (start, end) = event.span().ok_or(EntityError::MissingStartDate)?;
        if end < start {
            return Err(EntityError::InvalidDateRange);
        }
        start == end
    };

    // Multi-day spans may end earlier in the day than they started.
    if single_day {
        if let (Some(start), Some(end)) = (event.start_time, event.end_time) {
            if end <= start {
                return Err(EntityError::InvalidTimeRange);
            }
        }
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<(), EntityError> {
    if name.trim().is_empty() {
        return Err(EntityError::EmptyName);
    }
    if name.len() > 100 {
        return Err(EntityError::NameTooLong);
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), EntityError> {
    if title.trim().is_empty() {
        return Err(EntityError::EmptyTitle);
    }
    if title.len() > 200 {
        return Err(EntityError::TitleTooLong);
    }
    Ok(())
}

fn validate_day_of_week(day: u8) -> Result<(), EntityError> {
    if day > 6 {
        return Err(EntityError::InvalidDayOfWeek(day));
    }
    Ok(())
}

/// Checks if a color string is valid (hex color or CSS named color).
fn is_valid_color(color: &str) -> bool {
    if color.is_empty() {
        return false;
    }

    // Check hex color format (#RGB, #RRGGBB, #RRGGBBAA)
    if let Some(hex) = color.strip_prefix('#') {
        let valid_lengths = [3, 6, 8];
        return valid_lengths.contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let css_colors = [
        "red", "green", "blue", "yellow", "orange", "purple", "pink", "cyan", "magenta", "white",
        "black", "gray", "grey", "brown", "navy", "teal", "olive", "maroon", "lime", "aqua",
        "fuchsia", "silver",
    ];
    css_colors.contains(&color.to_lowercase().as_str())
}
