use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An academic term that groups subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: Uuid,
    pub name: String,
    /// Only one semester is current at a time.
    #[serde(default)]
    pub is_current: bool,
}

impl Semester {
    /// Creates a new, non-current semester.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_current: false,
        }
    }

    /// Marks this semester as the current one.
    pub fn current(mut self) -> Self {
        self.is_current = true;
        self
    }

    /// Sets a specific ID for this semester (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A user-defined list that groups custom events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventList {
    pub id: Uuid,
    pub name: String,
    /// Fallback color for events of this list that carry none.
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub color: Option<String>,
}

impl EventList {
    /// Creates a new event list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
        }
    }

    /// Sets the fallback color for events of this list.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets a specific ID for this list (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A course taught during a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub semester_id: Uuid,
    pub name: String,
    /// Accent color for every block derived from this subject (CSS color value).
    pub color: String,
    /// First moment the subject's weekly slots apply. `None` is unbounded.
    #[serde(default)]
    pub start_datetime: Option<NaiveDateTime>,
    /// Last moment the subject's weekly slots apply. `None` is unbounded.
    #[serde(default)]
    pub end_datetime: Option<NaiveDateTime>,
}

impl Subject {
    /// Creates a new subject without a validity window.
    pub fn new(semester_id: Uuid, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            semester_id,
            name: name.into(),
            color: color.into(),
            start_datetime: None,
            end_datetime: None,
        }
    }

    /// Bounds the subject to the dates `start..=end`.
    pub fn with_validity(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_datetime = start.and_then(|d| d.and_hms_opt(0, 0, 0));
        self.end_datetime = end.and_then(|d| d.and_hms_opt(23, 59, 59));
        self
    }

    /// Sets a specific ID for this subject (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns true if `date` lies inside the validity window.
    ///
    /// Comparison is by calendar date only; the time part of each bound is ignored.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_datetime.is_none_or(|start| date >= start.date())
            && self.end_datetime.is_none_or(|end| date <= end.date())
    }
}

/// One weekly recurring class meeting of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub subject_id: Uuid,
    /// Day of the week, Monday = 0 through Sunday = 6.
    pub day_of_week: u8,
    #[serde(with = "crate::serde::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::serde::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub room: Option<String>,
    /// Free-form meeting type such as "Lecture" or "Lab".
    #[serde(
        default,
        rename = "type",
        deserialize_with = "crate::serde::deserialize_optional_string"
    )]
    pub entry_type: Option<String>,
}

impl ScheduleEntry {
    /// Creates a new weekly slot for a subject.
    pub fn new(subject_id: Uuid, day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id,
            day_of_week,
            start_time,
            end_time,
            room: None,
            entry_type: None,
        }
    }

    /// Sets the room for this slot.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the meeting type for this slot.
    pub fn with_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }

    /// Sets a specific ID for this slot (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A date-specific exam of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    /// Start time; blocks fall back to 08:00 when unset.
    #[serde(
        default,
        deserialize_with = "crate::serde::deserialize_optional_time",
        serialize_with = "crate::serde::serialize_optional_time"
    )]
    pub time: Option<NaiveTime>,
    pub title: String,
}

impl Exam {
    /// Creates a new exam without an explicit time.
    pub fn new(subject_id: Uuid, date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id,
            date,
            time: None,
            title: title.into(),
        }
    }

    /// Sets the start time for this exam.
    pub fn at(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets a specific ID for this exam (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A personal event, either one-off (possibly multi-day) or weekly recurring.
///
/// The record keeps the flat shape of the data store: which fields matter depends on
/// `is_recurring`. One-off events use `date` (or `start_date`) and an optional
/// `end_date`. Recurring events use `day_of_week` and treat `start_date`/`end_date` as
/// an optional validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub id: Uuid,
    #[serde(default)]
    pub list_id: Option<Uuid>,
    pub title: String,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub day_of_week: Option<u8>,
    #[serde(
        default,
        deserialize_with = "crate::serde::deserialize_optional_time",
        serialize_with = "crate::serde::serialize_optional_time"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(
        default,
        deserialize_with = "crate::serde::deserialize_optional_time",
        serialize_with = "crate::serde::serialize_optional_time"
    )]
    pub end_time: Option<NaiveTime>,
}

impl CustomEvent {
    /// Creates a one-off event spanning `start..=end`.
    pub fn one_off(
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id: None,
            title: title.into(),
            color: None,
            is_recurring: false,
            date: None,
            start_date: Some(start),
            end_date: Some(end),
            day_of_week: None,
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// Creates an event repeating every week on `day_of_week` (Monday = 0).
    pub fn weekly(
        title: impl Into<String>,
        day_of_week: u8,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id: None,
            title: title.into(),
            color: None,
            is_recurring: true,
            date: None,
            start_date: None,
            end_date: None,
            day_of_week: Some(day_of_week),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// Bounds a recurring event to the dates `start..=end`.
    pub fn with_validity(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Assigns the event to a list.
    pub fn with_list(mut self, list_id: Uuid) -> Self {
        self.list_id = Some(list_id);
        self
    }

    /// Sets the accent color for this event.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns the inclusive date span of a one-off event.
    ///
    /// The start is `date`, falling back to `start_date`; the end falls back to the start.
    /// Returns `None` when no start date is recorded.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.date.or(self.start_date)?;
        Some((start, self.end_date.unwrap_or(start)))
    }

    /// Returns true if a recurring event's validity window contains `date`.
    pub fn recurs_on(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Removes one occurrence of a weekly schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cancellation {
    pub entry_id: Uuid,
    pub date: NaiveDate,
}

impl Cancellation {
    /// Creates a cancellation of `entry_id` on `date`.
    pub fn new(entry_id: Uuid, date: NaiveDate) -> Self {
        Self { entry_id, date }
    }
}

/// One consistent snapshot of every collection owned by the data store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collections {
    /// Bumped by the data store on every mutation.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub semesters: Vec<Semester>,
    #[serde(default)]
    pub event_lists: Vec<EventList>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub schedule_entries: Vec<ScheduleEntry>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub custom_events: Vec<CustomEvent>,
    #[serde(default)]
    pub cancellations: Vec<Cancellation>,
}

impl Collections {
    /// Returns the semester flagged as current, if any.
    pub fn current_semester(&self) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.is_current)
    }
}

/// Filter selections applied during materialization. Empty sets select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub semester_ids: BTreeSet<Uuid>,
    #[serde(default)]
    pub list_ids: BTreeSet<Uuid>,
}

impl Filters {
    /// Creates an empty filter selecting every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts classes and exams to the given semesters.
    pub fn with_semesters(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.semester_ids.extend(ids);
        self
    }

    /// Restricts custom events to the given lists.
    pub fn with_lists(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.list_ids.extend(ids);
        self
    }
}
