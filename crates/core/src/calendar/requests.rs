//! Request types for the data store's write operations.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.
//! Each request validates and converts itself into the record the store persists.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::EntityError;
use super::operations::{
    validate_custom_event, validate_event_list, validate_exam, validate_schedule_entry,
    validate_semester, validate_subject,
};
use super::types::{CustomEvent, EventList, Exam, ScheduleEntry, Semester, Subject};

/// Request payload for creating a semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSemesterRequest {
    pub name: String,
    #[serde(default)]
    pub is_current: bool,
}

impl CreateSemesterRequest {
    /// Validates the request and builds the semester.
    pub fn into_semester(self) -> Result<Semester, EntityError> {
        let semester = Semester {
            id: Uuid::new_v4(),
            name: self.name,
            is_current: self.is_current,
        };
        validate_semester(&semester)?;
        Ok(semester)
    }
}

/// Request payload for creating an event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventListRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CreateEventListRequest {
    pub fn into_list(self) -> Result<EventList, EntityError> {
        let list = EventList {
            id: Uuid::new_v4(),
            name: self.name,
            color: self.color,
        };
        validate_event_list(&list)?;
        Ok(list)
    }
}

/// Request payload for creating an exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamRequest {
    pub subject_id: Uuid,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub title: String,
}

impl CreateExamRequest {
    /// Validates the request and builds the exam.
    pub fn into_exam(self) -> Result<Exam, EntityError> {
        let exam = Exam {
            id: Uuid::new_v4(),
            subject_id: self.subject_id,
            date: self.date,
            time: self.time,
            title: self.title,
        };
        validate_exam(&exam)?;
        Ok(exam)
    }
}

/// Request payload for updating an exam. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExamRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UpdateExamRequest {
    /// Applies the changes to a copy of `exam` and validates the result.
    pub fn apply_to(self, exam: &Exam) -> Result<Exam, EntityError> {
        let mut updated = exam.clone();
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(time) = self.time {
            updated.time = Some(time);
        }
        if let Some(title) = self.title {
            updated.title = title;
        }
        validate_exam(&updated)?;
        Ok(updated)
    }
}

/// How a requested custom event is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repeat", rename_all = "snake_case")]
pub enum EventScheduleRequest {
    /// Runs once from `start_date` to `end_date` (defaults to the start).
    Once {
        start_date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    /// Repeats every week on `day_of_week`, optionally within a validity window.
    Weekly {
        day_of_week: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        valid_from: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        valid_until: Option<NaiveDate>,
    },
}

/// Request payload for creating a custom event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub schedule: EventScheduleRequest,
}

impl CreateEventRequest {
    /// Validates the request and builds the event.
    pub fn into_event(self) -> Result<CustomEvent, EntityError> {
        let mut event = match self.schedule {
            EventScheduleRequest::Once {
                start_date,
                end_date,
            } => CustomEvent::one_off(
                self.title,
                start_date,
                end_date.unwrap_or(start_date),
                self.start_time,
                self.end_time,
            ),
            EventScheduleRequest::Weekly {
                day_of_week,
                valid_from,
                valid_until,
            } => CustomEvent::weekly(self.title, day_of_week, self.start_time, self.end_time)
                .with_validity(valid_from, valid_until),
        };
        event.list_id = self.list_id;
        event.color = self.color;
        validate_custom_event(&event)?;
        Ok(event)
    }
}

/// Request payload for updating a custom event. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
}

impl UpdateEventRequest {
    /// Applies the changes to a copy of `event` and validates the result.
    pub fn apply_to(self, event: &CustomEvent) -> Result<CustomEvent, EntityError> {
        let mut updated = event.clone();
        if let Some(title) = self.title {
            updated.title = title;
        }
        if let Some(list_id) = self.list_id {
            updated.list_id = Some(list_id);
        }
        if let Some(color) = self.color {
            updated.color = Some(color);
        }
        if let Some(start_time) = self.start_time {
            updated.start_time = Some(start_time);
        }
        if let Some(end_time) = self.end_time {
            updated.end_time = Some(end_time);
        }
        validate_custom_event(&updated)?;
        Ok(updated)
    }
}

/// One weekly slot being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDraft {
    /// Id of the schedule entry this slot was loaded from. Kept slots keep their
    /// entry, and with it the entry's cancellations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
}

impl SlotDraft {
    pub fn new(day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: None,
            day_of_week,
            start_time,
            end_time,
            room: None,
            entry_type: None,
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }

    fn into_entry(self, subject_id: Uuid, id: Uuid) -> ScheduleEntry {
        ScheduleEntry {
            id,
            subject_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room,
            entry_type: self.entry_type,
        }
    }
}

impl From<&ScheduleEntry> for SlotDraft {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            id: Some(entry.id),
            day_of_week: entry.day_of_week,
            start_time: entry.start_time,
            end_time: entry.end_time,
            room: entry.room.clone(),
            entry_type: entry.entry_type.clone(),
        }
    }
}

/// A subject and its weekly slots as edited before saving.
///
/// Slot edits never touch the draft they are called on; each returns a new draft.
/// The committed subject stays unchanged until the draft is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDraft {
    /// Set when editing an existing subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub semester_id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub slots: Vec<SlotDraft>,
}

impl SubjectDraft {
    /// Starts a draft for a new subject.
    pub fn new(semester_id: Uuid, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            semester_id,
            name: name.into(),
            color: color.into(),
            valid_from: None,
            valid_until: None,
            slots: Vec::new(),
        }
    }

    /// Starts a draft editing `subject` and its current slots.
    pub fn from_subject<'a>(
        subject: &Subject,
        entries: impl IntoIterator<Item = &'a ScheduleEntry>,
    ) -> Self {
        Self {
            id: Some(subject.id),
            semester_id: subject.semester_id,
            name: subject.name.clone(),
            color: subject.color.clone(),
            valid_from: subject.start_datetime.map(|dt| dt.date()),
            valid_until: subject.end_datetime.map(|dt| dt.date()),
            slots: entries
                .into_iter()
                .filter(|entry| entry.subject_id == subject.id)
                .map(SlotDraft::from)
                .collect(),
        }
    }

    /// Returns a draft with `slot` appended.
    pub fn with_slot(&self, slot: SlotDraft) -> Self {
        let mut next = self.clone();
        next.slots.push(slot);
        next
    }

    /// Returns a draft with the slot at `index` replaced.
    pub fn replace_slot(&self, index: usize, slot: SlotDraft) -> Result<Self, EntityError> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.slots[index] = slot;
        Ok(next)
    }

    /// Returns a draft without the slot at `index`.
    pub fn without_slot(&self, index: usize) -> Result<Self, EntityError> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.slots.remove(index);
        Ok(next)
    }

    /// Validates the draft and builds the subject with its schedule entries.
    ///
    /// Slots loaded from an entry keep that entry's id; new slots, and copies of a
    /// slot already emitted, get a fresh one.
    pub fn into_records(self) -> Result<(Subject, Vec<ScheduleEntry>), EntityError> {
        let subject = Subject {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            semester_id: self.semester_id,
            name: self.name,
            color: self.color,
            start_datetime: None,
            end_datetime: None,
        }
        .with_validity(self.valid_from, self.valid_until);
        validate_subject(&subject)?;

        let mut seen = HashSet::new();
        let entries = self
            .slots
            .into_iter()
            .map(|slot| {
                let id = slot
                    .id
                    .filter(|id| seen.insert(*id))
                    .unwrap_or_else(Uuid::new_v4);
                slot.into_entry(subject.id, id)
            })
            .collect::<Vec<_>>();
        for entry in &entries {
            validate_schedule_entry(entry)?;
        }

        Ok((subject, entries))
    }

    fn check_index(&self, index: usize) -> Result<(), EntityError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(EntityError::SlotOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }
}
