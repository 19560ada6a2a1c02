//! Projects weekly class slots onto a week window.

use chrono::NaiveDate;
use tracing::debug;

use super::block::{Block, BlockKind, BlockSource};
use super::materialize::ExpansionContext;
use super::operations::subject_selected;
use super::time::{format_hhmm, hour_value};
use super::types::{ScheduleEntry, Subject};

/// Expands every schedule entry into at most one block inside the window.
///
/// An occurrence is left out when its subject is unknown or filtered out, when its
/// date falls outside the subject's validity window, or when it was cancelled.
pub fn expand_classes(entries: &[ScheduleEntry], ctx: &ExpansionContext<'_>) -> Vec<Block> {
    entries
        .iter()
        .filter_map(|entry| expand_entry(entry, ctx))
        .collect()
}

fn expand_entry(entry: &ScheduleEntry, ctx: &ExpansionContext<'_>) -> Option<Block> {
    let Some(subject) = ctx.subject(entry.subject_id) else {
        debug!(entry_id = %entry.id, subject_id = %entry.subject_id, "schedule entry has no subject");
        return None;
    };
    if !subject_selected(ctx.filters, subject) {
        return None;
    }

    let Some(date) = ctx.window.date_for(entry.day_of_week) else {
        debug!(entry_id = %entry.id, day_of_week = entry.day_of_week, "schedule entry has invalid weekday");
        return None;
    };
    if !subject.is_active_on(date) {
        return None;
    }
    if ctx.is_cancelled(entry.id, date) {
        return None;
    }

    class_block(entry, subject, date)
}

fn class_block(entry: &ScheduleEntry, subject: &Subject, date: NaiveDate) -> Option<Block> {
    let start_val = hour_value(entry.start_time);
    let duration = hour_value(entry.end_time) - start_val;
    if duration <= 0.0 {
        debug!(entry_id = %entry.id, "schedule entry has empty time range");
        return None;
    }

    Some(Block {
        id: Block::compose_id(BlockKind::Class, entry.id, date),
        kind: BlockKind::Class,
        day_idx: usize::from(entry.day_of_week),
        date,
        starts_at: entry.start_time,
        start_val,
        duration,
        color: subject.color.clone(),
        title: subject.name.clone(),
        subtitle: class_subtitle(entry),
        time_text: format!(
            "{} - {}",
            format_hhmm(entry.start_time),
            format_hhmm(entry.end_time)
        ),
        is_cut_top: false,
        is_cut_bottom: false,
        is_merged: false,
        associated_exam: None,
        source: BlockSource::Class {
            entry_id: entry.id,
            subject_id: subject.id,
        },
    })
}

/// Builds "Lecture • Room A-101" from whichever of type and room are set.
fn class_subtitle(entry: &ScheduleEntry) -> String {
    let room = entry.room.as_ref().map(|room| format!("Room {room}"));
    [entry.entry_type.clone(), room]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::types::{Cancellation, Collections, Filters};
    use crate::calendar::week::WeekWindow;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn week() -> WeekWindow {
        WeekWindow::containing(make_date(2026, 3, 9))
    }

    fn fixture() -> (Collections, Uuid, Uuid) {
        let semester_id = Uuid::new_v4();
        let subject = Subject::new(semester_id, "Algebra", "#3B82F6");
        let entry = ScheduleEntry::new(subject.id, 1, make_time(8, 0), make_time(9, 30))
            .with_type("Lecture")
            .with_room("A-101");
        let entry_id = entry.id;
        let collections = Collections {
            subjects: vec![subject],
            schedule_entries: vec![entry],
            ..Default::default()
        };
        (collections, semester_id, entry_id)
    }

    fn expand(collections: &Collections, filters: &Filters) -> Vec<Block> {
        let ctx = ExpansionContext::new(collections, week(), filters);
        expand_classes(&collections.schedule_entries, &ctx)
    }

    #[test]
    fn test_entry_lands_on_its_weekday() {
        let (collections, _, entry_id) = fixture();

        let blocks = expand(&collections, &Filters::new());

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.day_idx, 1);
        assert_eq!(block.date, make_date(2026, 3, 10));
        assert_eq!(block.start_val, 8.0);
        assert_eq!(block.duration, 1.5);
        assert_eq!(block.title, "Algebra");
        assert_eq!(block.subtitle, "Lecture • Room A-101");
        assert_eq!(block.time_text, "08:00 - 09:30");
        assert_eq!(block.source.record_id(), entry_id);
        assert!(!block.is_cut_top && !block.is_cut_bottom);
    }

    #[test]
    fn test_subtitle_with_partial_fields() {
        let subject_id = Uuid::new_v4();
        let entry = ScheduleEntry::new(subject_id, 0, make_time(8, 0), make_time(9, 0));
        assert_eq!(class_subtitle(&entry), "");
        assert_eq!(class_subtitle(&entry.clone().with_room("B2")), "Room B2");
        assert_eq!(class_subtitle(&entry.with_type("Lab")), "Lab");
    }

    #[test]
    fn test_dangling_subject_is_dropped() {
        let (mut collections, _, _) = fixture();
        collections.subjects.clear();

        assert!(expand(&collections, &Filters::new()).is_empty());
    }

    #[test]
    fn test_semester_filter() {
        let (collections, semester_id, _) = fixture();

        assert_eq!(
            expand(&collections, &Filters::new().with_semesters([semester_id])).len(),
            1
        );
        assert!(expand(&collections, &Filters::new().with_semesters([Uuid::new_v4()])).is_empty());
    }

    #[test]
    fn test_validity_window_bounds_occurrence() {
        let (mut collections, _, _) = fixture();

        // Tuesday 2026-03-10 is the last valid day.
        collections.subjects[0] = collections.subjects[0]
            .clone()
            .with_validity(None, Some(make_date(2026, 3, 10)));
        assert_eq!(expand(&collections, &Filters::new()).len(), 1);

        collections.subjects[0] = collections.subjects[0]
            .clone()
            .with_validity(Some(make_date(2026, 3, 11)), None);
        assert!(expand(&collections, &Filters::new()).is_empty());
    }

    #[test]
    fn test_cancellation_removes_only_that_date() {
        let (mut collections, _, entry_id) = fixture();
        collections
            .cancellations
            .push(Cancellation::new(entry_id, make_date(2026, 3, 17)));
        assert_eq!(expand(&collections, &Filters::new()).len(), 1);

        collections
            .cancellations
            .push(Cancellation::new(entry_id, make_date(2026, 3, 10)));
        assert!(expand(&collections, &Filters::new()).is_empty());
    }

    #[test]
    fn test_empty_or_inverted_range_is_dropped() {
        let (mut collections, _, _) = fixture();
        collections.schedule_entries[0].end_time = make_time(8, 0);
        assert!(expand(&collections, &Filters::new()).is_empty());

        collections.schedule_entries[0].end_time = make_time(7, 0);
        assert!(expand(&collections, &Filters::new()).is_empty());
    }

    #[test]
    fn test_out_of_range_weekday_is_dropped() {
        let (mut collections, _, _) = fixture();
        collections.schedule_entries[0].day_of_week = 7;

        assert!(expand(&collections, &Filters::new()).is_empty());
    }
}
