//! Demo timetable generation for seeding and testing.
//!
//! This module contains pure functions for building a realistic student timetable.
//! These functions have no side effects and can be used in unit tests, integration
//! tests, and for seeding an empty data store.

use chrono::{Duration, NaiveDate, NaiveTime};

use super::types::{
    Collections, CustomEvent, EventList, Exam, ScheduleEntry, Semester, Subject,
};
use super::week::WeekWindow;

/// Builds a demo timetable whose dated records fall in the week of `anchor`.
///
/// Creates:
/// - one current semester with four subjects and eight weekly slots
/// - a midterm sharing the Monday algebra lecture slot and a standalone lab exam
/// - a weekly gym session, a one-day appointment and an overnight trip
///
/// # Example
///
/// ```
/// use timetable_core::calendar::generate_demo_timetable;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
/// let collections = generate_demo_timetable(anchor);
///
/// assert_eq!(collections.subjects.len(), 4);
/// assert!(collections.current_semester().is_some());
/// ```
pub fn generate_demo_timetable(anchor: NaiveDate) -> Collections {
    let time = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
    let monday = WeekWindow::containing(anchor).start();
    let day = |offset: i64| monday + Duration::days(offset);

    let semester = Semester::new("Spring Semester").current();

    let algebra = Subject::new(semester.id, "Linear Algebra", "#3B82F6")
        .with_validity(Some(day(-28)), Some(day(70)));
    let physics = Subject::new(semester.id, "Physics II", "#F97316");
    let programming = Subject::new(semester.id, "Programming", "#10B981");
    let history = Subject::new(semester.id, "History of Science", "#8B5CF6")
        .with_validity(Some(day(14)), None);

    let slots = [
        (&algebra, 0, (8, 0), (9, 30), "Lecture", "A-101"),
        (&algebra, 3, (10, 0), (11, 30), "Exercise", "B-204"),
        (&physics, 1, (9, 0), (10, 30), "Lecture", "C-001"),
        (&physics, 4, (13, 0), (15, 0), "Lab", "Lab 3"),
        (&programming, 1, (14, 0), (15, 30), "Lecture", "A-101"),
        (&programming, 2, (16, 0), (18, 0), "Lab", "PC-Pool"),
        (&history, 2, (10, 0), (11, 30), "Seminar", "D-12"),
        (&history, 4, (8, 30), (10, 0), "Lecture", "D-12"),
    ];
    let schedule_entries = slots
        .iter()
        .map(|(subject, weekday, (sh, sm), (eh, em), kind, room)| {
            ScheduleEntry::new(subject.id, *weekday, time(*sh, *sm), time(*eh, *em))
                .with_type(*kind)
                .with_room(*room)
        })
        .collect();

    let exams = vec![
        Exam::new(algebra.id, day(0), "Midterm"),
        Exam::new(physics.id, day(3), "Lab Exam").at(time(15, 0)),
    ];

    let personal = EventList::new("Personal").with_color("#EC4899");
    let custom_events = vec![
        CustomEvent::weekly("Gym", 2, time(7, 0), time(8, 0)).with_list(personal.id),
        CustomEvent::one_off("Dentist", day(1), day(1), time(17, 0), time(18, 0))
            .with_list(personal.id)
            .with_color("#EF4444"),
        CustomEvent::one_off("Hiking Trip", day(5), day(6), time(6, 0), time(20, 0)),
    ];

    Collections {
        version: 1,
        semesters: vec![semester],
        event_lists: vec![personal],
        subjects: vec![algebra, physics, programming, history],
        schedule_entries,
        exams,
        custom_events,
        cancellations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::block::BlockKind;
    use crate::calendar::materialize::materialize;
    use crate::calendar::types::Filters;

    #[test]
    fn test_demo_week_materializes() {
        let anchor = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
        let collections = generate_demo_timetable(anchor);
        let window = WeekWindow::containing(anchor);

        let blocks = materialize(&collections, window, &Filters::new());

        // History starts two weeks later, so only six of eight slots show up.
        assert_eq!(blocks.iter().filter(|b| b.kind == BlockKind::Class).count(), 6);
        let exams: Vec<_> = blocks.iter().filter(|b| b.kind == BlockKind::Exam).collect();
        assert_eq!(exams.len(), 2);
        assert!(exams[0].is_merged);
        assert!(!exams[1].is_merged);
        // Gym, dentist and two days of hiking.
        assert_eq!(blocks.iter().filter(|b| b.kind == BlockKind::Event).count(), 4);
    }

    #[test]
    fn test_demo_is_anchored_to_week() {
        let a = generate_demo_timetable(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        let b = generate_demo_timetable(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());

        assert_eq!(a.exams[0].date, b.exams[0].date);
        assert_eq!(a.exams[0].date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }
}
