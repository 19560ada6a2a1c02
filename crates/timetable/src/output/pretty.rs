//! Pretty output formatting.

use chrono::NaiveDate;
use timetable_core::calendar::{
    associated_exam, exam_time, format_hhmm, Block, BlockKind, Collections, CustomEvent,
    EventList, Exam, ScrollTarget, Semester, Subject, WeekWindow,
};

fn weekday_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        6 => "Sun",
        _ => "???",
    }
}

fn kind_label(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Class => "class",
        BlockKind::Exam => "exam",
        BlockKind::Event => "event",
    }
}

/// Format a block on one line, with its merged exam below it.
pub fn format_block(block: &Block, blocks: &[Block]) -> String {
    let mut output = format!(
        "{:<24} {} [{}]",
        block.time_text.replace('\n', " - "),
        block.title,
        kind_label(block.kind)
    );
    if !block.subtitle.is_empty() {
        output.push_str(&format!("\n    {}", block.subtitle));
    }
    if let Some(exam) = associated_exam(blocks, block) {
        output.push_str(&format!("\n    + {}", exam.subtitle));
    }
    output
}

/// Format a week grouped by day. Merged exams appear under their class.
pub fn format_week(window: WeekWindow, blocks: &[Block]) -> String {
    let placed: Vec<&Block> = blocks.iter().filter(|b| b.is_placed()).collect();
    let mut output = format!(
        "WEEK {} - {} ({})\n",
        window.start(),
        window.end(),
        placed.len()
    );
    output.push_str(&"-".repeat(40));

    for (day_idx, date) in window.dates().into_iter().enumerate() {
        let mut day: Vec<&Block> = placed
            .iter()
            .copied()
            .filter(|b| b.day_idx == day_idx)
            .collect();
        if day.is_empty() {
            continue;
        }
        day.sort_by(|a, b| a.start_val.total_cmp(&b.start_val));

        output.push_str(&format!("\n{} {}", date.format("%a"), date));
        for block in day {
            output.push_str(&format!("\n  {}", format_block(block, blocks)));
        }
        output.push('\n');
    }
    if placed.is_empty() {
        output.push_str("\nNo blocks this week.");
    }
    output
}

/// Format one day's agenda. Agenda rows list merged exams on their own as well.
pub fn format_agenda(date: NaiveDate, blocks: &[Block]) -> String {
    if blocks.is_empty() {
        return format!("Nothing scheduled on {} {}.", date.format("%a"), date);
    }
    let mut output = format!("{} {} ({})\n", date.format("%a"), date, blocks.len());
    output.push_str(&"-".repeat(40));
    for block in blocks {
        output.push_str(&format!("\n{}", format_block(block, blocks)));
    }
    output
}

/// Format a scroll target.
pub fn format_anchor(target: &ScrollTarget) -> String {
    format!(
        "Week of {}\n  Anchor hour: {}\n  Offset: {}px",
        target.week_start, target.anchor_hour, target.offset_px
    )
}

/// Format a semester for display.
pub fn format_semester(semester: &Semester) -> String {
    let marker = if semester.is_current { " (current)" } else { "" };
    format!("{}{}\n  ID: {}", semester.name, marker, semester.id)
}

/// Format semesters for display.
pub fn format_semesters(semesters: &[Semester]) -> String {
    if semesters.is_empty() {
        return "No semesters found.".to_string();
    }
    let mut output = format!("SEMESTERS ({})\n", semesters.len());
    output.push_str(&"-".repeat(40));
    for semester in semesters {
        output.push_str(&format!("\n{}", format_semester(semester)));
        output.push('\n');
    }
    output
}

/// Format a subject with its numbered slots.
pub fn format_subject(subject: &Subject, collections: &Collections) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}\n  Semester: {}",
        subject.name, subject.color, subject.id, subject.semester_id
    );
    if let Some(start) = subject.start_datetime {
        output.push_str(&format!("\n  From: {}", start.date()));
    }
    if let Some(end) = subject.end_datetime {
        output.push_str(&format!("\n  Until: {}", end.date()));
    }
    let slots = collections
        .schedule_entries
        .iter()
        .filter(|entry| entry.subject_id == subject.id);
    for (index, entry) in slots.enumerate() {
        output.push_str(&format!(
            "\n  [{}] {} {}-{}",
            index,
            weekday_name(entry.day_of_week),
            format_hhmm(entry.start_time),
            format_hhmm(entry.end_time)
        ));
        if let Some(kind) = &entry.entry_type {
            output.push_str(&format!(" {}", kind));
        }
        if let Some(room) = &entry.room {
            output.push_str(&format!(" @ {}", room));
        }
        output.push_str(&format!("  ({})", entry.id));
    }
    output
}

/// Format subjects for display.
pub fn format_subjects(collections: &Collections) -> String {
    if collections.subjects.is_empty() {
        return "No subjects found.".to_string();
    }
    let mut output = format!("SUBJECTS ({})\n", collections.subjects.len());
    output.push_str(&"-".repeat(40));
    for subject in &collections.subjects {
        output.push_str(&format!("\n{}", format_subject(subject, collections)));
        output.push('\n');
    }
    output
}

/// Format an exam for display.
pub fn format_exam(exam: &Exam) -> String {
    format!(
        "{}\n  ID: {}\n  Subject: {}\n  When: {} {}",
        exam.title,
        exam.id,
        exam.subject_id,
        exam.date,
        format_hhmm(exam_time(exam))
    )
}

/// Format exams for display.
pub fn format_exams(exams: &[Exam]) -> String {
    if exams.is_empty() {
        return "No exams found.".to_string();
    }
    let mut output = format!("EXAMS ({})\n", exams.len());
    output.push_str(&"-".repeat(40));
    for exam in exams {
        output.push_str(&format!("\n{}", format_exam(exam)));
        output.push('\n');
    }
    output
}

/// Format an event list for display.
pub fn format_list(list: &EventList) -> String {
    let mut output = format!("{}\n  ID: {}", list.name, list.id);
    if let Some(color) = &list.color {
        output.push_str(&format!("\n  Color: {}", color));
    }
    output
}

pub fn format_lists(lists: &[EventList]) -> String {
    if lists.is_empty() {
        return "No event lists found.".to_string();
    }
    let mut output = format!("EVENT LISTS ({})\n", lists.len());
    output.push_str(&"-".repeat(40));
    for list in lists {
        output.push_str(&format!("\n{}", format_list(list)));
        output.push('\n');
    }
    output
}

/// Format a custom event for display.
pub fn format_event(event: &CustomEvent) -> String {
    let times = format!(
        "{}-{}",
        event.start_time.map(format_hhmm).unwrap_or_default(),
        event.end_time.map(format_hhmm).unwrap_or_default()
    );
    let when = if event.is_recurring {
        let day = event.day_of_week.map_or("???", weekday_name);
        format!("every {} {}", day, times)
    } else {
        match event.span() {
            Some((start, end)) if start == end => format!("{} {}", start, times),
            Some((start, end)) => format!("{} to {} {}", start, end, times),
            None => format!("undated {}", times),
        }
    };

    let mut output = format!("{}\n  ID: {}\n  When: {}", event.title, event.id, when);
    if let Some(list_id) = event.list_id {
        output.push_str(&format!("\n  List: {}", list_id));
    }
    if let Some(color) = &event.color {
        output.push_str(&format!("\n  Color: {}", color));
    }
    output
}

/// Format custom events for display.
pub fn format_events(events: &[CustomEvent]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}
