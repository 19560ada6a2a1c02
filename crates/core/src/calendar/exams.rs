//! Projects date-specific exams onto a week window.

use chrono::NaiveTime;
use tracing::debug;

use super::block::{Block, BlockKind, BlockSource};
use super::materialize::ExpansionContext;
use super::operations::subject_selected;
use super::time::{format_hhmm, hour_value};
use super::types::Exam;

/// Every exam block is drawn this many hours long.
pub const EXAM_DURATION_HOURS: f64 = 1.5;

/// Start time of exams recorded without one.
pub const DEFAULT_EXAM_TIME: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Returns the start time of an exam, defaulting to 08:00.
pub fn exam_time(exam: &Exam) -> NaiveTime {
    exam.time.unwrap_or(DEFAULT_EXAM_TIME)
}

/// Expands every exam dated inside the window into one block.
pub fn expand_exams(exams: &[Exam], ctx: &ExpansionContext<'_>) -> Vec<Block> {
    exams
        .iter()
        .filter_map(|exam| expand_exam(exam, ctx))
        .collect()
}

fn expand_exam(exam: &Exam, ctx: &ExpansionContext<'_>) -> Option<Block> {
    let Some(subject) = ctx.subject(exam.subject_id) else {
        debug!(exam_id = %exam.id, subject_id = %exam.subject_id, "exam has no subject");
        return None;
    };
    if !subject_selected(ctx.filters, subject) {
        return None;
    }
    let day_idx = ctx.window.day_index(exam.date)?;

    let time = exam_time(exam);
    Some(Block {
        id: Block::compose_id(BlockKind::Exam, exam.id, exam.date),
        kind: BlockKind::Exam,
        day_idx,
        date: exam.date,
        starts_at: time,
        start_val: hour_value(time),
        duration: EXAM_DURATION_HOURS,
        color: subject.color.clone(),
        title: subject.name.clone(),
        subtitle: format!("EXAM: {}", exam.title),
        time_text: format_hhmm(time),
        is_cut_top: false,
        is_cut_bottom: false,
        is_merged: false,
        associated_exam: None,
        source: BlockSource::Exam {
            exam_id: exam.id,
            subject_id: subject.id,
        },
    })
}
