//! Exam/class merging.
//!
//! An exam held in the slot of one of its subject's classes is drawn inside that
//! class block instead of next to it. Merging only annotates: the exam block gets
//! `is_merged` and the class block gets `associated_exam`. Both stay in the block set.
//!
//! This is part of the Functional Core - all functions are pure with no side effects.

use super::block::Block;
use super::time::truncate_to_minute;

/// Returns true if `exam` takes place in the slot of `class`.
///
/// Both must share subject and date, and start at the same minute.
pub fn is_same_slot(class: &Block, exam: &Block) -> bool {
    class.source.subject_id().is_some()
        && class.source.subject_id() == exam.source.subject_id()
        && class.date == exam.date
        && truncate_to_minute(class.starts_at) == truncate_to_minute(exam.starts_at)
}

/// Attaches each exam block to the first matching class block.
///
/// Classes are searched in expansion order, so same-slot exams all land on the
/// first matching class. Exams without a match are left untouched. Returns the
/// number of merged exams.
pub fn merge_exams(classes: &mut [Block], exams: &mut [Block]) -> usize {
    let mut merged = 0;

    for exam in exams.iter_mut() {
        let slot = classes
            .iter_mut()
            .find(|class| is_same_slot(class, exam));

        if let Some(class) = slot {
            exam.is_merged = true;
            class.associated_exam = Some(exam.id.clone());
            merged += 1;
        }
    }

    merged
}
