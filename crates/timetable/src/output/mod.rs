//! Output formatting functions.

pub mod json;
pub mod pretty;

use chrono::NaiveDate;
use serde::Serialize;
use timetable_core::calendar::{Block, WeekWindow};

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Serializable view of one materialized week.
#[derive(Debug, Serialize)]
pub struct WeekReport<'a> {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub selected: NaiveDate,
    pub blocks: &'a [Block],
}

impl<'a> WeekReport<'a> {
    pub fn new(window: WeekWindow, selected: NaiveDate, blocks: &'a [Block]) -> Self {
        Self {
            week_start: window.start(),
            week_end: window.end(),
            selected,
            blocks,
        }
    }
}
