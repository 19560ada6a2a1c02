//! Week view CLI arguments.

use chrono::NaiveDate;
use clap::Args;
use uuid::Uuid;

/// Selects the week (and day) to show and the filters to apply.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Day to select (YYYY-MM-DD, defaults to today).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Weeks to move from the selected day (negative goes back).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,
    /// Only show classes and exams of this semester (repeatable).
    #[arg(long = "semester")]
    pub semesters: Vec<Uuid>,
    /// Only show the current semester's classes and exams.
    #[arg(long, conflicts_with = "semesters")]
    pub current: bool,
    /// Only show events of this list (repeatable).
    #[arg(long = "list")]
    pub lists: Vec<Uuid>,
}
