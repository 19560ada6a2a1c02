//! Exam CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Exam management commands.
#[derive(Debug, Parser)]
pub struct ExamsCommand {
    #[command(subcommand)]
    pub action: ExamsAction,
}

/// Available exam actions.
#[derive(Debug, Subcommand)]
pub enum ExamsAction {
    /// List all exams.
    List,
    /// Create a new exam.
    Add {
        /// Subject ID.
        #[arg(long)]
        subject_id: Uuid,
        /// Exam date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// Start time (HH:MM, defaults to 08:00).
        #[arg(long)]
        time: Option<NaiveTime>,
        /// Exam title.
        #[arg(long)]
        title: String,
    },
    /// Update an exam.
    Update {
        /// Exam ID.
        id: Uuid,
        /// New date.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New start time.
        #[arg(long)]
        time: Option<NaiveTime>,
        /// New title.
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete exam by ID.
    Delete {
        /// Exam ID.
        id: Uuid,
    },
}
