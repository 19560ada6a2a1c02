//! Semester CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Semester management commands.
#[derive(Debug, Parser)]
pub struct SemestersCommand {
    #[command(subcommand)]
    pub action: SemestersAction,
}

/// Available semester actions.
#[derive(Debug, Subcommand)]
pub enum SemestersAction {
    /// List all semesters.
    List,
    /// Create a new semester.
    Add {
        /// Semester name.
        name: String,
        /// Make it the current semester.
        #[arg(long)]
        current: bool,
    },
    /// Mark a semester as current.
    Current {
        /// Semester ID.
        id: Uuid,
    },
    /// Delete a semester with its subjects.
    Delete {
        /// Semester ID.
        id: Uuid,
    },
}
