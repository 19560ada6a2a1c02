//! CLI command definitions.

pub mod events;
pub mod exams;
pub mod lists;
pub mod semesters;
pub mod subjects;
pub mod view;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Weekly student timetable.
#[derive(Debug, Parser)]
#[command(name = "timetable")]
#[command(about = "Weekly student timetable: classes, exams and personal events", long_about = None)]
pub struct Cli {
    /// JSON snapshot file holding the timetable.
    #[arg(long, env = "TIMETABLE_DATA")]
    pub data: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show every block of a week.
    Week(view::ViewArgs),
    /// Show one day's blocks in start order.
    Agenda(view::ViewArgs),
    /// Show where the week grid scrolls to once it settles.
    Anchor(view::ViewArgs),
    /// Write a demo timetable, or an empty one, to the data file.
    Seed {
        /// Week the demo exams and events fall in (defaults to today).
        #[arg(long, conflicts_with = "empty")]
        date: Option<NaiveDate>,
        /// Start from an empty timetable instead of the demo data.
        #[arg(long)]
        empty: bool,
        /// Overwrite an existing data file.
        #[arg(long)]
        force: bool,
    },
    /// Semester management.
    Semesters(semesters::SemestersCommand),
    /// Subject and weekly slot management.
    Subjects(subjects::SubjectsCommand),
    /// Exam management.
    Exams(exams::ExamsCommand),
    /// Event list management.
    Lists(lists::ListsCommand),
    /// Custom event management.
    Events(events::EventsCommand),
    /// Cancel or restore one occurrence of a weekly slot.
    Cancel {
        /// Schedule entry ID.
        entry_id: Uuid,
        /// Date of the occurrence (YYYY-MM-DD).
        date: NaiveDate,
        /// Restore the occurrence instead.
        #[arg(long)]
        undo: bool,
    },
}

/// Parses a weekday given as 0-6 (Monday = 0) or an English day name.
pub fn parse_weekday(value: &str) -> Result<u8, String> {
    if let Ok(index) = value.parse::<u8>() {
        return if index <= 6 {
            Ok(index)
        } else {
            Err(format!("day index must be 0-6, got {index}"))
        };
    }

    let lower = value.to_ascii_lowercase();
    ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
        .iter()
        .position(|prefix| lower.len() >= 3 && lower.starts_with(prefix))
        .map(|index| index as u8)
        .ok_or_else(|| format!("unknown weekday: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("0"), Ok(0));
        assert_eq!(parse_weekday("6"), Ok(6));
        assert_eq!(parse_weekday("Wed"), Ok(2));
        assert_eq!(parse_weekday("saturday"), Ok(5));
        assert!(parse_weekday("7").is_err());
        assert!(parse_weekday("mo").is_err());
        assert!(parse_weekday("funday").is_err());
    }

    #[test]
    fn test_parse_week_command() {
        let cli = Cli::try_parse_from([
            "timetable",
            "--format",
            "json",
            "week",
            "--date",
            "2026-03-11",
            "--offset",
            "-1",
        ])
        .unwrap();

        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Week(args) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 3, 11));
                assert_eq!(args.offset, -1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_cancel_undo() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "timetable",
            "cancel",
            &id.to_string(),
            "2026-03-09",
            "--undo",
        ])
        .unwrap();

        match cli.command {
            Commands::Cancel {
                entry_id,
                date,
                undo,
            } => {
                assert_eq!(entry_id, id);
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
                assert!(undo);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_seed_empty() {
        let cli = Cli::try_parse_from(["timetable", "seed", "--empty", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Seed {
                date: None,
                empty: true,
                force: true
            }
        ));

        let both = Cli::try_parse_from(["timetable", "seed", "--empty", "--date", "2026-03-09"]);
        assert!(both.is_err());
    }

    #[test]
    fn test_parse_lists_add() {
        let cli =
            Cli::try_parse_from(["timetable", "lists", "add", "Sports", "--color", "#10B981"])
                .unwrap();

        match cli.command {
            Commands::Lists(cmd) => match cmd.action {
                lists::ListsAction::Add { name, color } => {
                    assert_eq!(name, "Sports");
                    assert_eq!(color.as_deref(), Some("#10B981"));
                }
                other => panic!("unexpected action: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
