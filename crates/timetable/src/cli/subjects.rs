//! Subject CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use timetable_core::calendar::SlotDraft;
use uuid::Uuid;

use super::parse_weekday;

/// Subject management commands.
#[derive(Debug, Parser)]
pub struct SubjectsCommand {
    #[command(subcommand)]
    pub action: SubjectsAction,
}

/// Available subject actions.
#[derive(Debug, Subcommand)]
pub enum SubjectsAction {
    /// List subjects with their weekly slots.
    List,
    /// Create a subject with its weekly slots.
    Add {
        /// Semester ID.
        #[arg(long)]
        semester_id: Uuid,
        /// Subject name.
        #[arg(long)]
        name: String,
        /// Accent color.
        #[arg(long)]
        color: String,
        /// First day the subject meets.
        #[arg(long)]
        valid_from: Option<NaiveDate>,
        /// Last day the subject meets.
        #[arg(long)]
        valid_until: Option<NaiveDate>,
        /// Weekly slot as DAY,HH:MM,HH:MM[,TYPE[,ROOM]] (repeatable).
        #[arg(long = "slot", value_parser = parse_slot)]
        slots: Vec<SlotDraft>,
    },
    /// Edit a subject. Slot removals apply before additions.
    Edit {
        /// Subject ID.
        id: Uuid,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New color.
        #[arg(long)]
        color: Option<String>,
        /// Remove the slot at this position of `subjects list` (repeatable).
        #[arg(long = "remove-slot")]
        remove_slots: Vec<usize>,
        /// Add a weekly slot as DAY,HH:MM,HH:MM[,TYPE[,ROOM]] (repeatable).
        #[arg(long = "slot", value_parser = parse_slot)]
        slots: Vec<SlotDraft>,
    },
    /// Delete a subject with its slots and exams.
    Delete {
        /// Subject ID.
        id: Uuid,
    },
}

/// Parses `DAY,HH:MM,HH:MM[,TYPE[,ROOM]]` into a slot.
pub fn parse_slot(value: &str) -> Result<SlotDraft, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if !(3..=5).contains(&parts.len()) {
        return Err(format!(
            "expected DAY,HH:MM,HH:MM[,TYPE[,ROOM]], got {value:?}"
        ));
    }

    let time = |raw: &str| {
        NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| format!("invalid time: {raw}"))
    };
    let mut slot = SlotDraft::new(parse_weekday(parts[0])?, time(parts[1])?, time(parts[2])?);
    if let Some(kind) = parts.get(3).filter(|s| !s.is_empty()) {
        slot = slot.with_type(*kind);
    }
    if let Some(room) = parts.get(4).filter(|s| !s.is_empty()) {
        slot = slot.with_room(*room);
    }
    Ok(slot)
}
