//! Custom event CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::parse_weekday;

/// Custom event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available custom event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List all custom events.
    List,
    /// Create a one-off event, possibly spanning several days.
    AddOnce {
        /// Event title.
        #[arg(long)]
        title: String,
        /// First day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// Last day (YYYY-MM-DD, defaults to the first day).
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Start time on the first day (HH:MM).
        #[arg(long)]
        start_time: NaiveTime,
        /// End time on the last day (HH:MM).
        #[arg(long)]
        end_time: NaiveTime,
        /// Event list ID.
        #[arg(long)]
        list_id: Option<Uuid>,
        /// Accent color (falls back to the list color).
        #[arg(long)]
        color: Option<String>,
    },
    /// Create an event repeating every week.
    AddWeekly {
        /// Event title.
        #[arg(long)]
        title: String,
        /// Weekday (0-6 with Monday = 0, or a day name).
        #[arg(long, value_parser = parse_weekday)]
        day: u8,
        /// Start time (HH:MM).
        #[arg(long)]
        start_time: NaiveTime,
        /// End time (HH:MM).
        #[arg(long)]
        end_time: NaiveTime,
        /// First day the event repeats on.
        #[arg(long)]
        valid_from: Option<NaiveDate>,
        /// Last day the event repeats on.
        #[arg(long)]
        valid_until: Option<NaiveDate>,
        /// Event list ID.
        #[arg(long)]
        list_id: Option<Uuid>,
        /// Accent color (falls back to the list color).
        #[arg(long)]
        color: Option<String>,
    },
    /// Update an event.
    Update {
        /// Event ID.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New start time.
        #[arg(long)]
        start_time: Option<NaiveTime>,
        /// New end time.
        #[arg(long)]
        end_time: Option<NaiveTime>,
        /// New list ID.
        #[arg(long)]
        list_id: Option<Uuid>,
        /// New color.
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete event by ID.
    Delete {
        /// Event ID.
        id: Uuid,
    },
}
