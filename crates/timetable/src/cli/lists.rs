//! Event list CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Event list management commands.
#[derive(Debug, Parser)]
pub struct ListsCommand {
    #[command(subcommand)]
    pub action: ListsAction,
}

/// Available event list actions.
#[derive(Debug, Subcommand)]
pub enum ListsAction {
    /// List all event lists.
    List,
    /// Create a new event list.
    Add {
        /// List name.
        name: String,
        /// Fallback color for its events.
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an event list. Its events are kept without a list.
    Delete {
        /// Event list ID.
        id: Uuid,
    },
}
