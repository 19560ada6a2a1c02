//! Command handlers.
//!
//! Each handler loads the snapshot into an [`InMemoryRepository`](crate::storage::InMemoryRepository),
//! runs against it, and writes the snapshot back if anything changed.

mod records;
mod view;

use serde::Serialize;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::format_output;

/// Where and how command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Printer {
    /// Prints `value` as JSON, or the `pretty` rendering of it.
    pub fn emit<T, F>(&self, value: &T, pretty: F)
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        match self.format {
            OutputFormat::Json => println!("{}", format_output(value, self.format)),
            OutputFormat::Pretty => println!("{}", pretty(value)),
        }
    }

    /// Prints a confirmation line unless `--quiet` was given or JSON was requested.
    pub fn note(&self, message: impl AsRef<str>) {
        if !self.quiet && matches!(self.format, OutputFormat::Pretty) {
            println!("{}", message.as_ref());
        }
    }
}

/// Runs the parsed command line.
pub async fn run(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(path) = cli.data {
        config.data_path = path;
    }
    let printer = Printer {
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Week(args) => view::week(&config, printer, args).await,
        Commands::Agenda(args) => view::agenda(&config, printer, args).await,
        Commands::Anchor(args) => view::anchor(&config, printer, args).await,
        Commands::Seed { date, empty, force } => {
            records::seed(&config, printer, date, empty, force)
        }
        Commands::Semesters(cmd) => records::semesters(&config, printer, cmd.action).await,
        Commands::Subjects(cmd) => records::subjects(&config, printer, cmd.action).await,
        Commands::Exams(cmd) => records::exams(&config, printer, cmd.action).await,
        Commands::Lists(cmd) => records::lists(&config, printer, cmd.action).await,
        Commands::Events(cmd) => records::events(&config, printer, cmd.action).await,
        Commands::Cancel {
            entry_id,
            date,
            undo,
        } => records::cancel(&config, printer, entry_id, date, undo).await,
    }
}
