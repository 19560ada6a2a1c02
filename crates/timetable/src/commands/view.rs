//! Read-only week views.

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use timetable_core::calendar::{local_date, Collections, Filters};

use super::Printer;
use crate::cli::view::ViewArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{pretty, WeekReport};
use crate::session::ViewSession;
use crate::storage::{load_collections, InMemoryRepository};

fn filters_for(collections: &Collections, args: &ViewArgs) -> Result<Filters> {
    let semesters = if args.current {
        let current = collections
            .current_semester()
            .ok_or_else(|| CliError::InvalidInput("no semester is marked current".into()))?;
        vec![current.id]
    } else {
        args.semesters.clone()
    };
    Ok(Filters::new()
        .with_semesters(semesters)
        .with_lists(args.lists.iter().copied()))
}

/// Moves `date` by `offset` whole weeks, keeping its weekday.
fn shift_weeks(date: NaiveDate, offset: i64) -> Result<NaiveDate> {
    Duration::try_weeks(offset)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| CliError::InvalidInput(format!("week offset {offset} is out of range")))
}

/// Opens a session on the requested week.
pub(super) fn open_session(
    config: &Config,
    args: &ViewArgs,
) -> Result<ViewSession<InMemoryRepository>> {
    let date = args.date.unwrap_or_else(|| local_date(Utc::now()));
    let date = shift_weeks(date, args.offset)?;

    let collections = load_collections(&config.data_path)?;
    let filters = filters_for(&collections, args)?;

    let repo = InMemoryRepository::from_collections(collections);
    Ok(ViewSession::new(repo, config, date).with_filters(filters))
}

pub async fn week(config: &Config, printer: Printer, args: ViewArgs) -> Result<()> {
    let mut session = open_session(config, &args)?;
    let blocks = session.blocks().await?;
    let window = session.window();
    info!(week_start = %window.start(), blocks = blocks.len(), "showing week");

    let report = WeekReport::new(window, session.selected(), &blocks);
    printer.emit(&report, |r| pretty::format_week(window, r.blocks));
    Ok(())
}

pub async fn agenda(config: &Config, printer: Printer, args: ViewArgs) -> Result<()> {
    let mut session = open_session(config, &args)?;
    let blocks = session.agenda().await?;
    let selected = session.selected();
    info!(date = %selected, blocks = blocks.len(), "showing agenda");

    printer.emit(&blocks, |b| pretty::format_agenda(selected, b));
    Ok(())
}

pub async fn anchor(config: &Config, printer: Printer, args: ViewArgs) -> Result<()> {
    let mut session = open_session(config, &args)?;
    let target = session.settle_scroll().await?;
    info!(
        week_start = %target.week_start,
        anchor_hour = target.anchor_hour,
        "scroll settled"
    );

    printer.emit(&target, pretty::format_anchor);
    Ok(())
}
