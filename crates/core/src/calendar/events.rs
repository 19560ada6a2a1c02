//! Projects custom events onto a week window.
//!
//! One-off events may span several days; each day they touch inside the window gets
//! its own block, clipped to that day. Recurring events repeat weekly on one weekday,
//! optionally bounded by a validity window, and always fit inside a single day.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use super::block::{Block, BlockKind, BlockSource};
use super::materialize::ExpansionContext;
use super::operations::event_selected;
use super::time::{display_end, format_hhmm, hour_value, ALL_DAY_LABEL, CONTINUATION_MARK};
use super::types::CustomEvent;

/// Color of events that carry none and belong to no colored list.
pub const DEFAULT_EVENT_COLOR: &str = "#6B7280";

const HOURS_PER_DAY: f64 = 24.0;

/// The part of an event drawn on one particular day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlice {
    pub start_val: f64,
    pub duration: f64,
    pub is_cut_top: bool,
    pub is_cut_bottom: bool,
    pub time_text: String,
}

/// Clips an event running from `start_date start_time` to `end_date end_time` to the
/// day `target`.
///
/// Returns `None` when the event does not touch `target` or leaves nothing to draw.
pub fn slice_day(
    target: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Option<DaySlice> {
    let is_start_day = target == start_date;
    let is_end_day = target == end_date;
    let is_middle_day = target > start_date && target < end_date;
    if !(is_start_day || is_end_day || is_middle_day) {
        return None;
    }

    let lower = if is_start_day { hour_value(start_time) } else { 0.0 };
    let upper = if is_end_day { hour_value(end_time) } else { HOURS_PER_DAY };
    let duration = upper - lower;
    if duration <= 0.0 {
        return None;
    }

    let time_text = match (is_start_day, is_end_day) {
        (true, true) => format!("{}\n{}", format_hhmm(start_time), display_end(end_time)),
        (true, false) => format!("{}\n{}", format_hhmm(start_time), CONTINUATION_MARK),
        (false, true) => format!("{}\n{}", CONTINUATION_MARK, display_end(end_time)),
        (false, false) => ALL_DAY_LABEL.to_string(),
    };

    Some(DaySlice {
        start_val: lower,
        duration,
        is_cut_top: !is_start_day,
        is_cut_bottom: !is_end_day,
        time_text,
    })
}

/// Expands every custom event into its blocks inside the window.
pub fn expand_events(events: &[CustomEvent], ctx: &ExpansionContext<'_>) -> Vec<Block> {
    events
        .iter()
        .filter(|event| event_selected(ctx.filters, event))
        .flat_map(|event| {
            if event.is_recurring {
                expand_recurring(event, ctx).into_iter().collect::<Vec<_>>()
            } else {
                expand_one_off(event, ctx)
            }
        })
        .collect()
}

fn expand_one_off(event: &CustomEvent, ctx: &ExpansionContext<'_>) -> Vec<Block> {
    let Some((start_date, end_date)) = event.span() else {
        debug!(event_id = %event.id, "custom event has no start date");
        return Vec::new();
    };

    // Only the days shared with the window can produce blocks.
    let first = start_date.max(ctx.window.start());
    let last = end_date.min(ctx.window.end());

    let mut blocks = Vec::new();
    let mut current = first;
    while current <= last {
        if let Some(block) = event_block(event, ctx, current, start_date, end_date) {
            blocks.push(block);
        }
        current += Duration::days(1);
    }
    blocks
}

fn expand_recurring(event: &CustomEvent, ctx: &ExpansionContext<'_>) -> Option<Block> {
    let Some(date) = event.day_of_week.and_then(|day| ctx.window.date_for(day)) else {
        debug!(event_id = %event.id, day_of_week = ?event.day_of_week, "recurring event has no valid weekday");
        return None;
    };
    if !event.recurs_on(date) {
        return None;
    }
    event_block(event, ctx, date, date, date)
}

fn event_block(
    event: &CustomEvent,
    ctx: &ExpansionContext<'_>,
    date: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Option<Block> {
    let day_idx = ctx.window.day_index(date)?;
    let start_time = event.start_time.unwrap_or(NaiveTime::MIN);
    let end_time = event.end_time.unwrap_or(NaiveTime::MIN);
    let slice = slice_day(date, start_date, end_date, start_time, end_time)?;

    let list = event.list_id.and_then(|id| ctx.list(id));
    let color = event
        .color
        .clone()
        .or_else(|| list.and_then(|list| list.color.clone()))
        .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string());

    Some(Block {
        id: Block::compose_id(BlockKind::Event, event.id, date),
        kind: BlockKind::Event,
        day_idx,
        date,
        starts_at: start_time,
        start_val: slice.start_val,
        duration: slice.duration,
        color,
        title: event.title.clone(),
        subtitle: list.map(|list| list.name.clone()).unwrap_or_default(),
        time_text: slice.time_text,
        is_cut_top: slice.is_cut_top,
        is_cut_bottom: slice.is_cut_bottom,
        is_merged: false,
        associated_exam: None,
        source: BlockSource::Event {
            event_id: event.id,
            list_id: event.list_id,
        },
    })
}
