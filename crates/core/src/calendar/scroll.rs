//! Initial scroll position of the week grid.
//!
//! The grid opens one hour before the earliest block of the week. Scrolling waits for
//! a short settle delay so that layout is in place, and every new block computation
//! supersedes a scroll that has not fired yet.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::trace;

use super::block::Block;
use super::week::WeekWindow;

/// Anchor used when the week has no blocks.
pub const DEFAULT_ANCHOR_HOUR: f64 = 8.0;

/// Height of one hour row of the week grid.
pub const PIXELS_PER_HOUR: f64 = 60.0;

/// Default delay between a computation and its scroll.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Returns the hour the week grid should initially scroll to.
///
/// Blocks continuing from an earlier day are ignored since their real start is not
/// in view.
pub fn compute_scroll_anchor(blocks: &[Block]) -> f64 {
    blocks
        .iter()
        .filter(|block| !block.is_cut_top)
        .map(|block| block.start_val)
        .min_by(f64::total_cmp)
        .map_or(DEFAULT_ANCHOR_HOUR, |earliest| (earliest - 1.0).max(0.0))
}

/// Converts an anchor hour to a vertical scroll offset in pixels.
pub fn scroll_offset(anchor_hour: f64) -> f64 {
    anchor_hour * PIXELS_PER_HOUR
}

/// Where a week view should scroll once it has settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTarget {
    /// Monday of the week the target was computed for.
    pub week_start: NaiveDate,
    pub anchor_hour: f64,
    pub offset_px: f64,
}

impl ScrollTarget {
    /// Computes the target for the blocks of `window`.
    pub fn for_blocks(window: WeekWindow, blocks: &[Block]) -> Self {
        let anchor_hour = compute_scroll_anchor(blocks);
        Self {
            week_start: window.start(),
            anchor_hour,
            offset_px: scroll_offset(anchor_hour),
        }
    }
}

/// Runs at most one deferred scroll at a time.
///
/// Scheduling aborts the scroll still pending from the previous computation, so a
/// stale target never fires after a newer one was requested. Dropping the scheduler
/// cancels the pending scroll. Must be used inside a tokio runtime.
#[derive(Debug)]
pub struct ScrollScheduler {
    settle: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Default for ScrollScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

impl ScrollScheduler {
    /// Creates a scheduler firing `settle` after each request.
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            pending: None,
        }
    }

    /// Schedules `on_fire(target)` after the settle delay, superseding any pending scroll.
    pub fn schedule<F>(&mut self, target: ScrollTarget, on_fire: F)
    where
        F: FnOnce(ScrollTarget) + Send + 'static,
    {
        self.cancel();
        let settle = self.settle;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            on_fire(target);
        }));
    }

    /// Cancels the pending scroll, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                trace!("superseding pending scroll");
            }
            handle.abort();
        }
    }

    /// Returns true while a scheduled scroll has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ScrollScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::block::{BlockKind, BlockSource};
    use chrono::NaiveTime;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn make_block(start_val: f64, is_cut_top: bool) -> Block {
        Block {
            id: Uuid::new_v4().to_string(),
            kind: BlockKind::Event,
            day_idx: 0,
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            starts_at: NaiveTime::MIN,
            start_val,
            duration: 1.0,
            color: "#6B7280".to_string(),
            title: "Block".to_string(),
            subtitle: String::new(),
            time_text: String::new(),
            is_cut_top,
            is_cut_bottom: false,
            is_merged: false,
            associated_exam: None,
            source: BlockSource::Event {
                event_id: Uuid::new_v4(),
                list_id: None,
            },
        }
    }

    fn target(anchor_hour: f64) -> ScrollTarget {
        ScrollTarget {
            week_start: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            anchor_hour,
            offset_px: scroll_offset(anchor_hour),
        }
    }

    #[test]
    fn test_anchor_defaults_to_eight() {
        assert_eq!(compute_scroll_anchor(&[]), DEFAULT_ANCHOR_HOUR);
    }

    #[test]
    fn test_anchor_is_hour_before_earliest() {
        let blocks = vec![make_block(10.0, false), make_block(7.5, false), make_block(12.0, false)];
        assert_eq!(compute_scroll_anchor(&blocks), 6.5);
    }

    #[test]
    fn test_anchor_clamps_at_midnight() {
        let blocks = vec![make_block(0.5, false)];
        assert_eq!(compute_scroll_anchor(&blocks), 0.0);
    }

    #[test]
    fn test_anchor_ignores_cut_top_blocks() {
        let blocks = vec![make_block(0.0, true), make_block(9.0, false)];
        assert_eq!(compute_scroll_anchor(&blocks), 8.0);

        let only_continuations = vec![make_block(0.0, true)];
        assert_eq!(compute_scroll_anchor(&only_continuations), DEFAULT_ANCHOR_HOUR);
    }

    #[test]
    fn test_scroll_target_offset() {
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        let target = ScrollTarget::for_blocks(window, &[make_block(9.0, false)]);

        assert_eq!(target.anchor_hour, 8.0);
        assert_eq!(target.offset_px, 8.0 * PIXELS_PER_HOUR);
        assert_eq!(target.week_start, window.start());
    }

    #[tokio::test]
    async fn test_scheduler_fires_after_settle() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = ScrollScheduler::new(Duration::from_millis(10));

        scheduler.schedule(target(7.0), move |t| {
            let _ = tx.send(t.anchor_hour);
        });
        assert!(scheduler.is_pending());

        assert_eq!(rx.recv().await, Some(7.0));
    }

    #[tokio::test]
    async fn test_new_schedule_supersedes_pending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = ScrollScheduler::new(Duration::from_millis(20));

        let stale = tx.clone();
        scheduler.schedule(target(3.0), move |t| {
            let _ = stale.send(t.anchor_hour);
        });
        scheduler.schedule(target(9.0), move |t| {
            let _ = tx.send(t.anchor_hour);
        });

        // Both senders are gone once the live task has fired and the stale one was aborted.
        let mut fired = Vec::new();
        while let Some(anchor) = rx.recv().await {
            fired.push(anchor);
        }
        assert_eq!(fired, vec![9.0]);
    }

    #[tokio::test]
    async fn test_cancel_prevents_scroll() {
        let (tx, mut rx) = mpsc::unbounded_channel::<f64>();
        let mut scheduler = ScrollScheduler::new(Duration::from_millis(10));

        scheduler.schedule(target(5.0), move |t| {
            let _ = tx.send(t.anchor_hour);
        });
        scheduler.cancel();

        assert!(!scheduler.is_pending());
        assert_eq!(rx.recv().await, None);
    }
}
