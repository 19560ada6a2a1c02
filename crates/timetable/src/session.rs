//! Stateful week view over a repository.
//!
//! Holds the navigator, the active filters and the memo cache so repeated reads of the
//! same week do not re-run the materializer. Every navigation cancels the scroll still
//! pending for the previous week.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::oneshot;
use tracing::debug;

use timetable_core::calendar::{
    project_agenda, Block, Filters, MaterializeCache, ScrollScheduler, ScrollTarget,
    WeekNavigator, WeekWindow,
};
use timetable_core::storage::TimetableRepository;

use crate::config::Config;
use crate::error::{CliError, Result};

/// A week view session bound to one repository.
pub struct ViewSession<R> {
    repo: R,
    cache: MaterializeCache,
    navigator: WeekNavigator,
    filters: Filters,
    scroller: ScrollScheduler,
}

impl<R: TimetableRepository> ViewSession<R> {
    /// Opens a session on the week containing `date`.
    pub fn new(repo: R, config: &Config, date: NaiveDate) -> Self {
        Self {
            repo,
            cache: MaterializeCache::new(config.cache_max_entries),
            navigator: WeekNavigator::at(date),
            filters: Filters::new(),
            scroller: ScrollScheduler::new(config.scroll_settle()),
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn window(&self) -> WeekWindow {
        self.navigator.window()
    }

    pub fn selected(&self) -> NaiveDate {
        self.navigator.selected()
    }

    /// Replaces the active filters. The pending scroll belongs to the old view.
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        self.scroller.cancel();
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.navigator.select(date);
        self.scroller.cancel();
    }

    pub fn next_week(&mut self) {
        self.navigator.next_week();
        self.scroller.cancel();
    }

    pub fn prev_week(&mut self) {
        self.navigator.prev_week();
        self.scroller.cancel();
    }

    /// Returns the blocks of the current week, materializing on a cache miss.
    pub async fn blocks(&mut self) -> Result<Arc<[Block]>> {
        let collections = self.repo.snapshot().await?;
        let window = self.navigator.window();
        let blocks = self
            .cache
            .get_or_materialize(&collections, window, &self.filters);
        debug!(
            week_start = %window.start(),
            version = collections.version,
            blocks = blocks.len(),
            cached = self.cache.len(),
            "week blocks ready"
        );
        Ok(blocks)
    }

    /// Returns the selected day's blocks in start order.
    pub async fn agenda(&mut self) -> Result<Vec<Block>> {
        let blocks = self.blocks().await?;
        Ok(project_agenda(
            &blocks,
            self.navigator.selected(),
            self.navigator.window(),
        ))
    }

    /// Computes the scroll target of the current week without scheduling it.
    pub async fn scroll_target(&mut self) -> Result<ScrollTarget> {
        let blocks = self.blocks().await?;
        Ok(ScrollTarget::for_blocks(self.navigator.window(), &blocks))
    }

    /// Schedules `on_fire` for the current week's scroll target, superseding any
    /// pending scroll.
    pub async fn schedule_scroll<F>(&mut self, on_fire: F) -> Result<ScrollTarget>
    where
        F: FnOnce(ScrollTarget) + Send + 'static,
    {
        let target = self.scroll_target().await?;
        self.scroller.schedule(target, on_fire);
        Ok(target)
    }

    /// Schedules the scroll and waits for it to fire.
    ///
    /// Fails with [`CliError::ScrollCancelled`] if the scroll is superseded or the
    /// session is dropped first.
    pub async fn settle_scroll(&mut self) -> Result<ScrollTarget> {
        let (tx, rx) = oneshot::channel();
        self.schedule_scroll(move |target| {
            let _ = tx.send(target);
        })
        .await?;
        rx.await.map_err(|_| CliError::ScrollCancelled)
    }

    pub fn is_scroll_pending(&self) -> bool {
        self.scroller.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;
    use chrono::NaiveTime;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use timetable_core::calendar::{generate_demo_timetable, BlockKind, ScheduleEntry};
    use timetable_core::storage::{SnapshotRepository, SubjectRepository};

    fn make_date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn test_config() -> Config {
        Config {
            data_path: PathBuf::from("unused.json"),
            cache_max_entries: 4,
            scroll_settle_ms: 10,
        }
    }

    fn demo_session() -> ViewSession<InMemoryRepository> {
        let repo = InMemoryRepository::from_collections(generate_demo_timetable(make_date(11)));
        ViewSession::new(repo, &test_config(), make_date(11))
    }

    #[tokio::test]
    async fn test_blocks_follow_navigation() {
        let mut session = demo_session();

        let this_week = session.blocks().await.unwrap();
        assert!(this_week.iter().any(|b| b.kind == BlockKind::Exam));

        session.next_week();
        let next_week = session.blocks().await.unwrap();
        assert_eq!(session.window().start(), make_date(16));
        assert!(next_week.iter().all(|b| b.kind != BlockKind::Exam));

        session.prev_week();
        let again = session.blocks().await.unwrap();
        assert!(Arc::ptr_eq(&this_week, &again));
    }

    #[tokio::test]
    async fn test_mutation_invalidates_cache() {
        let mut session = demo_session();
        let before = session.blocks().await.unwrap();

        let snapshot = session.repo().snapshot().await.unwrap();
        let subject = snapshot.subjects[2].clone();
        let mut entries: Vec<_> = snapshot
            .schedule_entries
            .iter()
            .filter(|e| e.subject_id == subject.id)
            .cloned()
            .collect();
        let time = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        entries.push(ScheduleEntry::new(subject.id, 6, time(9), time(10)));
        session.repo().save_subject(&subject, &entries).await.unwrap();

        let after = session.blocks().await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
    }

    #[tokio::test]
    async fn test_agenda_for_selected_day() {
        let mut session = demo_session();
        session.select(make_date(9));

        let agenda = session.agenda().await.unwrap();

        assert!(!agenda.is_empty());
        assert!(agenda.iter().all(|b| b.date == make_date(9)));
        assert!(agenda
            .windows(2)
            .all(|pair| pair[0].start_val <= pair[1].start_val));
    }

    #[tokio::test]
    async fn test_settle_scroll_fires() {
        let mut session = demo_session();

        let target = session.settle_scroll().await.unwrap();

        // The hiking trip leaves at 06:00 on Saturday.
        assert_eq!(target.anchor_hour, 5.0);
        assert_eq!(target.week_start, make_date(9));
        assert!(!session.is_scroll_pending());
    }

    #[tokio::test]
    async fn test_navigation_cancels_pending_scroll() {
        let mut session = demo_session();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        session
            .schedule_scroll(move |_| flag.store(true, Ordering::SeqCst))
            .await
            .unwrap();
        assert!(session.is_scroll_pending());
        session.next_week();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert!(!session.is_scroll_pending());
    }

    #[tokio::test]
    async fn test_filter_change_cancels_pending_scroll() {
        let mut session = demo_session();
        let all = session.blocks().await.unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        session
            .schedule_scroll(move |_| flag.store(true, Ordering::SeqCst))
            .await
            .unwrap();
        let list_id = session.repo().snapshot().await.unwrap().event_lists[0].id;
        session.set_filters(Filters::new().with_lists([list_id]));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert!(!session.is_scroll_pending());

        let filtered = session.blocks().await.unwrap();
        assert!(filtered.len() < all.len());
        assert!(filtered.iter().all(|b| b.title != "Hiking Trip"));
    }
}
