//! The materialization pipeline: records + week window + filters -> blocks.
//!
//! Classes and exams are expanded first and merged, then custom events are appended.
//! The output order is classes, exams, events, each in record order. The pipeline is
//! total: records that cannot be placed are skipped, never reported as errors.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::NaiveDate;
use lru::LruCache;
use tracing::debug;
use uuid::Uuid;

use super::block::Block;
use super::classes::expand_classes;
use super::events::expand_events;
use super::exams::expand_exams;
use super::merge::merge_exams;
use super::operations::{cancelled_occurrences, index_subjects};
use super::types::{Collections, EventList, Filters, Subject};
use super::week::WeekWindow;

/// Lookups shared by the expanders during one pass.
#[derive(Debug)]
pub struct ExpansionContext<'a> {
    pub window: WeekWindow,
    pub filters: &'a Filters,
    subjects: HashMap<Uuid, &'a Subject>,
    lists: HashMap<Uuid, &'a EventList>,
    cancelled: HashSet<(Uuid, NaiveDate)>,
}

impl<'a> ExpansionContext<'a> {
    pub fn new(collections: &'a Collections, window: WeekWindow, filters: &'a Filters) -> Self {
        Self {
            window,
            filters,
            subjects: index_subjects(&collections.subjects),
            lists: collections
                .event_lists
                .iter()
                .map(|list| (list.id, list))
                .collect(),
            cancelled: cancelled_occurrences(&collections.cancellations),
        }
    }

    pub fn subject(&self, id: Uuid) -> Option<&'a Subject> {
        self.subjects.get(&id).copied()
    }

    pub fn list(&self, id: Uuid) -> Option<&'a EventList> {
        self.lists.get(&id).copied()
    }

    /// Returns true if the occurrence of `entry_id` on `date` was cancelled.
    pub fn is_cancelled(&self, entry_id: Uuid, date: NaiveDate) -> bool {
        self.cancelled.contains(&(entry_id, date))
    }
}

/// Computes every block of `window`.
pub fn materialize(collections: &Collections, window: WeekWindow, filters: &Filters) -> Vec<Block> {
    let ctx = ExpansionContext::new(collections, window, filters);

    let mut classes = expand_classes(&collections.schedule_entries, &ctx);
    let mut exams = expand_exams(&collections.exams, &ctx);
    let merged = merge_exams(&mut classes, &mut exams);
    let events = expand_events(&collections.custom_events, &ctx);

    debug!(
        week_start = %window.start(),
        classes = classes.len(),
        exams = exams.len(),
        merged,
        events = events.len(),
        "materialized week"
    );

    let mut blocks = classes;
    blocks.extend(exams);
    blocks.extend(events);
    blocks
}

/// Identifies one materialization input.
///
/// Relies on the data store bumping `Collections::version` on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterializeKey {
    pub version: u64,
    pub week_start: NaiveDate,
    pub filters: Filters,
}

impl MaterializeKey {
    pub fn new(collections: &Collections, window: WeekWindow, filters: &Filters) -> Self {
        Self {
            version: collections.version,
            week_start: window.start(),
            filters: filters.clone(),
        }
    }
}

/// Memoizes recent materializations with LRU eviction.
#[derive(Debug)]
pub struct MaterializeCache {
    store: LruCache<MaterializeKey, Arc<[Block]>>,
}

impl MaterializeCache {
    /// Creates a cache holding up to `max_entries` block sets (at least one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: LruCache::new(capacity),
        }
    }

    /// Returns the block set for the input, computing it on a miss.
    pub fn get_or_materialize(
        &mut self,
        collections: &Collections,
        window: WeekWindow,
        filters: &Filters,
    ) -> Arc<[Block]> {
        let key = MaterializeKey::new(collections, window, filters);
        if let Some(blocks) = self.store.get(&key) {
            return Arc::clone(blocks);
        }

        let blocks: Arc<[Block]> = materialize(collections, window, filters).into();
        self.store.put(key, Arc::clone(&blocks));
        blocks
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drops every memoized block set.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}
