use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What produced a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Class,
    Exam,
    Event,
}

impl BlockKind {
    /// Returns the prefix used when composing block ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            BlockKind::Class => "class",
            BlockKind::Exam => "exam",
            BlockKind::Event => "event",
        }
    }
}

/// Back-reference from a block to the record(s) it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockSource {
    Class { entry_id: Uuid, subject_id: Uuid },
    Exam { exam_id: Uuid, subject_id: Uuid },
    Event { event_id: Uuid, list_id: Option<Uuid> },
}

impl BlockSource {
    /// Returns the id of the source record.
    pub fn record_id(&self) -> Uuid {
        match self {
            BlockSource::Class { entry_id, .. } => *entry_id,
            BlockSource::Exam { exam_id, .. } => *exam_id,
            BlockSource::Event { event_id, .. } => *event_id,
        }
    }

    /// Returns the subject of a class or exam block.
    pub fn subject_id(&self) -> Option<Uuid> {
        match self {
            BlockSource::Class { subject_id, .. } | BlockSource::Exam { subject_id, .. } => {
                Some(*subject_id)
            }
            BlockSource::Event { .. } => None,
        }
    }
}

/// One occurrence laid onto day/time coordinates of a week view.
///
/// Blocks are rebuilt from the stored records on every pass and never persisted.
/// Their ids are derived from the source id and date, so two passes over the same
/// input produce equal blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    /// Column of the week view, Monday = 0.
    pub day_idx: usize,
    /// The calendar date the occurrence resolved to.
    pub date: NaiveDate,
    /// Wall-clock start the occurrence was scheduled at, before any clipping.
    pub starts_at: NaiveTime,
    /// Drawn start in fractional hours (14.5 = 14:30).
    pub start_val: f64,
    /// Drawn length in hours, always positive.
    pub duration: f64,
    pub color: String,
    pub title: String,
    pub subtitle: String,
    pub time_text: String,
    /// The occurrence began on an earlier day.
    pub is_cut_top: bool,
    /// The occurrence continues on a later day.
    pub is_cut_bottom: bool,
    /// Exam drawn inside its class block instead of on its own.
    pub is_merged: bool,
    /// Id of the exam block merged into this class block.
    pub associated_exam: Option<String>,
    pub source: BlockSource,
}

impl Block {
    /// Composes the id of the block derived from `record_id` on `date`.
    pub fn compose_id(kind: BlockKind, record_id: Uuid, date: NaiveDate) -> String {
        format!("{}-{}-{}", kind.id_prefix(), record_id, date.format("%Y-%m-%d"))
    }

    /// Returns true if the block gets its own slot on the week grid.
    pub fn is_placed(&self) -> bool {
        !self.is_merged
    }
}

/// Finds a block by id.
pub fn find_block<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    blocks.iter().find(|block| block.id == id)
}

/// Returns the exam block merged into `class_block`, if any.
pub fn associated_exam<'a>(blocks: &'a [Block], class_block: &Block) -> Option<&'a Block> {
    class_block
        .associated_exam
        .as_deref()
        .and_then(|id| find_block(blocks, id))
}
