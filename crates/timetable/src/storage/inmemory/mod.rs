//! In-memory storage backend.
//!
//! All records live in a single `Collections` value wrapped in `Arc<RwLock<_>>`.
//! Every successful mutation bumps the snapshot version so that memoized block sets
//! are recomputed.
//!
//! # Example
//!
//! ```rust,ignore
//! use timetable::storage::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
