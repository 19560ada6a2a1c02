//! Data store backends.
//!
//! The in-memory repository holds one `Collections` snapshot and implements every
//! repository trait of `timetable_core::storage`. The file module loads that snapshot
//! from, and saves it back to, a JSON file so that changes survive between runs.

pub mod file;
pub mod inmemory;

pub use file::{load_collections, save_collections};
pub use inmemory::InMemoryRepository;
