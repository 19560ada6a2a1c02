//! timetable_core - Functional core for the timetable project.
//!
//! Turns persisted scheduling records (weekly class slots, exams, custom events and
//! cancellations) into the renderable blocks of one calendar week. Everything under
//! [`calendar`] is pure; [`storage`] only declares the data-store boundary.

pub mod calendar;
pub mod serde;
pub mod storage;
