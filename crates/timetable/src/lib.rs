//! timetable - Weekly student timetable shell around `timetable_core`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::{CliError, Result};
pub use session::ViewSession;
