use thiserror::Error;

/// Errors that can occur when validating records before they reach the data store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name too long (max 100 characters)")]
    NameTooLong,
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Invalid color format: {0}")]
    InvalidColor(String),
    #[error("Day of week must be between 0 (Monday) and 6 (Sunday), got {0}")]
    InvalidDayOfWeek(u8),
    #[error("Recurring event needs a day of week")]
    MissingDayOfWeek,
    #[error("Event needs a start date")]
    MissingStartDate,
    #[error("End time must be after start time")]
    InvalidTimeRange,
    #[error("End date must be after or equal to start date")]
    InvalidDateRange,
    #[error("Slot index {index} out of range (draft has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },
}
