use async_trait::async_trait;
use uuid::Uuid;

use crate::calendar::{
    Cancellation, Collections, CustomEvent, EventList, Exam, ScheduleEntry, Semester, Subject,
};

use super::Result;

/// Read side of the data store: one consistent snapshot of every collection.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Returns the latest snapshot. Its `version` changes after every mutation.
    async fn snapshot(&self) -> Result<Collections>;
}

/// Repository for semester operations.
#[async_trait]
pub trait SemesterRepository: Send + Sync {
    /// Creates a new semester.
    async fn create_semester(&self, semester: &Semester) -> Result<()>;

    /// Updates an existing semester.
    async fn update_semester(&self, semester: &Semester) -> Result<()>;

    /// Deletes a semester together with its subjects.
    async fn delete_semester(&self, id: Uuid) -> Result<()>;

    /// Marks one semester as current and clears the flag on every other.
    async fn set_current_semester(&self, id: Uuid) -> Result<()>;
}

/// Repository for subjects and their weekly slots.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Creates or replaces a subject together with all of its slots.
    ///
    /// Slots the subject had before and that are not in `entries` are removed.
    async fn save_subject(&self, subject: &Subject, entries: &[ScheduleEntry]) -> Result<()>;

    /// Deletes a subject with its slots, their cancellations, and its exams.
    async fn delete_subject(&self, id: Uuid) -> Result<()>;
}

/// Repository for exam operations.
#[async_trait]
pub trait ExamRepository: Send + Sync {
    /// Creates a new exam.
    async fn create_exam(&self, exam: &Exam) -> Result<()>;

    /// Updates an existing exam.
    async fn update_exam(&self, exam: &Exam) -> Result<()>;

    /// Deletes an exam by its ID.
    async fn delete_exam(&self, id: Uuid) -> Result<()>;
}

/// Repository for event lists.
#[async_trait]
pub trait EventListRepository: Send + Sync {
    /// Creates a new event list.
    async fn create_event_list(&self, list: &EventList) -> Result<()>;

    /// Deletes an event list. Its events stay, no longer attached to any list.
    async fn delete_event_list(&self, id: Uuid) -> Result<()>;
}

/// Repository for custom event operations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Creates a new custom event.
    async fn create_event(&self, event: &CustomEvent) -> Result<()>;

    /// Updates an existing custom event.
    async fn update_event(&self, event: &CustomEvent) -> Result<()>;

    /// Deletes a custom event by its ID.
    async fn delete_event(&self, id: Uuid) -> Result<()>;
}

/// Repository for per-occurrence cancellations of schedule entries.
#[async_trait]
pub trait CancellationRepository: Send + Sync {
    /// Cancels one occurrence. Cancelling twice is a no-op.
    async fn add_cancellation(&self, cancellation: &Cancellation) -> Result<()>;

    /// Restores a cancelled occurrence.
    async fn remove_cancellation(&self, cancellation: &Cancellation) -> Result<()>;
}

/// Every capability of the data store.
pub trait TimetableRepository:
    SnapshotRepository
    + SemesterRepository
    + SubjectRepository
    + ExamRepository
    + EventListRepository
    + EventRepository
    + CancellationRepository
{
}

impl<T> TimetableRepository for T where
    T: SnapshotRepository
        + SemesterRepository
        + SubjectRepository
        + ExamRepository
        + EventListRepository
        + EventRepository
        + CancellationRepository
{
}
