mod error;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::{
    CancellationRepository, EventListRepository, EventRepository, ExamRepository,
    SemesterRepository, SnapshotRepository, SubjectRepository, TimetableRepository,
};
