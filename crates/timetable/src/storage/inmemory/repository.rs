//! In-memory repository implementation.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use timetable_core::calendar::{
    Cancellation, Collections, CustomEvent, EventList, Exam, ScheduleEntry, Semester, Subject,
};
use timetable_core::storage::{
    CancellationRepository, EventListRepository, EventRepository, ExamRepository,
    RepositoryError, Result, SemesterRepository, SnapshotRepository, SubjectRepository,
};

/// In-memory storage backend.
///
/// Data is not persisted by itself; see `storage::file` for loading and saving the
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `collections`.
    pub fn from_collections(collections: Collections) -> Self {
        Self {
            collections: Arc::new(RwLock::new(collections)),
        }
    }

    /// Applies `change` under the write lock and bumps the version if it succeeds.
    async fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Collections) -> Result<()> + Send,
    {
        let mut collections = self.collections.write().await;
        change(&mut collections)?;
        collections.version += 1;
        Ok(())
    }
}

fn not_found(entity_type: &'static str, id: impl ToString) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}

fn already_exists(entity_type: &'static str, id: impl ToString) -> RepositoryError {
    RepositoryError::AlreadyExists {
        entity_type,
        id: id.to_string(),
    }
}

fn mark_current(semesters: &mut [Semester], id: Uuid) {
    for semester in semesters {
        semester.is_current = semester.id == id;
    }
}

fn ensure_subject(collections: &Collections, id: Uuid) -> Result<()> {
    if collections.subjects.iter().any(|s| s.id == id) {
        Ok(())
    } else {
        Err(not_found("Subject", id))
    }
}

fn ensure_list(collections: &Collections, id: Option<Uuid>) -> Result<()> {
    match id {
        Some(id) if !collections.event_lists.iter().any(|l| l.id == id) => {
            Err(not_found("EventList", id))
        }
        _ => Ok(()),
    }
}

/// Removes subjects matching `doomed` along with their slots, cancellations and exams.
fn remove_subjects(collections: &mut Collections, doomed: &HashSet<Uuid>) {
    let entry_ids: HashSet<Uuid> = collections
        .schedule_entries
        .iter()
        .filter(|entry| doomed.contains(&entry.subject_id))
        .map(|entry| entry.id)
        .collect();

    collections.subjects.retain(|s| !doomed.contains(&s.id));
    collections
        .schedule_entries
        .retain(|e| !entry_ids.contains(&e.id));
    collections
        .cancellations
        .retain(|c| !entry_ids.contains(&c.entry_id));
    collections.exams.retain(|e| !doomed.contains(&e.subject_id));
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn snapshot(&self) -> Result<Collections> {
        let collections = self.collections.read().await;
        Ok(collections.clone())
    }
}

#[async_trait]
impl SemesterRepository for InMemoryRepository {
    async fn create_semester(&self, semester: &Semester) -> Result<()> {
        self.mutate(|c| {
            if c.semesters.iter().any(|s| s.id == semester.id) {
                return Err(already_exists("Semester", semester.id));
            }
            c.semesters.push(semester.clone());
            if semester.is_current {
                mark_current(&mut c.semesters, semester.id);
            }
            Ok(())
        })
        .await
    }

    async fn update_semester(&self, semester: &Semester) -> Result<()> {
        self.mutate(|c| {
            let slot = c
                .semesters
                .iter_mut()
                .find(|s| s.id == semester.id)
                .ok_or_else(|| not_found("Semester", semester.id))?;
            *slot = semester.clone();
            if semester.is_current {
                mark_current(&mut c.semesters, semester.id);
            }
            Ok(())
        })
        .await
    }

    async fn delete_semester(&self, id: Uuid) -> Result<()> {
        self.mutate(|c| {
            let before = c.semesters.len();
            c.semesters.retain(|s| s.id != id);
            if c.semesters.len() == before {
                return Err(not_found("Semester", id));
            }
            let doomed: HashSet<Uuid> = c
                .subjects
                .iter()
                .filter(|s| s.semester_id == id)
                .map(|s| s.id)
                .collect();
            remove_subjects(c, &doomed);
            Ok(())
        })
        .await
    }

    async fn set_current_semester(&self, id: Uuid) -> Result<()> {
        self.mutate(|c| {
            if !c.semesters.iter().any(|s| s.id == id) {
                return Err(not_found("Semester", id));
            }
            mark_current(&mut c.semesters, id);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl SubjectRepository for InMemoryRepository {
    async fn save_subject(&self, subject: &Subject, entries: &[ScheduleEntry]) -> Result<()> {
        self.mutate(|c| {
            if let Some(entry) = entries.iter().find(|e| e.subject_id != subject.id) {
                return Err(RepositoryError::InvalidData(format!(
                    "schedule entry {} belongs to subject {}, not {}",
                    entry.id, entry.subject_id, subject.id
                )));
            }

            if !c.semesters.iter().any(|s| s.id == subject.semester_id) {
                return Err(not_found("Semester", subject.semester_id));
            }

            match c.subjects.iter_mut().find(|s| s.id == subject.id) {
                Some(existing) => *existing = subject.clone(),
                None => c.subjects.push(subject.clone()),
            }

            let kept: HashSet<Uuid> = entries.iter().map(|e| e.id).collect();
            let dropped: HashSet<Uuid> = c
                .schedule_entries
                .iter()
                .filter(|e| e.subject_id == subject.id && !kept.contains(&e.id))
                .map(|e| e.id)
                .collect();
            c.schedule_entries
                .retain(|e| e.subject_id != subject.id);
            c.schedule_entries.extend(entries.iter().cloned());
            c.cancellations
                .retain(|cancel| !dropped.contains(&cancel.entry_id));
            Ok(())
        })
        .await
    }

    async fn delete_subject(&self, id: Uuid) -> Result<()> {
        self.mutate(|c| {
            if !c.subjects.iter().any(|s| s.id == id) {
                return Err(not_found("Subject", id));
            }
            remove_subjects(c, &HashSet::from([id]));
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ExamRepository for InMemoryRepository {
    async fn create_exam(&self, exam: &Exam) -> Result<()> {
        self.mutate(|c| {
            if c.exams.iter().any(|e| e.id == exam.id) {
                return Err(already_exists("Exam", exam.id));
            }
            ensure_subject(c, exam.subject_id)?;
            c.exams.push(exam.clone());
            Ok(())
        })
        .await
    }

    async fn update_exam(&self, exam: &Exam) -> Result<()> {
        self.mutate(|c| {
            ensure_subject(c, exam.subject_id)?;
            let slot = c
                .exams
                .iter_mut()
                .find(|e| e.id == exam.id)
                .ok_or_else(|| not_found("Exam", exam.id))?;
            *slot = exam.clone();
            Ok(())
        })
        .await
    }

    async fn delete_exam(&self, id: Uuid) -> Result<()> {
        self.mutate(|c| {
            let before = c.exams.len();
            c.exams.retain(|e| e.id != id);
            if c.exams.len() == before {
                return Err(not_found("Exam", id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl EventListRepository for InMemoryRepository {
    async fn create_event_list(&self, list: &EventList) -> Result<()> {
        self.mutate(|c| {
            if c.event_lists.iter().any(|l| l.id == list.id) {
                return Err(already_exists("EventList", list.id));
            }
            c.event_lists.push(list.clone());
            Ok(())
        })
        .await
    }

    async fn delete_event_list(&self, id: Uuid) -> Result<()> {
        self.mutate(|c| {
            let before = c.event_lists.len();
            c.event_lists.retain(|l| l.id != id);
            if c.event_lists.len() == before {
                return Err(not_found("EventList", id));
            }
            for event in c.custom_events.iter_mut().filter(|e| e.list_id == Some(id)) {
                event.list_id = None;
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn create_event(&self, event: &CustomEvent) -> Result<()> {
        self.mutate(|c| {
            if c.custom_events.iter().any(|e| e.id == event.id) {
                return Err(already_exists("CustomEvent", event.id));
            }
            ensure_list(c, event.list_id)?;
            c.custom_events.push(event.clone());
            Ok(())
        })
        .await
    }

    async fn update_event(&self, event: &CustomEvent) -> Result<()> {
        self.mutate(|c| {
            ensure_list(c, event.list_id)?;
            let slot = c
                .custom_events
                .iter_mut()
                .find(|e| e.id == event.id)
                .ok_or_else(|| not_found("CustomEvent", event.id))?;
            *slot = event.clone();
            Ok(())
        })
        .await
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        self.mutate(|c| {
            let before = c.custom_events.len();
            c.custom_events.retain(|e| e.id != id);
            if c.custom_events.len() == before {
                return Err(not_found("CustomEvent", id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CancellationRepository for InMemoryRepository {
    async fn add_cancellation(&self, cancellation: &Cancellation) -> Result<()> {
        self.mutate(|c| {
            if !c.schedule_entries.iter().any(|e| e.id == cancellation.entry_id) {
                return Err(not_found("ScheduleEntry", cancellation.entry_id));
            }
            if !c.cancellations.contains(cancellation) {
                c.cancellations.push(*cancellation);
            }
            Ok(())
        })
        .await
    }

    async fn remove_cancellation(&self, cancellation: &Cancellation) -> Result<()> {
        self.mutate(|c| {
            let before = c.cancellations.len();
            c.cancellations.retain(|existing| existing != cancellation);
            if c.cancellations.len() == before {
                return Err(not_found(
                    "Cancellation",
                    format!("{}@{}", cancellation.entry_id, cancellation.date),
                ));
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use timetable_core::calendar::SubjectDraft;

    fn make_date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    async fn seeded() -> (InMemoryRepository, Semester, Subject, ScheduleEntry) {
        let repo = InMemoryRepository::new();
        let semester = Semester::new("Spring").current();
        let subject = Subject::new(semester.id, "Algebra", "#3B82F6");
        let entry = ScheduleEntry::new(subject.id, 0, make_time(8, 0), make_time(9, 30));

        repo.create_semester(&semester).await.unwrap();
        repo.save_subject(&subject, std::slice::from_ref(&entry))
            .await
            .unwrap();
        (repo, semester, subject, entry)
    }

    #[tokio::test]
    async fn test_mutations_bump_version() {
        let (repo, _, subject, _) = seeded().await;
        assert_eq!(repo.snapshot().await.unwrap().version, 2);

        let exam = Exam::new(subject.id, make_date(9), "Midterm");
        repo.create_exam(&exam).await.unwrap();
        assert_eq!(repo.snapshot().await.unwrap().version, 3);

        // Failed mutations leave the version alone.
        assert!(repo.create_exam(&exam).await.is_err());
        assert_eq!(repo.snapshot().await.unwrap().version, 3);
    }

    #[tokio::test]
    async fn test_set_current_semester_is_exclusive() {
        let (repo, spring, _, _) = seeded().await;
        let fall = Semester::new("Fall");
        repo.create_semester(&fall).await.unwrap();

        repo.set_current_semester(fall.id).await.unwrap();

        let snapshot = repo.snapshot().await.unwrap();
        assert_eq!(snapshot.current_semester().map(|s| s.id), Some(fall.id));
        assert_eq!(snapshot.semesters.iter().filter(|s| s.is_current).count(), 1);
        assert!(!snapshot
            .semesters
            .iter()
            .any(|s| s.id == spring.id && s.is_current));

        let result = repo.set_current_semester(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_save_subject_replaces_slots() {
        let (repo, _, subject, entry) = seeded().await;
        repo.add_cancellation(&Cancellation::new(entry.id, make_date(9)))
            .await
            .unwrap();

        let replacement = ScheduleEntry::new(subject.id, 2, make_time(10, 0), make_time(11, 0));
        repo.save_subject(&subject, std::slice::from_ref(&replacement))
            .await
            .unwrap();

        let snapshot = repo.snapshot().await.unwrap();
        assert_eq!(snapshot.subjects.len(), 1);
        assert_eq!(snapshot.schedule_entries, vec![replacement]);
        assert!(snapshot.cancellations.is_empty());
    }

    #[tokio::test]
    async fn test_rename_keeps_cancellations() {
        let (repo, _, subject, entry) = seeded().await;
        let cancellation = Cancellation::new(entry.id, make_date(9));
        repo.add_cancellation(&cancellation).await.unwrap();

        let snapshot = repo.snapshot().await.unwrap();
        let mut draft = SubjectDraft::from_subject(&subject, &snapshot.schedule_entries);
        draft.name = "Linear Algebra".to_string();
        let (renamed, entries) = draft.into_records().unwrap();
        repo.save_subject(&renamed, &entries).await.unwrap();

        let snapshot = repo.snapshot().await.unwrap();
        assert_eq!(snapshot.subjects[0].name, "Linear Algebra");
        assert_eq!(snapshot.schedule_entries[0].id, entry.id);
        assert_eq!(snapshot.cancellations, vec![cancellation]);
    }

    #[tokio::test]
    async fn test_save_subject_rejects_foreign_slots() {
        let (repo, _, subject, _) = seeded().await;
        let foreign = ScheduleEntry::new(Uuid::new_v4(), 1, make_time(8, 0), make_time(9, 0));

        let result = repo.save_subject(&subject, &[foreign]).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_delete_semester_cascades() {
        let (repo, semester, subject, entry) = seeded().await;
        repo.create_exam(&Exam::new(subject.id, make_date(9), "Midterm"))
            .await
            .unwrap();
        repo.add_cancellation(&Cancellation::new(entry.id, make_date(9)))
            .await
            .unwrap();

        repo.delete_semester(semester.id).await.unwrap();

        let snapshot = repo.snapshot().await.unwrap();
        assert!(snapshot.semesters.is_empty());
        assert!(snapshot.subjects.is_empty());
        assert!(snapshot.schedule_entries.is_empty());
        assert!(snapshot.exams.is_empty());
        assert!(snapshot.cancellations.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_toggle() {
        let (repo, _, _, entry) = seeded().await;
        let cancellation = Cancellation::new(entry.id, make_date(9));

        repo.add_cancellation(&cancellation).await.unwrap();
        repo.add_cancellation(&cancellation).await.unwrap();
        assert_eq!(repo.snapshot().await.unwrap().cancellations.len(), 1);

        repo.remove_cancellation(&cancellation).await.unwrap();
        assert!(repo.snapshot().await.unwrap().cancellations.is_empty());
        assert!(repo.remove_cancellation(&cancellation).await.is_err());

        let unknown = Cancellation::new(Uuid::new_v4(), make_date(9));
        assert!(matches!(
            repo.add_cancellation(&unknown).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_references_must_exist() {
        let (repo, _, _, _) = seeded().await;

        let orphan_exam = Exam::new(Uuid::new_v4(), make_date(9), "Final");
        assert!(matches!(
            repo.create_exam(&orphan_exam).await,
            Err(RepositoryError::NotFound { entity_type: "Subject", .. })
        ));

        let orphan_subject = Subject::new(Uuid::new_v4(), "Chemistry", "#10B981");
        assert!(matches!(
            repo.save_subject(&orphan_subject, &[]).await,
            Err(RepositoryError::NotFound { entity_type: "Semester", .. })
        ));

        let listed = CustomEvent::weekly("Gym", 2, make_time(7, 0), make_time(8, 0))
            .with_list(Uuid::new_v4());
        assert!(matches!(
            repo.create_event(&listed).await,
            Err(RepositoryError::NotFound { entity_type: "EventList", .. })
        ));
    }

    #[tokio::test]
    async fn test_event_crud() {
        let repo = InMemoryRepository::new();
        let mut event = CustomEvent::weekly("Gym", 2, make_time(7, 0), make_time(8, 0));

        repo.create_event(&event).await.unwrap();
        event.title = "Swimming".to_string();
        repo.update_event(&event).await.unwrap();
        assert_eq!(repo.snapshot().await.unwrap().custom_events[0].title, "Swimming");

        repo.delete_event(event.id).await.unwrap();
        assert!(repo.snapshot().await.unwrap().custom_events.is_empty());
        assert!(matches!(
            repo.delete_event(event.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_event_list_detaches_events() {
        let repo = InMemoryRepository::new();
        let list = EventList::new("Sports");
        repo.create_event_list(&list).await.unwrap();
        let gym = CustomEvent::weekly("Gym", 2, make_time(7, 0), make_time(8, 0))
            .with_list(list.id);
        repo.create_event(&gym).await.unwrap();

        assert!(matches!(
            repo.create_event_list(&list).await,
            Err(RepositoryError::AlreadyExists { .. })
        ));

        repo.delete_event_list(list.id).await.unwrap();

        let snapshot = repo.snapshot().await.unwrap();
        assert!(snapshot.event_lists.is_empty());
        assert_eq!(snapshot.custom_events.len(), 1);
        assert_eq!(snapshot.custom_events[0].list_id, None);
        assert_eq!(snapshot.version, 3);
        assert!(matches!(
            repo.delete_event_list(list.id).await,
            Err(RepositoryError::NotFound { entity_type: "EventList", .. })
        ));
    }
}
