//! Record mutations: semesters, subjects, exams, event lists, events and cancellations.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use timetable_core::calendar::{
    generate_demo_timetable, local_date, Cancellation, Collections, CreateEventListRequest,
    CreateEventRequest, CreateExamRequest, CreateSemesterRequest, EventScheduleRequest,
    SubjectDraft, UpdateEventRequest, UpdateExamRequest,
};
use timetable_core::storage::{
    CancellationRepository, EventListRepository, EventRepository, ExamRepository,
    RepositoryError, SemesterRepository, SnapshotRepository, SubjectRepository,
};

use super::Printer;
use crate::cli::events::EventsAction;
use crate::cli::exams::ExamsAction;
use crate::cli::lists::ListsAction;
use crate::cli::semesters::SemestersAction;
use crate::cli::subjects::SubjectsAction;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::pretty;
use crate::storage::{load_collections, save_collections, InMemoryRepository};

fn open(config: &Config) -> Result<InMemoryRepository> {
    let collections = load_collections(&config.data_path)?;
    Ok(InMemoryRepository::from_collections(collections))
}

async fn persist(config: &Config, repo: &InMemoryRepository) -> Result<()> {
    let collections = repo.snapshot().await?;
    save_collections(&config.data_path, &collections)
}

fn not_found(entity_type: &'static str, id: Uuid) -> CliError {
    RepositoryError::NotFound {
        entity_type,
        id: id.to_string(),
    }
    .into()
}

pub fn seed(
    config: &Config,
    printer: Printer,
    date: Option<NaiveDate>,
    empty: bool,
    force: bool,
) -> Result<()> {
    let path = &config.data_path;
    if path.exists() && !force {
        return Err(CliError::DataFileExists(path.display().to_string()));
    }

    if empty {
        save_collections(path, &Collections::default())?;
        info!(path = %path.display(), "created empty timetable");
        printer.note(format!("Created empty timetable at {}", path.display()));
        return Ok(());
    }

    let anchor = date.unwrap_or_else(|| local_date(Utc::now()));
    let collections = generate_demo_timetable(anchor);
    save_collections(path, &collections)?;
    info!(path = %path.display(), week_of = %anchor, "seeded demo timetable");

    printer.note(format!(
        "Seeded {} with {} subjects, {} exams and {} events",
        path.display(),
        collections.subjects.len(),
        collections.exams.len(),
        collections.custom_events.len()
    ));
    Ok(())
}

pub async fn semesters(config: &Config, printer: Printer, action: SemestersAction) -> Result<()> {
    let repo = open(config)?;

    match action {
        SemestersAction::List => {
            let collections = repo.snapshot().await?;
            printer.emit(&collections.semesters, |s| pretty::format_semesters(s));
            return Ok(());
        }
        SemestersAction::Add { name, current } => {
            let semester = CreateSemesterRequest {
                name,
                is_current: current,
            }
            .into_semester()?;
            repo.create_semester(&semester).await?;
            info!(id = %semester.id, "created semester");
            printer.emit(&semester, |s| {
                format!("Created:\n{}", pretty::format_semester(s))
            });
        }
        SemestersAction::Current { id } => {
            repo.set_current_semester(id).await?;
            info!(%id, "changed current semester");
            printer.note(format!("Semester {} is now current", id));
        }
        SemestersAction::Delete { id } => {
            repo.delete_semester(id).await?;
            info!(%id, "deleted semester");
            printer.note(format!("Deleted semester {}", id));
        }
    }

    persist(config, &repo).await
}

pub async fn subjects(config: &Config, printer: Printer, action: SubjectsAction) -> Result<()> {
    let repo = open(config)?;

    match action {
        SubjectsAction::List => {
            let collections = repo.snapshot().await?;
            printer.emit(&collections, pretty::format_subjects);
            return Ok(());
        }
        SubjectsAction::Add {
            semester_id,
            name,
            color,
            valid_from,
            valid_until,
            slots,
        } => {
            let mut draft = SubjectDraft::new(semester_id, name, color);
            draft.valid_from = valid_from;
            draft.valid_until = valid_until;
            let draft = slots
                .into_iter()
                .fold(draft, |draft, slot| draft.with_slot(slot));

            let (subject, entries) = draft.into_records()?;
            repo.save_subject(&subject, &entries).await?;
            info!(id = %subject.id, slots = entries.len(), "created subject");
            printer.note(format!("Created subject {} ({})", subject.name, subject.id));
        }
        SubjectsAction::Edit {
            id,
            name,
            color,
            mut remove_slots,
            slots,
        } => {
            let collections = repo.snapshot().await?;
            let subject = collections
                .subjects
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| not_found("Subject", id))?;

            let mut draft = SubjectDraft::from_subject(subject, &collections.schedule_entries);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(color) = color {
                draft.color = color;
            }
            // Highest index first so earlier positions stay valid.
            remove_slots.sort_unstable_by(|a, b| b.cmp(a));
            remove_slots.dedup();
            for index in remove_slots {
                draft = draft.without_slot(index)?;
            }
            let draft = slots
                .into_iter()
                .fold(draft, |draft, slot| draft.with_slot(slot));

            let (subject, entries) = draft.into_records()?;
            repo.save_subject(&subject, &entries).await?;
            info!(id = %subject.id, slots = entries.len(), "updated subject");
            printer.note(format!("Updated subject {} ({})", subject.name, subject.id));
        }
        SubjectsAction::Delete { id } => {
            repo.delete_subject(id).await?;
            info!(%id, "deleted subject");
            printer.note(format!("Deleted subject {}", id));
        }
    }

    persist(config, &repo).await
}

pub async fn exams(config: &Config, printer: Printer, action: ExamsAction) -> Result<()> {
    let repo = open(config)?;

    match action {
        ExamsAction::List => {
            let collections = repo.snapshot().await?;
            printer.emit(&collections.exams, |e| pretty::format_exams(e));
            return Ok(());
        }
        ExamsAction::Add {
            subject_id,
            date,
            time,
            title,
        } => {
            let exam = CreateExamRequest {
                subject_id,
                date,
                time,
                title,
            }
            .into_exam()?;
            repo.create_exam(&exam).await?;
            info!(id = %exam.id, "created exam");
            printer.emit(&exam, |e| format!("Created:\n{}", pretty::format_exam(e)));
        }
        ExamsAction::Update {
            id,
            date,
            time,
            title,
        } => {
            let collections = repo.snapshot().await?;
            let exam = collections
                .exams
                .iter()
                .find(|e| e.id == id)
                .ok_or_else(|| not_found("Exam", id))?;

            let updated = UpdateExamRequest { date, time, title }.apply_to(exam)?;
            repo.update_exam(&updated).await?;
            info!(%id, "updated exam");
            printer.emit(&updated, |e| format!("Updated:\n{}", pretty::format_exam(e)));
        }
        ExamsAction::Delete { id } => {
            repo.delete_exam(id).await?;
            info!(%id, "deleted exam");
            printer.note(format!("Deleted exam {}", id));
        }
    }

    persist(config, &repo).await
}

pub async fn events(config: &Config, printer: Printer, action: EventsAction) -> Result<()> {
    let repo = open(config)?;

    let request = match action {
        EventsAction::List => {
            let collections = repo.snapshot().await?;
            printer.emit(&collections.custom_events, |e| pretty::format_events(e));
            return Ok(());
        }
        EventsAction::Update {
            id,
            title,
            start_time,
            end_time,
            list_id,
            color,
        } => {
            let collections = repo.snapshot().await?;
            let event = collections
                .custom_events
                .iter()
                .find(|e| e.id == id)
                .ok_or_else(|| not_found("CustomEvent", id))?;

            let updated = UpdateEventRequest {
                title,
                list_id,
                color,
                start_time,
                end_time,
            }
            .apply_to(event)?;
            repo.update_event(&updated).await?;
            info!(%id, "updated event");
            printer.emit(&updated, |e| format!("Updated:\n{}", pretty::format_event(e)));
            return persist(config, &repo).await;
        }
        EventsAction::Delete { id } => {
            repo.delete_event(id).await?;
            info!(%id, "deleted event");
            printer.note(format!("Deleted event {}", id));
            return persist(config, &repo).await;
        }
        EventsAction::AddOnce {
            title,
            date,
            end_date,
            start_time,
            end_time,
            list_id,
            color,
        } => CreateEventRequest {
            title,
            list_id,
            color,
            start_time,
            end_time,
            schedule: EventScheduleRequest::Once {
                start_date: date,
                end_date,
            },
        },
        EventsAction::AddWeekly {
            title,
            day,
            start_time,
            end_time,
            valid_from,
            valid_until,
            list_id,
            color,
        } => CreateEventRequest {
            title,
            list_id,
            color,
            start_time,
            end_time,
            schedule: EventScheduleRequest::Weekly {
                day_of_week: day,
                valid_from,
                valid_until,
            },
        },
    };

    let event = request.into_event()?;
    repo.create_event(&event).await?;
    info!(id = %event.id, recurring = event.is_recurring, "created event");
    printer.emit(&event, |e| format!("Created:\n{}", pretty::format_event(e)));
    persist(config, &repo).await
}

pub async fn lists(config: &Config, printer: Printer, action: ListsAction) -> Result<()> {
    let repo = open(config)?;

    match action {
        ListsAction::List => {
            let collections = repo.snapshot().await?;
            printer.emit(&collections.event_lists, |l| pretty::format_lists(l));
            return Ok(());
        }
        ListsAction::Add { name, color } => {
            let list = CreateEventListRequest { name, color }.into_list()?;
            repo.create_event_list(&list).await?;
            info!(id = %list.id, "created event list");
            printer.emit(&list, |l| format!("Created:\n{}", pretty::format_list(l)));
        }
        ListsAction::Delete { id } => {
            repo.delete_event_list(id).await?;
            info!(%id, "deleted event list");
            printer.note(format!("Deleted event list {}", id));
        }
    }

    persist(config, &repo).await
}

pub async fn cancel(
    config: &Config,
    printer: Printer,
    entry_id: Uuid,
    date: NaiveDate,
    undo: bool,
) -> Result<()> {
    let repo = open(config)?;
    let cancellation = Cancellation::new(entry_id, date);

    if undo {
        repo.remove_cancellation(&cancellation).await?;
        info!(%entry_id, %date, "restored occurrence");
        printer.note(format!("Restored {} on {}", entry_id, date));
    } else {
        repo.add_cancellation(&cancellation).await?;
        info!(%entry_id, %date, "cancelled occurrence");
        printer.note(format!("Cancelled {} on {}", entry_id, date));
    }

    persist(config, &repo).await
}
