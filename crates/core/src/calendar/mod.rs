mod agenda;
mod block;
mod classes;
mod error;
mod events;
mod exams;
mod materialize;
mod merge;
mod mock_data;
mod operations;
mod requests;
mod scroll;
mod time;
mod types;
mod week;

pub use agenda::project_agenda;
pub use block::{associated_exam, find_block, Block, BlockKind, BlockSource};
pub use classes::expand_classes;
pub use error::EntityError;
pub use events::{expand_events, slice_day, DaySlice, DEFAULT_EVENT_COLOR};
pub use exams::{exam_time, expand_exams, DEFAULT_EXAM_TIME, EXAM_DURATION_HOURS};
pub use materialize::{materialize, ExpansionContext, MaterializeCache, MaterializeKey};
pub use merge::{is_same_slot, merge_exams};
pub use mock_data::generate_demo_timetable;
pub use operations::{
    cancelled_occurrences, event_selected, index_subjects, subject_selected,
    validate_custom_event, validate_event_list, validate_exam, validate_schedule_entry,
    validate_semester, validate_subject,
};
pub use requests::{
    CreateEventListRequest, CreateEventRequest, CreateExamRequest, CreateSemesterRequest,
    EventScheduleRequest, SlotDraft, SubjectDraft, UpdateEventRequest, UpdateExamRequest,
};
pub use scroll::{
    compute_scroll_anchor, scroll_offset, ScrollScheduler, ScrollTarget, DEFAULT_ANCHOR_HOUR,
    DEFAULT_SETTLE_DELAY, PIXELS_PER_HOUR,
};
pub use time::{
    display_end, format_hhmm, hour_value, local_date, local_date_at, local_date_key,
    truncate_to_minute, ALL_DAY_LABEL, CONTINUATION_MARK, END_OF_DAY_LABEL,
};
pub use types::{
    Cancellation, Collections, CustomEvent, EventList, Exam, Filters, ScheduleEntry, Semester,
    Subject,
};
pub use week::{WeekNavigator, WeekWindow, DAYS_PER_WEEK};
