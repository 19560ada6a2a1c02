use chrono::NaiveDate;

use super::block::Block;
use super::week::WeekWindow;

/// Returns the blocks of `selected` in drawing order.
///
/// Blocks are sorted by start, keeping expansion order between equal starts.
/// A selected date outside the window yields no blocks.
pub fn project_agenda(blocks: &[Block], selected: NaiveDate, window: WeekWindow) -> Vec<Block> {
    let Some(day_idx) = window.day_index(selected) else {
        return Vec::new();
    };

    let mut day: Vec<Block> = blocks
        .iter()
        .filter(|block| block.day_idx == day_idx)
        .cloned()
        .collect();
    day.sort_by(|a, b| a.start_val.total_cmp(&b.start_val));
    day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::block::{BlockKind, BlockSource};
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn make_date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn make_block(title: &str, kind: BlockKind, day_idx: usize, start_val: f64) -> Block {
        let id = Uuid::new_v4();
        Block {
            id: title.to_string(),
            kind,
            day_idx,
            date: make_date(9 + day_idx as u32),
            starts_at: NaiveTime::MIN,
            start_val,
            duration: 1.0,
            color: "#3B82F6".to_string(),
            title: title.to_string(),
            subtitle: String::new(),
            time_text: String::new(),
            is_cut_top: false,
            is_cut_bottom: false,
            is_merged: false,
            associated_exam: None,
            source: BlockSource::Event {
                event_id: id,
                list_id: None,
            },
        }
    }

    #[test]
    fn test_agenda_filters_and_sorts() {
        let blocks = vec![
            make_block("Lab", BlockKind::Class, 1, 14.0),
            make_block("Monday", BlockKind::Class, 0, 8.0),
            make_block("Gym", BlockKind::Event, 1, 7.0),
            make_block("Quiz", BlockKind::Exam, 1, 10.5),
        ];
        let window = WeekWindow::containing(make_date(9));

        let agenda = project_agenda(&blocks, make_date(10), window);

        let titles: Vec<_> = agenda.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Gym", "Quiz", "Lab"]);
    }

    #[test]
    fn test_agenda_ties_keep_emission_order() {
        let blocks = vec![
            make_block("Class", BlockKind::Class, 2, 9.0),
            make_block("Exam", BlockKind::Exam, 2, 9.0),
            make_block("Event", BlockKind::Event, 2, 9.0),
        ];
        let window = WeekWindow::containing(make_date(9));

        let agenda = project_agenda(&blocks, make_date(11), window);

        let titles: Vec<_> = agenda.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Class", "Exam", "Event"]);
    }

    #[test]
    fn test_selected_outside_window_is_empty() {
        let blocks = vec![make_block("Lab", BlockKind::Class, 0, 14.0)];
        let window = WeekWindow::containing(make_date(9));

        assert!(project_agenda(&blocks, make_date(16), window).is_empty());
        assert!(project_agenda(&blocks, make_date(8), window).is_empty());
    }
}
