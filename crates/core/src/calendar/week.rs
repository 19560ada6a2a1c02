use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::time::local_date;

/// Number of days in a week window.
pub const DAYS_PER_WEEK: usize = 7;

/// Seven consecutive dates starting on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// Returns the window for the week containing `date`.
    ///
    /// Weeks are ISO weeks: a Sunday belongs to the week that began six days earlier.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            start: date - Duration::days(offset),
        }
    }

    /// Returns the Monday that opens the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the Sunday that closes the window.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_PER_WEEK as i64 - 1)
    }

    /// Returns the seven dates of the window, Monday first.
    pub fn dates(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        std::array::from_fn(|offset| self.start + Duration::days(offset as i64))
    }

    /// Returns true if `date` lies inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Returns the day index (Monday = 0) of `date`, or `None` outside the window.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            Some((date - self.start).num_days() as usize)
        } else {
            None
        }
    }

    /// Returns the date of weekday `day_index` (Monday = 0) inside the window.
    ///
    /// Returns `None` when the index is not a weekday.
    pub fn date_for(&self, day_index: u8) -> Option<NaiveDate> {
        if usize::from(day_index) < DAYS_PER_WEEK {
            Some(self.start + Duration::days(i64::from(day_index)))
        } else {
            None
        }
    }

    /// Returns the window shifted by `weeks` whole weeks.
    pub fn shifted(&self, weeks: i64) -> Self {
        Self {
            start: self.start + Duration::weeks(weeks),
        }
    }
}

/// The visible week together with the day highlighted in single-day views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekNavigator {
    window: WeekWindow,
    selected: NaiveDate,
}

impl WeekNavigator {
    /// Opens the week containing `date` with `date` selected.
    pub fn at(date: NaiveDate) -> Self {
        Self {
            window: WeekWindow::containing(date),
            selected: date,
        }
    }

    /// Opens the current week with today selected.
    pub fn today() -> Self {
        Self::at(local_date(Utc::now()))
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Selects a day. Selecting outside the window moves the window along.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        if !self.window.contains(date) {
            self.window = WeekWindow::containing(date);
        }
    }

    /// Moves forward one week, keeping the selected weekday.
    pub fn next_week(&mut self) {
        self.shift(1);
    }

    /// Moves back one week, keeping the selected weekday.
    pub fn prev_week(&mut self) {
        self.shift(-1);
    }

    /// Resets the window and selection to `today`.
    pub fn go_to_today_at(&mut self, today: NaiveDate) {
        *self = Self::at(today);
    }

    /// Resets the window and selection to the current local date.
    pub fn go_to_today(&mut self) {
        *self = Self::today();
    }

    fn shift(&mut self, weeks: i64) {
        self.window = self.window.shifted(weeks);
        self.selected += Duration::weeks(weeks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_window_starts_on_monday() {
        let window = WeekWindow::containing(make_date(2026, 3, 11)); // Wednesday

        assert_eq!(window.start(), make_date(2026, 3, 9));
        assert_eq!(window.end(), make_date(2026, 3, 15));
        assert_eq!(window.dates()[0], make_date(2026, 3, 9));
        assert_eq!(window.dates()[6], make_date(2026, 3, 15));
    }

    #[test]
    fn test_sunday_belongs_to_previous_monday() {
        let window = WeekWindow::containing(make_date(2026, 3, 15)); // Sunday
        assert_eq!(window.start(), make_date(2026, 3, 9));

        let window = WeekWindow::containing(make_date(2026, 3, 9)); // Monday
        assert_eq!(window.start(), make_date(2026, 3, 9));
    }

    #[test]
    fn test_window_across_year_boundary() {
        let window = WeekWindow::containing(make_date(2027, 1, 1)); // Friday

        assert_eq!(window.start(), make_date(2026, 12, 28));
        assert_eq!(window.day_index(make_date(2027, 1, 3)), Some(6));
    }

    #[test]
    fn test_day_index_and_date_for() {
        let window = WeekWindow::containing(make_date(2026, 3, 9));

        assert_eq!(window.day_index(make_date(2026, 3, 10)), Some(1));
        assert_eq!(window.day_index(make_date(2026, 3, 8)), None);
        assert_eq!(window.day_index(make_date(2026, 3, 16)), None);
        assert_eq!(window.date_for(4), Some(make_date(2026, 3, 13)));
        assert_eq!(window.date_for(7), None);
    }

    #[test]
    fn test_navigation_keeps_selected_weekday() {
        let mut nav = WeekNavigator::at(make_date(2026, 3, 12)); // Thursday

        nav.next_week();
        assert_eq!(nav.window().start(), make_date(2026, 3, 16));
        assert_eq!(nav.selected(), make_date(2026, 3, 19));

        nav.prev_week();
        nav.prev_week();
        assert_eq!(nav.window().start(), make_date(2026, 3, 2));
        assert_eq!(nav.selected(), make_date(2026, 3, 5));
    }

    #[test]
    fn test_go_to_today_resets_both() {
        let mut nav = WeekNavigator::at(make_date(2026, 3, 12));
        nav.next_week();
        nav.next_week();

        nav.go_to_today_at(make_date(2026, 10, 18));

        assert_eq!(nav.selected(), make_date(2026, 10, 18));
        assert_eq!(nav.window().start(), make_date(2026, 10, 12));
    }

    #[test]
    fn test_select_outside_window_moves_window() {
        let mut nav = WeekNavigator::at(make_date(2026, 3, 12));

        nav.select(make_date(2026, 3, 14));
        assert_eq!(nav.window().start(), make_date(2026, 3, 9));

        nav.select(make_date(2026, 3, 24));
        assert_eq!(nav.window().start(), make_date(2026, 3, 23));
    }
}
