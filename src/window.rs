use chrono::{Datelike, Months, NaiveDate};

/// Date-window policy for calendar APIs that accept a start/end range but
/// refuse ranges spanning more than one calendar year.
///
/// Which policy a site wants is a per-source configuration decision, so the
/// sources that page by date take a `DateWindow` in their constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// January 1 through December 31 of the current year.
    CurrentYear,
    /// A window of whole months around today, split per calendar year.
    Months { back: u32, forward: u32 },
}

impl DateWindow {
    /// Inclusive sub-ranges covering the window, one per calendar year
    /// touched. Degenerate ranges produced by the year split are skipped.
    pub fn ranges(&self, today: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
        let (from, to) = match *self {
            DateWindow::CurrentYear => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap(),
            ),
            DateWindow::Months { back, forward } => {
                let from = today
                    .checked_sub_months(Months::new(back))
                    .unwrap_or(today);
                let to = today
                    .checked_add_months(Months::new(forward))
                    .unwrap_or(today);
                (from, to)
            }
        };

        let mut ranges = Vec::new();
        for year in from.year()..=to.year() {
            let year_start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
            let year_end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
            let lo = from.max(year_start);
            let hi = to.min(year_end);
            if lo <= hi {
                ranges.push((lo, hi));
            }
        }
        ranges
    }
}
