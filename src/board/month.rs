use chrono::{Datelike, Local, Month, NaiveDate};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Number of days in `month` of `year`, i.e. the last valid day number.
///
/// Computed as the day before the first of the following month, so leap
/// years fall out of chrono's calendar. Months outside chrono's supported
/// range have no days.
pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let next = if month.number_from_month() == 12 {
        year.checked_add(1).map(|next_year| (next_year, 1))
    } else {
        Some((year, month.number_from_month() + 1))
    };

    next
        .and_then(|(next_year, next_month)| NaiveDate::from_ymd_opt(next_year, next_month, 1))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(0, |last| last.day())
}

/// Weekday index of the first of the month, 0 = Sunday.
pub fn first_weekday_offset(month: &Month, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .map_or(0, |first| first.weekday().num_days_from_sunday())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(u32),
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(day) => Some(*day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    /// Month `ordinal` months after January of year 0, saturating at the
    /// first and last month representable with an `i32` year.
    fn from_ordinal(ordinal: i64) -> Self {
        match i32::try_from(ordinal.div_euclid(12)) {
            Ok(year) => MonthIndex {
                index: MONTHS[ordinal.rem_euclid(12) as usize],
                year,
            },
            Err(_) if ordinal < 0 => MonthIndex::new(Month::January, i32::MIN),
            Err(_) => MonthIndex::new(Month::December, i32::MAX),
        }
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + self.index.number_from_month() as i64 - 1
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next(&self) -> Self {
        *self + 1
    }

    pub fn prev(&self) -> Self {
        *self - 1
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    pub fn offset(&self) -> u32 {
        first_weekday_offset(&self.index, self.year)
    }

    pub fn contains_day(&self, day: u32) -> bool {
        day >= 1 && day <= self.num_days()
    }

    /// Leading blanks for the weekday of the 1st followed by one cell per day.
    pub fn cells(&self) -> Vec<GridCell> {
        std::iter::repeat(GridCell::Blank)
            .take(self.offset() as usize)
            .chain((1..=self.num_days()).map(GridCell::Day))
            .collect()
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        MonthIndex::from(Local::now().date_naive())
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(MONTHS[m.month0() as usize], m.year())
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() + rhs as i64)
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() - rhs as i64)
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index.name(), self.year)
    }
}

/// Parses `YYYY-MM`.
impl FromStr for MonthIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| {
                Error::new(ErrorKind::MonthParse, &format!("expected YYYY-MM, got '{}'", s))
            })?;
        Ok(MonthIndex::from(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> MonthIndex {
        MonthIndex::from(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    }

    #[test]
    fn days_of_every_month() {
        let expected_2023 = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, &days) in expected_2023.iter().enumerate() {
            assert_eq!(ym(2023, i as u32 + 1).num_days(), days, "month {}", i + 1);
        }
    }

    #[test]
    fn leap_years() {
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::February, 2000), 29);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
    }

    #[test]
    fn blanks_match_weekday_of_first() {
        // 2024-09-01 is a Sunday, 2024-02-01 a Thursday, 2023-07-01 a Saturday
        assert_eq!(ym(2024, 9).offset(), 0);
        assert_eq!(ym(2024, 2).offset(), 4);
        assert_eq!(ym(2023, 7).offset(), 6);

        let cells = ym(2024, 2).cells();
        assert_eq!(cells.iter().take_while(|c| **c == GridCell::Blank).count(), 4);
        assert_eq!(cells[4], GridCell::Day(1));
        assert_eq!(cells.last(), Some(&GridCell::Day(29)));
    }

    #[test]
    fn numbered_cells_match_day_count() {
        let mut month = ym(2019, 1);
        for _ in 0..120 {
            let numbered = month.cells().iter().filter_map(GridCell::day).count();
            assert_eq!(numbered as u32, month.num_days());
            month = month.next();
        }
    }

    #[test]
    fn navigation_rolls_over_years() {
        assert_eq!(ym(2023, 12).next(), ym(2024, 1));
        assert_eq!(ym(2024, 1).prev(), ym(2023, 12));
        assert_eq!(ym(2024, 5) + 20, ym(2026, 1));
        assert_eq!(ym(2024, 5) - 17, ym(2022, 12));
    }

    #[test]
    fn next_then_prev_is_identity() {
        let mut month = ym(1999, 1);
        for _ in 0..36 {
            let back = month.next().prev();
            assert_eq!(back, month);
            assert_eq!(back.num_days(), month.num_days());
            assert_eq!(back.offset(), month.offset());
            month = month.next();
        }
    }

    #[test]
    fn extreme_years_saturate_without_days() {
        let last = MonthIndex::new(Month::December, i32::MAX);
        assert_eq!(last.num_days(), 0);
        assert!(last.cells().is_empty());
        assert_eq!(last + u32::MAX, last);
        assert_eq!(last.next(), last);

        let first = MonthIndex::new(Month::January, i32::MIN);
        assert_eq!(first - u32::MAX, first);
        assert_eq!(first.prev(), first);
        assert_eq!(first.num_days(), 0);
    }

    #[test]
    fn ordering() {
        assert!(ym(2023, 12) < ym(2024, 1));
        assert!(ym(2024, 3) > ym(2024, 2));
    }

    #[test]
    fn parse_and_display() {
        let month: MonthIndex = "2024-02".parse().unwrap();
        assert_eq!(month, ym(2024, 2));
        assert_eq!(month.to_string(), "February 2024");
        assert!("2024-13".parse::<MonthIndex>().is_err());
        assert!("february".parse::<MonthIndex>().is_err());
    }
}
