use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, serialized as `YYYY-MM`.
///
/// Ordering is chronological, which matches lexicographic ordering of the
/// `YYYY-MM` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first: NaiveDate,
    last: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid year-month '{input}' (expected YYYY-MM)")]
pub struct ParseYearMonthError {
    input: String,
}

impl ParseYearMonthError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { first, last })
    }

    /// Truncates a date to its month. `None` only at the edge of chrono's range.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn succ(&self) -> Option<Self> {
        self.plus_months(1)
    }

    pub fn plus_months(&self, months: u32) -> Option<Self> {
        let shifted = self.first.checked_add_months(Months::new(months))?;
        Self::from_date(shifted)
    }

    /// Signed number of months from `earlier` to `self` (0 for the same month).
    pub fn months_since(&self, earlier: &YearMonth) -> i64 {
        let years = i64::from(self.year()) - i64::from(earlier.year());
        years * 12 + i64::from(self.month()) - i64::from(earlier.month())
    }

    /// Every month from `start` through `end`, inclusive. Empty when `end < start`.
    pub fn range_inclusive(start: YearMonth, end: YearMonth) -> impl Iterator<Item = YearMonth> {
        std::iter::successors(Some(start), |month| month.succ()).take_while(move |m| *m <= end)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year_part, month_part) = trimmed
            .split_once('-')
            .ok_or_else(|| ParseYearMonthError::new(s))?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(ParseYearMonthError::new(s));
        }
        if !all_digits(year_part) || !all_digits(month_part) {
            return Err(ParseYearMonthError::new(s));
        }
        let year: i32 = year_part.parse().map_err(|_| ParseYearMonthError::new(s))?;
        let month: u32 = month_part.parse().map_err(|_| ParseYearMonthError::new(s))?;
        Self::new(year, month).ok_or_else(|| ParseYearMonthError::new(s))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ParseYearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
