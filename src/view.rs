use crate::calculations::{BalancePass, partition_by_month, position_of};
use crate::category::{Category, CategoryMinutes, category_breakdown, distinct_categories};
use crate::config::RetainerConfig;
use crate::error::{RetainerError, RetainerResult};
use crate::filters::RetainerFilters;
use crate::record::TimeRecord;
use crate::status::{StatusTag, derive_status};
use crate::summary::{CycleSummary, summarize_cycle, summarize_cycles};
use crate::year_month::YearMonth;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// First and last calendar day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthPeriod {
    pub fn of(month: YearMonth) -> Self {
        Self {
            start: month.first_day(),
            end: month.last_day(),
        }
    }
}

/// Accounting state of one calendar month. All balances are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedMonth {
    pub year_month: YearMonth,
    pub period: MonthPeriod,
    pub cycle_index: u32,
    pub month_in_cycle: u32,
    pub start_balance: i64,
    pub available_minutes: i64,
    pub worked_minutes: i64,
    pub end_balance: i64,
    pub extra_minutes: i64,
    pub unused_minutes: i64,
    pub settles: bool,
    /// Worked minutes of this month's cycle up to and including this month.
    pub cycle_worked_minutes_to_date: i64,
    pub tasks: Vec<TimeRecord>,
}

impl ComputedMonth {
    pub fn status(&self) -> StatusTag {
        derive_status(self)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryMinutes> {
        category_breakdown(&self.tasks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainerView {
    /// Chronological, oldest first.
    pub months: Vec<ComputedMonth>,
    pub current_cycle_index: u32,
    /// Rollup of the current cycle over every computed month, ignoring the
    /// month-range filter.
    pub current_cycle: CycleSummary,
    /// Every cycle from the start month through today, oldest first. Like
    /// `current_cycle`, independent of the month-range filter.
    pub cycles: Vec<CycleSummary>,
    pub config: RetainerConfig,
    pub categories: Vec<Category>,
}

impl RetainerView {
    pub fn months_most_recent_first(&self) -> impl Iterator<Item = &ComputedMonth> {
        self.months.iter().rev()
    }

    pub fn month(&self, year_month: YearMonth) -> Option<&ComputedMonth> {
        self.months.iter().find(|m| m.year_month == year_month)
    }

    pub fn current_cycle_months(&self) -> impl Iterator<Item = &ComputedMonth> {
        let index = self.current_cycle_index;
        self.months.iter().filter(move |m| m.cycle_index == index)
    }

    pub fn total_worked_minutes(&self) -> i64 {
        self.months
            .iter()
            .fold(0i64, |total, m| total.saturating_add(m.worked_minutes))
    }
}

/// Computes the retainer view as of today's local date.
pub fn compute_retainer_view(
    records: &[TimeRecord],
    config: &RetainerConfig,
    filters: &RetainerFilters,
) -> RetainerResult<RetainerView> {
    compute_retainer_view_at(records, config, filters, Local::now().date_naive())
}

/// Computes the retainer view with `today` bounding the active month span.
///
/// Balances and cycle summaries are always computed over the full span from
/// the start month; the month-range filter only narrows which months are
/// returned.
pub fn compute_retainer_view_at(
    records: &[TimeRecord],
    config: &RetainerConfig,
    filters: &RetainerFilters,
    today: NaiveDate,
) -> RetainerResult<RetainerView> {
    config.validate()?;
    let start = config.start_month()?;
    let current = YearMonth::from_date(today).ok_or(RetainerError::DateOutOfRange(today))?;

    let buckets = partition_by_month(records, start, current, filters);
    let mut months = BalancePass::new(config, start).execute(buckets);

    let current_cycle_index = current_cycle_index(start, current, config);
    let current_cycle = summarize_cycle(&months, config, current_cycle_index)?;
    let cycles = summarize_cycles(&months, config)?;

    if filters.has_month_range() {
        months.retain(|m| filters.includes_month(m.year_month));
    }
    debug!(
        months = months.len(),
        current_cycle_index,
        rollover = config.rollover_enabled,
        "computed retainer view"
    );

    Ok(RetainerView {
        months,
        current_cycle_index,
        current_cycle,
        cycles,
        config: config.clone(),
        categories: distinct_categories(records),
    })
}

/// Cycle containing `current`; 0 while the project has not started yet.
pub fn current_cycle_index(start: YearMonth, current: YearMonth, config: &RetainerConfig) -> u32 {
    if current < start {
        return 0;
    }
    position_of(current, start, config).cycle_index
}
