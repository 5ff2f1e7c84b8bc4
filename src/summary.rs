use crate::calculations::cycle_bounds;
use crate::config::RetainerConfig;
use crate::error::{RetainerError, RetainerResult};
use crate::presentation::cycle_range_label;
use crate::view::{ComputedMonth, RetainerView, current_cycle_index};
use crate::year_month::YearMonth;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dashboard rollup of one billing cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub cycle_index: u32,
    /// Nominal first month of the cycle.
    pub first_month: YearMonth,
    /// Nominal last month; may not have happened yet.
    pub last_month: YearMonth,
    /// Months of this cycle present in the computed list.
    pub months_elapsed: u32,
    pub worked_minutes: i64,
    pub pool_minutes: i64,
    /// `pool_minutes - worked_minutes`; negative once the pool is overdrawn.
    pub remaining_minutes: i64,
    /// True once the cycle's settlement month has been computed.
    pub complete: bool,
    pub extra_minutes: i64,
    pub unused_minutes: i64,
}

impl CycleSummary {
    pub fn label(&self) -> String {
        cycle_range_label(self.first_month, self.last_month)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_minutes < 0
    }
}

/// Summary of the cycle containing `today`, aggregated over the whole cycle.
pub fn summarize_current_cycle(
    months: &[ComputedMonth],
    config: &RetainerConfig,
    today: NaiveDate,
) -> RetainerResult<CycleSummary> {
    let start = config.start_month()?;
    let current = YearMonth::from_date(today).ok_or(RetainerError::DateOutOfRange(today))?;
    let index = current_cycle_index(start, current, config);
    summarize_cycle(months, config, index)
}

pub fn summarize_cycle(
    months: &[ComputedMonth],
    config: &RetainerConfig,
    cycle_index: u32,
) -> RetainerResult<CycleSummary> {
    let start = config.start_month()?;
    let (first_month, last_month) = cycle_bounds(start, cycle_index, config)?;

    let mut months_elapsed = 0u32;
    let mut worked_minutes = 0i64;
    let mut settlement: Option<&ComputedMonth> = None;
    for month in months.iter().filter(|m| m.cycle_index == cycle_index) {
        months_elapsed += 1;
        worked_minutes = worked_minutes.saturating_add(month.worked_minutes);
        if month.settles {
            settlement = Some(month);
        }
    }

    let pool_minutes = config.cycle_pool_minutes();
    Ok(CycleSummary {
        cycle_index,
        first_month,
        last_month,
        months_elapsed,
        worked_minutes,
        pool_minutes,
        remaining_minutes: pool_minutes.saturating_sub(worked_minutes),
        complete: settlement.is_some(),
        extra_minutes: settlement.map_or(0, |m| m.extra_minutes),
        unused_minutes: settlement.map_or(0, |m| m.unused_minutes),
    })
}

/// One summary per cycle present in `months`, oldest first.
pub fn summarize_cycles(
    months: &[ComputedMonth],
    config: &RetainerConfig,
) -> RetainerResult<Vec<CycleSummary>> {
    let indexes: BTreeSet<u32> = months.iter().map(|m| m.cycle_index).collect();
    indexes
        .into_iter()
        .map(|index| summarize_cycle(months, config, index))
        .collect()
}

impl RetainerView {
    /// Summary of the cycle this view considers current.
    pub fn current_cycle_summary(&self) -> &CycleSummary {
        &self.current_cycle
    }

    pub fn cycle_summaries(&self) -> &[CycleSummary] {
        &self.cycles
    }
}
