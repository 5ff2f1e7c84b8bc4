use crate::config::RetainerConfig;
use crate::error::{RetainerError, RetainerResult};
use crate::year_month::YearMonth;
use serde::{Deserialize, Serialize};

/// Where a month sits within its billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePosition {
    pub cycle_index: u32,
    /// 1-based position within the cycle.
    pub month_in_cycle: u32,
    /// True on the last month of the cycle.
    pub settles: bool,
}

/// Cycles are anchored at the contract start month, never at calendar quarters.
pub fn cycle_position(months_since_start: u32, config: &RetainerConfig) -> CyclePosition {
    let length = config.effective_cycle_length();
    let month_in_cycle = months_since_start % length + 1;
    CyclePosition {
        cycle_index: months_since_start / length,
        month_in_cycle,
        settles: month_in_cycle == length,
    }
}

/// Position of `month` relative to `start`; months before the start clamp to the first one.
pub fn position_of(month: YearMonth, start: YearMonth, config: &RetainerConfig) -> CyclePosition {
    let offset = u32::try_from(month.months_since(&start)).unwrap_or(0);
    cycle_position(offset, config)
}

/// Nominal first and last month of a cycle. The last month may lie in the future.
pub fn cycle_bounds(
    start: YearMonth,
    cycle_index: u32,
    config: &RetainerConfig,
) -> RetainerResult<(YearMonth, YearMonth)> {
    let length = config.effective_cycle_length();
    let out_of_range = || RetainerError::CycleOutOfRange { start, cycle_index };
    let first = cycle_index
        .checked_mul(length)
        .and_then(|offset| start.plus_months(offset))
        .ok_or_else(out_of_range)?;
    let last = first.plus_months(length - 1).ok_or_else(out_of_range)?;
    Ok((first, last))
}
