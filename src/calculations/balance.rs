use crate::calculations::cycle::position_of;
use crate::calculations::partition::MonthBucket;
use crate::config::RetainerConfig;
use crate::view::{ComputedMonth, MonthPeriod};
use crate::year_month::YearMonth;

/// Single chronological pass that carries the running balance between months
/// and settles it on the last month of each cycle.
pub struct BalancePass<'a> {
    config: &'a RetainerConfig,
    start: YearMonth,
}

impl<'a> BalancePass<'a> {
    pub fn new(config: &'a RetainerConfig, start: YearMonth) -> Self {
        Self { config, start }
    }

    /// `buckets` must be in ascending month order, as produced by
    /// [`partition_by_month`](crate::calculations::partition::partition_by_month).
    pub fn execute(&self, buckets: Vec<MonthBucket>) -> Vec<ComputedMonth> {
        let included = self.config.included_minutes_per_month;
        let mut running_balance: i64 = 0;
        let mut cycle_worked: i64 = 0;
        let mut months = Vec::with_capacity(buckets.len());

        for bucket in buckets {
            let position = position_of(bucket.year_month, self.start, self.config);
            let starts_cycle = position.month_in_cycle == 1;
            if starts_cycle {
                running_balance = 0;
                cycle_worked = 0;
            }

            let start_balance = if self.config.rollover_enabled {
                running_balance
            } else {
                0
            };
            let available_minutes = start_balance.saturating_add(included);
            let worked_minutes = bucket
                .records
                .iter()
                .fold(0i64, |total, r| total.saturating_add(r.duration_minutes));
            let end_balance = available_minutes.saturating_sub(worked_minutes);
            cycle_worked = cycle_worked.saturating_add(worked_minutes);

            let (extra_minutes, unused_minutes) = if position.settles {
                running_balance = 0;
                (end_balance.min(0).saturating_neg(), end_balance.max(0))
            } else {
                running_balance = end_balance;
                (0, 0)
            };

            months.push(ComputedMonth {
                year_month: bucket.year_month,
                period: MonthPeriod::of(bucket.year_month),
                cycle_index: position.cycle_index,
                month_in_cycle: position.month_in_cycle,
                start_balance,
                available_minutes,
                worked_minutes,
                end_balance,
                extra_minutes,
                unused_minutes,
                settles: position.settles,
                cycle_worked_minutes_to_date: cycle_worked,
                tasks: bucket.records,
            });
        }
        months
    }
}
