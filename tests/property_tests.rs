use agency_flow::{
    RetainerConfig, RetainerFilters, TimeRecord, YearMonth, compute_retainer_view_at,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn start() -> YearMonth {
    YearMonth::new(2024, 1).unwrap()
}

/// One record per month on the first day, starting at 2024-01.
fn records_for(worked: &[i64]) -> Vec<TimeRecord> {
    worked
        .iter()
        .enumerate()
        .map(|(i, minutes)| {
            let month = start().plus_months(i as u32).unwrap();
            TimeRecord::new(
                format!("task-{i}"),
                format!("{month}-01"),
                "Work",
                *minutes,
                "dev",
                "Development",
            )
        })
        .collect()
}

fn today_for(months: usize) -> NaiveDate {
    start().plus_months(months as u32 - 1).unwrap().last_day()
}

proptest! {
    #[test]
    fn settlement_conserves_minutes(
        worked in prop::collection::vec(0i64..3000, 1..13),
        included in 0i64..2400,
        cycle_length in 1u32..5,
    ) {
        let config = RetainerConfig::new(included, start().first_day())
            .with_rollover(true)
            .with_cycle_length(cycle_length);
        let view = compute_retainer_view_at(
            &records_for(&worked),
            &config,
            &RetainerFilters::none(),
            today_for(worked.len()),
        )
        .unwrap();
        prop_assert_eq!(view.months.len(), worked.len());

        for settlement in view.months.iter().filter(|m| m.settles) {
            let cycle_worked: i64 = view
                .months
                .iter()
                .filter(|m| m.cycle_index == settlement.cycle_index)
                .map(|m| m.worked_minutes)
                .sum();
            let pool = included * i64::from(cycle_length);
            prop_assert_eq!(
                cycle_worked - pool,
                settlement.extra_minutes - settlement.unused_minutes
            );
            prop_assert_eq!(settlement.cycle_worked_minutes_to_date, cycle_worked);
        }
        for month in view.months.iter().filter(|m| !m.settles) {
            prop_assert_eq!(month.extra_minutes, 0);
            prop_assert_eq!(month.unused_minutes, 0);
        }
    }

    #[test]
    fn without_rollover_no_balance_carries(
        worked in prop::collection::vec(0i64..3000, 1..13),
        included in 0i64..2400,
    ) {
        let config = RetainerConfig::new(included, start().first_day());
        let view = compute_retainer_view_at(
            &records_for(&worked),
            &config,
            &RetainerFilters::none(),
            today_for(worked.len()),
        )
        .unwrap();

        for (month, minutes) in view.months.iter().zip(&worked) {
            prop_assert!(month.settles);
            prop_assert_eq!(month.start_balance, 0);
            prop_assert_eq!(month.end_balance, included - minutes);
            prop_assert_eq!(month.extra_minutes, (minutes - included).max(0));
            prop_assert_eq!(month.unused_minutes, (included - minutes).max(0));
        }
    }
}
