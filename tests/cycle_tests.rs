use agency_flow::presentation::cycle_range_label;
use agency_flow::{
    RetainerConfig, RetainerFilters, TimeRecord, YearMonth, compute_retainer_view_at,
    summarize_current_cycle,
};
use chrono::NaiveDate;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn rec(date: &str, minutes: i64) -> TimeRecord {
    TimeRecord::new("task-1", date, "Work", minutes, "dev", "Development")
}

#[test]
fn cycles_are_anchored_at_contract_start_not_quarters() {
    let config = RetainerConfig::new(600, d(2025, 2, 15)).with_rollover(true);
    let view =
        compute_retainer_view_at(&[], &config, &RetainerFilters::none(), d(2025, 8, 10)).unwrap();

    let layout: Vec<(String, u32, u32)> = view
        .months
        .iter()
        .map(|m| (m.year_month.to_string(), m.cycle_index, m.month_in_cycle))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("2025-02".to_string(), 0, 1),
            ("2025-03".to_string(), 0, 2),
            ("2025-04".to_string(), 0, 3),
            ("2025-05".to_string(), 1, 1),
            ("2025-06".to_string(), 1, 2),
            ("2025-07".to_string(), 1, 3),
            ("2025-08".to_string(), 2, 1),
        ]
    );
    let settling: Vec<String> = view
        .months
        .iter()
        .filter(|m| m.settles)
        .map(|m| m.year_month.to_string())
        .collect();
    assert_eq!(settling, vec!["2025-04", "2025-07"]);
    assert_eq!(view.current_cycle_index, 2);
}

#[test]
fn current_cycle_summary_aggregates_whole_cycle() {
    let config = RetainerConfig::new(600, d(2025, 4, 1)).with_rollover(true);
    let records = vec![
        rec("2025-03-30", 999),
        rec("2025-04-02", 400),
        rec("2025-05-06", 500),
    ];
    let today = d(2025, 5, 20);
    let view =
        compute_retainer_view_at(&records, &config, &RetainerFilters::none(), today).unwrap();

    let summary = view.current_cycle_summary();
    assert_eq!(summary.cycle_index, 0);
    assert_eq!(summary.first_month, ym(2025, 4));
    assert_eq!(summary.last_month, ym(2025, 6));
    assert_eq!(summary.months_elapsed, 2);
    assert_eq!(summary.worked_minutes, 900);
    assert_eq!(summary.pool_minutes, 1800);
    assert_eq!(summary.remaining_minutes, 900);
    assert!(!summary.complete);
    assert_eq!(summary.label(), "Apr – Jun 2025");

    let same = summarize_current_cycle(&view.months, &config, today).unwrap();
    assert_eq!(&same, summary);
}

#[test]
fn overdrawn_cycle_reports_negative_remaining() {
    let config = RetainerConfig::new(600, d(2025, 1, 1)).with_rollover(true);
    let records = vec![rec("2025-01-10", 1500), rec("2025-02-10", 700)];
    let view =
        compute_retainer_view_at(&records, &config, &RetainerFilters::none(), d(2025, 2, 15))
            .unwrap();

    let summary = view.current_cycle_summary();
    assert_eq!(summary.remaining_minutes, -400);
    assert!(summary.is_over_budget());
}

#[test]
fn cycle_label_spans_year_change() {
    let config = RetainerConfig::new(600, d(2025, 11, 1)).with_rollover(true);
    let view =
        compute_retainer_view_at(&[], &config, &RetainerFilters::none(), d(2026, 1, 15)).unwrap();

    let summary = view.current_cycle_summary();
    assert_eq!(summary.label(), "Nov 2025 – Jan 2026");
    assert!(summary.complete);
    assert_eq!(summary.unused_minutes, 1800);
}

#[test]
fn range_labels() {
    assert_eq!(cycle_range_label(ym(2025, 4), ym(2025, 4)), "Apr 2025");
    assert_eq!(cycle_range_label(ym(2025, 4), ym(2025, 6)), "Apr – Jun 2025");
    assert_eq!(
        cycle_range_label(ym(2024, 12), ym(2025, 2)),
        "Dec 2024 – Feb 2025"
    );
}

#[test]
fn without_rollover_the_current_cycle_is_the_current_month() {
    let config = RetainerConfig::new(600, d(2025, 1, 1));
    let records = vec![rec("2025-03-04", 250)];
    let view =
        compute_retainer_view_at(&records, &config, &RetainerFilters::none(), d(2025, 3, 20))
            .unwrap();

    assert_eq!(view.current_cycle_index, 2);
    let summary = view.current_cycle_summary();
    assert_eq!(summary.label(), "Mar 2025");
    assert_eq!(summary.pool_minutes, 600);
    assert_eq!(summary.worked_minutes, 250);
    assert_eq!(summary.remaining_minutes, 350);
    assert!(summary.complete);
}

#[test]
fn cycle_history_lists_every_cycle() {
    let config = RetainerConfig::new(600, d(2025, 1, 1)).with_rollover(true);
    let records = vec![rec("2025-02-10", 2000), rec("2025-05-10", 100)];
    let view =
        compute_retainer_view_at(&records, &config, &RetainerFilters::none(), d(2025, 5, 31))
            .unwrap();

    let history = view.cycle_summaries();
    assert_eq!(history.len(), 2);
    assert!(history[0].complete);
    assert_eq!(history[0].extra_minutes, 200);
    assert_eq!(history[0].worked_minutes, 2000);
    assert!(!history[1].complete);
    assert_eq!(history[1].label(), "Apr – Jun 2025");
    assert_eq!(history[1].worked_minutes, 100);
}

#[test]
fn project_not_started_has_no_months() {
    let config = RetainerConfig::new(600, d(2025, 6, 1)).with_rollover(true);
    let records = vec![rec("2025-05-10", 60)];
    let view =
        compute_retainer_view_at(&records, &config, &RetainerFilters::none(), d(2025, 5, 20))
            .unwrap();
    assert!(view.months.is_empty());
    assert_eq!(view.current_cycle_index, 0);
}

#[test]
fn month_range_filter_leaves_cycle_summaries_unchanged() {
    let config = RetainerConfig::new(600, d(2025, 4, 1)).with_rollover(true);
    let records = vec![rec("2025-04-02", 400), rec("2025-05-06", 500)];
    let today = d(2025, 5, 20);
    let full =
        compute_retainer_view_at(&records, &config, &RetainerFilters::none(), today).unwrap();

    let from_may = RetainerFilters::none().with_range(Some(ym(2025, 5)), None);
    let filtered = compute_retainer_view_at(&records, &config, &from_may, today).unwrap();
    assert_eq!(filtered.months.len(), 1);
    assert_eq!(filtered.current_cycle_summary(), full.current_cycle_summary());
    assert_eq!(filtered.current_cycle_summary().worked_minutes, 900);
    assert_eq!(filtered.current_cycle_summary().remaining_minutes, 900);
    assert_eq!(filtered.current_cycle_summary().months_elapsed, 2);

    let before_cycle = RetainerFilters::none().with_range(None, Some(ym(2025, 3)));
    let empty = compute_retainer_view_at(&records, &config, &before_cycle, today).unwrap();
    assert!(empty.months.is_empty());
    assert_eq!(empty.current_cycle_summary().worked_minutes, 900);
    assert_eq!(empty.cycle_summaries(), full.cycle_summaries());
}

#[test]
fn settled_cycle_keeps_its_totals_when_range_cuts_into_it() {
    let config = RetainerConfig::new(600, d(2025, 1, 1)).with_rollover(true);
    let records = vec![rec("2025-01-10", 1200), rec("2025-03-10", 1000)];
    let only_march = RetainerFilters::none().with_range(Some(ym(2025, 3)), Some(ym(2025, 3)));
    let view = compute_retainer_view_at(&records, &config, &only_march, d(2025, 4, 15)).unwrap();

    let first = &view.cycle_summaries()[0];
    assert!(first.complete);
    assert_eq!(first.months_elapsed, 3);
    assert_eq!(first.worked_minutes, 2200);
    assert_eq!(first.extra_minutes, 400);
    assert_eq!(view.current_cycle_summary().cycle_index, 1);
}
