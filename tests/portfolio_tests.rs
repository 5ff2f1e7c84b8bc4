use agency_flow::{
    ConfigError, ProjectInput, RetainerConfig, RetainerError, RetainerFilters, TimeRecord,
    compute_portfolio_at, compute_retainer_view_at,
};
use chrono::NaiveDate;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project(id: &str, config: RetainerConfig, minutes: &[i64]) -> ProjectInput {
    let records = minutes
        .iter()
        .enumerate()
        .map(|(i, m)| {
            TimeRecord::new(
                format!("{id}-{i}"),
                format!("2025-{:02}-05", i + 1),
                "Work",
                *m,
                "dev",
                "Development",
            )
        })
        .collect();
    ProjectInput {
        project_id: id.to_string(),
        config,
        records,
    }
}

#[test]
fn projects_with_different_cycle_lengths_compute_side_by_side() {
    let start = d(2025, 1, 1);
    let projects = vec![
        project(
            "quarterly",
            RetainerConfig::new(600, start).with_rollover(true),
            &[300, 900, 1000],
        ),
        project(
            "bimonthly",
            RetainerConfig::new(600, start)
                .with_rollover(true)
                .with_cycle_length(2),
            &[300, 900, 1000],
        ),
        project("broken", RetainerConfig::new(-1, start), &[60]),
        project("monthly", RetainerConfig::new(600, start), &[700]),
    ];
    let today = d(2025, 3, 31);
    let results = compute_portfolio_at(&projects, &RetainerFilters::none(), today);

    let ids: Vec<&str> = results.iter().map(|r| r.project_id.as_str()).collect();
    assert_eq!(ids, vec!["quarterly", "bimonthly", "broken", "monthly"]);

    let quarterly = results[0].result.as_ref().unwrap();
    assert_eq!(quarterly.months[2].extra_minutes, 400);

    let bimonthly = results[1].result.as_ref().unwrap();
    let settles: Vec<bool> = bimonthly.months.iter().map(|m| m.settles).collect();
    assert_eq!(settles, vec![false, true, false]);
    assert_eq!(bimonthly.months[1].extra_minutes, 0);
    assert_eq!(bimonthly.months[1].unused_minutes, 0);
    assert_eq!(bimonthly.months[2].end_balance, -400);

    assert_eq!(
        results[2].result.as_ref().unwrap_err(),
        &RetainerError::InvalidConfig(ConfigError::NegativeIncludedMinutes(-1))
    );

    for (input, output) in projects.iter().zip(&results) {
        if let Ok(view) = &output.result {
            let single = compute_retainer_view_at(
                &input.records,
                &input.config,
                &RetainerFilters::none(),
                today,
            )
            .unwrap();
            assert_eq!(view, &single);
        }
    }
}
