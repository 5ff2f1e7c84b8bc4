use agency_flow::category::distinct_categories;
use agency_flow::presentation::{
    cycle_range_label, explain_month, format_amount, format_minutes_as_hours, month_label,
    period_label, status_label,
};
use agency_flow::{
    CycleSummary, RetainerConfig, RetainerFilters, RetainerView, TimeRecord, YearMonth,
    compute_retainer_view_at, load_config_from_json, load_time_records_from_csv,
    load_time_records_from_json, save_months_to_csv, save_view_to_json,
};
use chrono::{Local, NaiveDate};
use std::io::{self, Write};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "AGENCY_FLOW_CONFIG";
const LOG_ENV: &str = "AGENCY_FLOW_LOG";

struct Session {
    config: RetainerConfig,
    records: Vec<TimeRecord>,
    filters: RetainerFilters,
    today: NaiveDate,
}

impl Session {
    fn view(&self) -> Option<RetainerView> {
        match compute_retainer_view_at(&self.records, &self.config, &self.filters, self.today) {
            Ok(view) => Some(view),
            Err(e) => {
                println!("Error computing view: {e}");
                None
            }
        }
    }

    /// Applies a config change, keeping the old config if the result is invalid.
    fn update_config<F>(&mut self, mutator: F)
    where
        F: FnOnce(&mut RetainerConfig),
    {
        let mut config = self.config.clone();
        mutator(&mut config);
        match config.validate() {
            Ok(()) => {
                self.config = config;
                println!("Config updated.");
            }
            Err(e) => println!("Invalid config: {e}"),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if ci < widths.len() && len > widths[ci] {
                widths[ci] = len;
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(headers, &widths));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells, &widths));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line
}

fn render_months(view: &RetainerView) -> String {
    let cycle_length = view.config.effective_cycle_length();
    let rows: Vec<Vec<String>> = view
        .months_most_recent_first()
        .map(|m| {
            let cycle = if view.config.rollover_enabled {
                format!("{} ({}/{})", m.cycle_index + 1, m.month_in_cycle, cycle_length)
            } else {
                "-".to_string()
            };
            vec![
                m.year_month.to_string(),
                cycle,
                format_minutes_as_hours(m.start_balance),
                format_minutes_as_hours(m.available_minutes),
                format_minutes_as_hours(m.worked_minutes),
                format_minutes_as_hours(m.end_balance),
                format_minutes_as_hours(m.extra_minutes),
                format_minutes_as_hours(m.unused_minutes),
                status_label(m.status().kind).to_string(),
            ]
        })
        .collect();
    render_text_table(
        &[
            "month", "cycle", "start", "available", "worked", "end", "extra", "unused", "status",
        ],
        &rows,
    )
}

fn render_cycles(summaries: &[CycleSummary]) -> String {
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .rev()
        .map(|s| {
            vec![
                (s.cycle_index + 1).to_string(),
                s.label(),
                format_minutes_as_hours(s.worked_minutes),
                format_minutes_as_hours(s.pool_minutes),
                format_minutes_as_hours(s.remaining_minutes),
                if s.complete { "settled" } else { "open" }.to_string(),
            ]
        })
        .collect();
    render_text_table(
        &["cycle", "range", "worked", "pool", "remaining", "state"],
        &rows,
    )
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  today <YYYY-MM-DD>                 Pin the date used as \"now\"\n  config show                        Show retainer config\n  config load <json_path>            Load retainer config from JSON file\n  config budget <minutes>            Set included minutes per month\n  config rollover <on|off>           Enable or disable rollover cycles\n  config start <YYYY-MM-DD>          Set contract start date\n  config rate <float>                Set overage rate per hour\n  config cycle <months>              Set rollover cycle length\n  config currency <code>             Set currency code\n  records load <json|csv> <path>     Load time records from disk\n  records count                      Count loaded time records\n  filter from <YYYY-MM>              Only show months from this month on\n  filter to <YYYY-MM>                Only show months up to this month\n  filter categories <csv>            Only count these category ids\n  filter clear                       Remove all filters\n  show                               Show computed months, most recent first\n  month <YYYY-MM>                    Explain one month with category breakdown\n  cycle                              Summarize the current cycle\n  cycles                             Summarize every cycle\n  categories                         List categories seen in the records\n  export <json|csv> <path>           Save the computed view to disk\n  quit|exit                          Exit"
    );
}

fn print_config(config: &RetainerConfig) {
    println!(
        "Included per month : {}",
        format_minutes_as_hours(config.included_minutes_per_month)
    );
    println!("Rollover           : {}", config.rollover_enabled);
    println!("Cycle length       : {}", config.cycle_length);
    println!(
        "Overage rate       : {}",
        format_amount(config.overage_rate, &config.currency)
    );
    println!("Start date         : {}", config.start_date);
}

fn print_filters(filters: &RetainerFilters) {
    let from = filters
        .year_month_start
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());
    let to = filters
        .year_month_end
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());
    let categories = filters
        .category_ids
        .as_ref()
        .map(|ids| ids.iter().cloned().collect::<Vec<_>>().join(","))
        .unwrap_or_else(|| "-".to_string());
    println!("Filters: from={from} to={to} categories={categories}");
}

fn print_cycle(summary: &CycleSummary) {
    println!("Current cycle      : {}", cycle_range_label(summary.first_month, summary.last_month));
    println!("Worked             : {}", format_minutes_as_hours(summary.worked_minutes));
    println!("Pool               : {}", format_minutes_as_hours(summary.pool_minutes));
    println!("Remaining          : {}", format_minutes_as_hours(summary.remaining_minutes));
}

fn print_month(view: &RetainerView, year_month: YearMonth) {
    let Some(month) = view.month(year_month) else {
        println!("No computed month {year_month}.");
        return;
    };
    println!("{} ({})", month_label(month.year_month), period_label(&month.period));
    println!("{}", explain_month(month, &view.config));
    for entry in month.category_breakdown() {
        println!(
            "  {:<24} {}",
            entry.category_name,
            format_minutes_as_hours(entry.minutes)
        );
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn initial_config(today: NaiveDate) -> RetainerConfig {
    let default = RetainerConfig::new(0, today);
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return default;
    };
    match load_config_from_json(&path) {
        Ok(config) => {
            debug!(%path, "loaded config from environment");
            config
        }
        Err(e) => {
            warn!(%path, error = %e, "could not load config, using defaults");
            println!("Could not load config from {path}: {e}");
            default
        }
    }
}

fn main() {
    init_tracing();
    let today = Local::now().date_naive();
    let mut session = Session {
        config: initial_config(today),
        records: Vec::new(),
        filters: RetainerFilters::none(),
        today,
    };

    println!("Agency Flow retainer (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "today" => match parts.next().and_then(parse_date) {
                Some(date) => {
                    session.today = date;
                    println!("Today set to {date}.");
                }
                None => println!("Usage: today <YYYY-MM-DD>"),
            },
            "config" => {
                let sub = parts.next().unwrap_or("");
                let arg = parts.next();
                match (sub, arg) {
                    ("show", _) => print_config(&session.config),
                    ("load", Some(path)) => match load_config_from_json(path) {
                        Ok(config) => {
                            session.config = config;
                            println!("Config loaded from {path}.");
                        }
                        Err(e) => println!("Error loading config: {e}"),
                    },
                    ("budget", Some(v)) => match v.parse::<i64>() {
                        Ok(minutes) => session
                            .update_config(|c| c.included_minutes_per_month = minutes),
                        Err(_) => println!("Invalid minutes"),
                    },
                    ("rollover", Some(v)) => match v {
                        "on" | "true" => session.update_config(|c| c.rollover_enabled = true),
                        "off" | "false" => session.update_config(|c| c.rollover_enabled = false),
                        _ => println!("Usage: config rollover <on|off>"),
                    },
                    ("start", Some(v)) => match parse_date(v) {
                        Some(date) => session.update_config(|c| c.start_date = date),
                        None => println!("Invalid date (expected YYYY-MM-DD)"),
                    },
                    ("rate", Some(v)) => match v.parse::<f64>() {
                        Ok(rate) => session.update_config(|c| c.overage_rate = rate),
                        Err(_) => println!("Invalid rate"),
                    },
                    ("cycle", Some(v)) => match v.parse::<u32>() {
                        Ok(months) => session.update_config(|c| c.cycle_length = months),
                        Err(_) => println!("Invalid cycle length"),
                    },
                    ("currency", Some(v)) => {
                        let code = v.to_string();
                        session.update_config(|c| c.currency = code)
                    }
                    _ => println!(
                        "Usage: config <show|load|budget|rollover|start|rate|cycle|currency> [value]"
                    ),
                }
            }
            "records" => {
                let sub = parts.next().unwrap_or("");
                match sub {
                    "count" => println!("{} records loaded.", session.records.len()),
                    "load" => {
                        let fmt = parts.next();
                        let path = parts.next();
                        let loaded = match (fmt, path) {
                            (Some("json"), Some(p)) => Some((p, load_time_records_from_json(p))),
                            (Some("csv"), Some(p)) => Some((p, load_time_records_from_csv(p))),
                            _ => None,
                        };
                        match loaded {
                            Some((p, Ok(records))) => {
                                println!("Loaded {} records from {p}.", records.len());
                                session.records = records;
                            }
                            Some((_, Err(e))) => println!("Error loading records: {e}"),
                            None => println!("Usage: records load <json|csv> <path>"),
                        }
                    }
                    _ => println!("Usage: records <load|count>"),
                }
            }
            "filter" => {
                let sub = parts.next().unwrap_or("");
                let arg = parts.next();
                match (sub, arg) {
                    ("from", Some(v)) => match v.parse::<YearMonth>() {
                        Ok(month) => session.filters.year_month_start = Some(month),
                        Err(e) => println!("{e}"),
                    },
                    ("to", Some(v)) => match v.parse::<YearMonth>() {
                        Ok(month) => session.filters.year_month_end = Some(month),
                        Err(e) => println!("{e}"),
                    },
                    ("categories", Some(v)) => {
                        let ids = v.split(',').map(str::trim).filter(|s| !s.is_empty());
                        session.filters = session.filters.clone().with_categories(ids);
                    }
                    ("clear", _) => session.filters = RetainerFilters::none(),
                    _ => {
                        println!("Usage: filter <from|to|categories|clear> [value]");
                        continue;
                    }
                }
                print_filters(&session.filters);
            }
            "show" => {
                if let Some(view) = session.view() {
                    if view.months.is_empty() {
                        println!("No months to show.");
                    } else {
                        println!("{}", render_months(&view));
                    }
                }
            }
            "month" => match parts.next().map(str::parse::<YearMonth>) {
                Some(Ok(year_month)) => {
                    if let Some(view) = session.view() {
                        print_month(&view, year_month);
                    }
                }
                Some(Err(e)) => println!("{e}"),
                None => println!("Usage: month <YYYY-MM>"),
            },
            "cycle" => {
                if let Some(view) = session.view() {
                    print_cycle(view.current_cycle_summary());
                }
            }
            "cycles" => {
                if let Some(view) = session.view() {
                    println!("{}", render_cycles(view.cycle_summaries()));
                }
            }
            "categories" => {
                let categories = distinct_categories(&session.records);
                if categories.is_empty() {
                    println!("No categories.");
                }
                for category in categories {
                    println!("  {:<16} {}", category.id, category.name);
                }
            }
            "export" => {
                let fmt = parts.next();
                let path = parts.next();
                let Some(view) = session.view() else {
                    continue;
                };
                let result = match (fmt, path) {
                    (Some("json"), Some(p)) => Some((p, save_view_to_json(&view, p))),
                    (Some("csv"), Some(p)) => Some((p, save_months_to_csv(&view, p))),
                    _ => None,
                };
                match result {
                    Some((p, Ok(()))) => println!("View exported to {p}."),
                    Some((_, Err(e))) => println!("Error exporting view: {e}"),
                    None => println!("Usage: export <json|csv> <path>"),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
