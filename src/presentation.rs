//! Display text for computed months. Nothing in the engine depends on this module.

use crate::config::RetainerConfig;
use crate::settlement::SettlementFigures;
use crate::status::StatusKind;
use crate::view::{ComputedMonth, MonthPeriod};
use crate::year_month::YearMonth;
use chrono::Datelike;

/// `125` → `"2h 5m"`, `600` → `"10h"`, `-135` → `"-2h 15m"`.
pub fn format_minutes_as_hours(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let magnitude = minutes.unsigned_abs();
    let hours = magnitude / 60;
    let rest = magnitude % 60;
    if rest == 0 {
        format!("{sign}{hours}h")
    } else {
        format!("{sign}{hours}h {rest}m")
    }
}

pub fn format_decimal_hours(minutes: i64) -> String {
    format!("{:.2}", minutes as f64 / 60.0)
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

pub fn month_label(month: YearMonth) -> String {
    month.first_day().format("%b %Y").to_string()
}

/// `"Apr 1 – 30, 2025"`.
pub fn period_label(period: &MonthPeriod) -> String {
    let (start, end) = (period.start, period.end);
    if start.year() == end.year() && start.month() == end.month() {
        format!(
            "{} {} – {}, {}",
            start.format("%b"),
            start.day(),
            end.day(),
            start.year()
        )
    } else {
        format!("{} – {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

/// `"Apr – Jun 2025"`, or `"Nov 2025 – Jan 2026"` across a year change.
pub fn cycle_range_label(first: YearMonth, last: YearMonth) -> String {
    if first == last {
        return month_label(first);
    }
    if first.year() == last.year() {
        format!(
            "{} – {}",
            first.first_day().format("%b"),
            month_label(last)
        )
    } else {
        format!("{} – {}", month_label(first), month_label(last))
    }
}

pub fn status_label(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::PaymentDue => "Payment due",
        StatusKind::UnusedHours => "Unused hours",
        StatusKind::OnBudget => "On budget",
        StatusKind::CarriesOver => "Carries over",
        StatusKind::DeductedNextMonth => "Deducted next month",
    }
}

/// One-line explanation of a month's balance.
///
/// Mid-cycle months describe usage up to and including the month; settlement
/// months describe the final settlement figures.
pub fn explain_month(month: &ComputedMonth, config: &RetainerConfig) -> String {
    let scope = if config.rollover_enabled { "Cycle" } else { "Month" };
    if month.settles {
        let figures = SettlementFigures::for_month(month, config);
        if figures.is_payment_due() {
            return format!(
                "{scope} settled {} over budget: {} due",
                format_minutes_as_hours(figures.extra_minutes),
                format_amount(figures.overage_amount, &figures.currency)
            );
        }
        if figures.forfeited_minutes > 0 {
            return format!(
                "{scope} settled with {} unused",
                format_minutes_as_hours(figures.forfeited_minutes)
            );
        }
        return format!("{scope} settled on budget");
    }

    let used = format!(
        "{} of {} used so far this cycle",
        format_minutes_as_hours(month.cycle_worked_minutes_to_date),
        format_minutes_as_hours(config.cycle_pool_minutes())
    );
    match month.end_balance {
        balance if balance > 0 => format!(
            "{used}; {} carries over",
            format_minutes_as_hours(balance)
        ),
        balance if balance < 0 => format!(
            "{used}; {} deducted next month",
            format_minutes_as_hours(-balance)
        ),
        _ => format!("{used}; on budget"),
    }
}
