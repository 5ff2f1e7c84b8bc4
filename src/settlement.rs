use crate::config::RetainerConfig;
use crate::view::{ComputedMonth, RetainerView};
use crate::year_month::YearMonth;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: f64 = 60.0;

/// What a settlement month turns into on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementFigures {
    pub year_month: YearMonth,
    pub settles: bool,
    pub extra_minutes: i64,
    /// Unused minutes forfeited at settlement.
    pub forfeited_minutes: i64,
    pub billable_hours: f64,
    pub overage_amount: f64,
    pub currency: String,
}

impl SettlementFigures {
    /// Mid-cycle months produce zero figures.
    pub fn for_month(month: &ComputedMonth, config: &RetainerConfig) -> Self {
        let billable_hours = month.extra_minutes as f64 / MINUTES_PER_HOUR;
        Self {
            year_month: month.year_month,
            settles: month.settles,
            extra_minutes: month.extra_minutes,
            forfeited_minutes: month.unused_minutes,
            billable_hours,
            overage_amount: billable_hours * config.overage_rate,
            currency: config.currency.clone(),
        }
    }

    pub fn is_payment_due(&self) -> bool {
        self.extra_minutes > 0
    }
}

impl RetainerView {
    /// Figures for every settling month, oldest first.
    pub fn settlements(&self) -> Vec<SettlementFigures> {
        self.months
            .iter()
            .filter(|m| m.settles)
            .map(|m| SettlementFigures::for_month(m, &self.config))
            .collect()
    }

    pub fn total_overage_amount(&self) -> f64 {
        self.settlements().iter().map(|s| s.overage_amount).sum()
    }

    pub fn total_forfeited_minutes(&self) -> i64 {
        self.months.iter().map(|m| m.unused_minutes).sum()
    }
}
