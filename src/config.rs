use crate::year_month::YearMonth;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cycle length used when a config does not name one.
pub const DEFAULT_CYCLE_LENGTH: u32 = 3;

/// Largest monthly allowance accepted by [`RetainerConfig::validate`].
pub const MAX_INCLUDED_MINUTES_PER_MONTH: i64 = 100_000_000;

/// Longest rollover cycle accepted by [`RetainerConfig::validate`].
pub const MAX_CYCLE_LENGTH: u32 = 120;

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Billing policy applied uniformly to every month of a retainer project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetainerConfig {
    pub included_minutes_per_month: i64,
    #[serde(default)]
    pub rollover_enabled: bool,
    /// Price per overage hour, in `currency`.
    #[serde(default)]
    pub overage_rate: f64,
    pub start_date: NaiveDate,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Months pooled into one rollover cycle. Ignored when rollover is off.
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("included minutes per month must be non-negative (got {0})")]
    NegativeIncludedMinutes(i64),
    #[error("overage rate must be a finite, non-negative number (got {0})")]
    InvalidOverageRate(f64),
    #[error("included minutes per month must not exceed {max} (got {got})")]
    IncludedMinutesTooLarge { got: i64, max: i64 },
    #[error("cycle length must be at least one month")]
    ZeroCycleLength,
    #[error("cycle length must not exceed {max} months (got {got})")]
    CycleLengthTooLong { got: u32, max: u32 },
    #[error("start date {0} is outside the supported calendar range")]
    StartDateOutOfRange(NaiveDate),
}

impl RetainerConfig {
    pub fn new(included_minutes_per_month: i64, start_date: NaiveDate) -> Self {
        Self {
            included_minutes_per_month,
            rollover_enabled: false,
            overage_rate: 0.0,
            start_date,
            currency: default_currency(),
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }

    pub fn with_rollover(mut self, enabled: bool) -> Self {
        self.rollover_enabled = enabled;
        self
    }

    pub fn with_overage_rate(mut self, rate: f64) -> Self {
        self.overage_rate = rate;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_cycle_length(mut self, months: u32) -> Self {
        self.cycle_length = months;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.included_minutes_per_month < 0 {
            return Err(ConfigError::NegativeIncludedMinutes(
                self.included_minutes_per_month,
            ));
        }
        if self.included_minutes_per_month > MAX_INCLUDED_MINUTES_PER_MONTH {
            return Err(ConfigError::IncludedMinutesTooLarge {
                got: self.included_minutes_per_month,
                max: MAX_INCLUDED_MINUTES_PER_MONTH,
            });
        }
        if !self.overage_rate.is_finite() || self.overage_rate < 0.0 {
            return Err(ConfigError::InvalidOverageRate(self.overage_rate));
        }
        if self.cycle_length == 0 {
            return Err(ConfigError::ZeroCycleLength);
        }
        if self.cycle_length > MAX_CYCLE_LENGTH {
            return Err(ConfigError::CycleLengthTooLong {
                got: self.cycle_length,
                max: MAX_CYCLE_LENGTH,
            });
        }
        self.start_month()?;
        Ok(())
    }

    pub fn start_month(&self) -> Result<YearMonth, ConfigError> {
        YearMonth::from_date(self.start_date)
            .ok_or(ConfigError::StartDateOutOfRange(self.start_date))
    }

    /// Months per cycle as the engine applies them: 1 when rollover is off.
    pub fn effective_cycle_length(&self) -> u32 {
        if self.rollover_enabled {
            self.cycle_length.max(1)
        } else {
            1
        }
    }

    /// Budget pooled over one full cycle.
    pub fn cycle_pool_minutes(&self) -> i64 {
        self.included_minutes_per_month
            .saturating_mul(i64::from(self.effective_cycle_length()))
    }
}
