use crate::config::ConfigError;
use crate::year_month::{ParseYearMonthError, YearMonth};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetainerError {
    #[error("invalid retainer config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error(transparent)]
    InvalidYearMonth(#[from] ParseYearMonthError),
    #[error("date {0} is outside the supported calendar range")]
    DateOutOfRange(NaiveDate),
    #[error("cycle {cycle_index} starting from {start} runs past the supported calendar range")]
    CycleOutOfRange { start: YearMonth, cycle_index: u32 },
}

pub type RetainerResult<T> = Result<T, RetainerError>;
