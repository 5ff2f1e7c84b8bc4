pub mod calculations;
pub mod category;
pub mod config;
pub mod error;
pub mod filters;
pub mod persistence;
pub mod portfolio;
pub mod presentation;
pub mod record;
pub mod settlement;
pub mod status;
pub mod summary;
pub mod view;
pub mod year_month;

pub use category::{Category, CategoryMinutes};
pub use config::{
    ConfigError, DEFAULT_CYCLE_LENGTH, MAX_CYCLE_LENGTH, MAX_INCLUDED_MINUTES_PER_MONTH,
    RetainerConfig,
};
pub use error::{RetainerError, RetainerResult};
pub use filters::RetainerFilters;
pub use persistence::{
    PersistenceError, load_config_from_json, load_time_records_from_csv,
    load_time_records_from_json, save_config_to_json, save_months_to_csv, save_view_to_json,
};
pub use portfolio::{ProjectInput, ProjectView, compute_portfolio, compute_portfolio_at};
pub use record::TimeRecord;
pub use settlement::SettlementFigures;
pub use status::{StatusKind, StatusTag, StatusVariant, derive_status};
pub use summary::{CycleSummary, summarize_current_cycle, summarize_cycle, summarize_cycles};
pub use view::{
    ComputedMonth, MonthPeriod, RetainerView, compute_retainer_view, compute_retainer_view_at,
};
pub use year_month::{ParseYearMonthError, YearMonth};
