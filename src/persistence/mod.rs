use crate::config::RetainerConfig;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn validate_config(config: &RetainerConfig) -> PersistenceResult<()> {
    config
        .validate()
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;

pub use file::{
    load_config_from_json, load_time_records_from_csv, load_time_records_from_json,
    save_config_to_json, save_months_to_csv, save_view_to_json,
};
