use super::{PersistenceError, PersistenceResult};
use crate::{RetainerConfig, RetainerView, TimeRecord, presentation::status_label};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

pub fn load_time_records_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<TimeRecord>> {
    let file = File::open(path.as_ref())?;
    let records: Vec<TimeRecord> = serde_json::from_reader(file)?;
    info!(path = %path.as_ref().display(), count = records.len(), "loaded time records");
    Ok(records)
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<RetainerConfig> {
    let file = File::open(path)?;
    let config: RetainerConfig = serde_json::from_reader(file)?;
    super::validate_config(&config)?;
    Ok(config)
}

pub fn save_config_to_json<P: AsRef<Path>>(
    config: &RetainerConfig,
    path: P,
) -> PersistenceResult<()> {
    super::validate_config(config)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

pub fn save_view_to_json<P: AsRef<Path>>(view: &RetainerView, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, view)?;
    Ok(())
}

#[derive(Deserialize)]
struct TimeRecordCsvRecord {
    task_id: String,
    date: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    note: String,
    duration_minutes: String,
    category_id: String,
    #[serde(default)]
    category_name: String,
}

impl TryFrom<TimeRecordCsvRecord> for TimeRecord {
    type Error = PersistenceError;

    fn try_from(record: TimeRecordCsvRecord) -> Result<Self, Self::Error> {
        let duration_minutes = record.duration_minutes.trim().parse::<i64>().map_err(|_| {
            PersistenceError::InvalidData(format!(
                "task {} has invalid duration_minutes '{}'",
                record.task_id, record.duration_minutes
            ))
        })?;
        Ok(TimeRecord {
            task_id: record.task_id,
            date: record.date,
            title: record.title,
            description: non_empty(record.description),
            note: non_empty(record.note),
            duration_minutes,
            category_id: record.category_id,
            category_name: record.category_name,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Reads records from a CSV file with a header row. Empty optional cells
/// become `None`; a non-numeric duration rejects the whole file.
pub fn load_time_records_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<TimeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path.as_ref())?;
    let mut records = Vec::new();
    for row in reader.deserialize::<TimeRecordCsvRecord>() {
        records.push(TimeRecord::try_from(row?)?);
    }
    let undated = records.iter().filter(|r| r.parsed_date().is_none()).count();
    if undated > 0 {
        warn!(
            path = %path.as_ref().display(),
            undated,
            "csv contains records with unparsable dates; they will be skipped"
        );
    }
    info!(path = %path.as_ref().display(), count = records.len(), "loaded time records");
    Ok(records)
}

#[derive(Serialize)]
struct MonthCsvRecord {
    year_month: String,
    cycle_index: u32,
    month_in_cycle: u32,
    start_balance: i64,
    available_minutes: i64,
    worked_minutes: i64,
    end_balance: i64,
    extra_minutes: i64,
    unused_minutes: i64,
    settles: bool,
    status: &'static str,
}

/// Flat per-month export, oldest first.
pub fn save_months_to_csv<P: AsRef<Path>>(view: &RetainerView, path: P) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for month in &view.months {
        writer.serialize(MonthCsvRecord {
            year_month: month.year_month.to_string(),
            cycle_index: month.cycle_index,
            month_in_cycle: month.month_in_cycle,
            start_balance: month.start_balance,
            available_minutes: month.available_minutes,
            worked_minutes: month.worked_minutes,
            end_balance: month.end_balance,
            extra_minutes: month.extra_minutes,
            unused_minutes: month.unused_minutes,
            settles: month.settles,
            status: status_label(month.status().kind),
        })?;
    }
    writer.flush()?;
    Ok(())
}
