use crate::year_month::YearMonth;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// One logged block of work, pre-joined with its task and category names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub task_id: String,
    /// Calendar date as `YYYY-MM-DD`. Kept as text; unparsable values are skipped by the engine.
    pub date: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub duration_minutes: i64,
    pub category_id: String,
    pub category_name: String,
}

impl TimeRecord {
    pub fn new(
        task_id: impl Into<String>,
        date: impl Into<String>,
        title: impl Into<String>,
        duration_minutes: i64,
        category_id: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            date: date.into(),
            title: title.into(),
            description: None,
            note: None,
            duration_minutes,
            category_id: category_id.into(),
            category_name: category_name.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), RECORD_DATE_FORMAT).ok()
    }

    pub fn year_month(&self) -> Option<YearMonth> {
        self.parsed_date().and_then(YearMonth::from_date)
    }
}
