use crate::error::RetainerResult;
use crate::year_month::YearMonth;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional narrowing of a retainer view.
///
/// The month range is inclusive on both ends. An empty or absent category set
/// lets every category through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainerFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_month_start: Option<YearMonth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_month_end: Option<YearMonth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<BTreeSet<String>>,
}

impl RetainerFilters {
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds filters from their string form, e.g. `Some("2025-04")`.
    pub fn from_raw<S: AsRef<str>>(
        year_month_start: Option<&str>,
        year_month_end: Option<&str>,
        category_ids: Option<&[S]>,
    ) -> RetainerResult<Self> {
        let year_month_start = year_month_start.map(str::parse::<YearMonth>).transpose()?;
        let year_month_end = year_month_end.map(str::parse::<YearMonth>).transpose()?;
        let category_ids = category_ids.map(|ids| {
            ids.iter()
                .map(|id| id.as_ref().to_string())
                .collect::<BTreeSet<_>>()
        });
        Ok(Self {
            year_month_start,
            year_month_end,
            category_ids,
        })
    }

    pub fn with_range(mut self, start: Option<YearMonth>, end: Option<YearMonth>) -> Self {
        self.year_month_start = start;
        self.year_month_end = end;
        self
    }

    pub fn with_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn allows_category(&self, category_id: &str) -> bool {
        match &self.category_ids {
            Some(ids) if !ids.is_empty() => ids.contains(category_id),
            _ => true,
        }
    }

    pub fn includes_month(&self, month: YearMonth) -> bool {
        if let Some(start) = self.year_month_start {
            if month < start {
                return false;
            }
        }
        if let Some(end) = self.year_month_end {
            if month > end {
                return false;
            }
        }
        true
    }

    pub fn has_month_range(&self) -> bool {
        self.year_month_start.is_some() || self.year_month_end.is_some()
    }
}
