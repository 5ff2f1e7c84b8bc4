use crate::record::TimeRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Minutes logged against one category within a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMinutes {
    pub category_id: String,
    pub category_name: String,
    pub minutes: i64,
}

/// Distinct categories among records with a valid date, sorted by name then id.
/// The first name seen for an id wins.
pub fn distinct_categories(records: &[TimeRecord]) -> Vec<Category> {
    let mut by_id: HashMap<&str, &str> = HashMap::new();
    for record in records.iter().filter(|r| r.parsed_date().is_some()) {
        by_id
            .entry(record.category_id.as_str())
            .or_insert(record.category_name.as_str());
    }
    let mut categories: Vec<Category> = by_id
        .into_iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    categories
}

/// Per-category totals, largest first (ties by name).
pub fn category_breakdown(records: &[TimeRecord]) -> Vec<CategoryMinutes> {
    let mut totals: BTreeMap<&str, (&str, i64)> = BTreeMap::new();
    for record in records {
        let entry = totals
            .entry(record.category_id.as_str())
            .or_insert((record.category_name.as_str(), 0));
        entry.1 = entry.1.saturating_add(record.duration_minutes);
    }
    let mut breakdown: Vec<CategoryMinutes> = totals
        .into_iter()
        .map(|(id, (name, minutes))| CategoryMinutes {
            category_id: id.to_string(),
            category_name: name.to_string(),
            minutes,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.minutes
            .cmp(&a.minutes)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    breakdown
}
