use crate::filters::RetainerFilters;
use crate::record::TimeRecord;
use crate::year_month::YearMonth;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Records that fall into one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub year_month: YearMonth,
    pub records: Vec<TimeRecord>,
}

/// Groups records into every month from `start` through `through`, inclusive.
///
/// Months without records are still emitted. Records in disallowed categories,
/// with unparsable dates, or outside the span are dropped.
pub fn partition_by_month(
    records: &[TimeRecord],
    start: YearMonth,
    through: YearMonth,
    filters: &RetainerFilters,
) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<YearMonth, Vec<TimeRecord>> =
        YearMonth::range_inclusive(start, through)
            .map(|month| (month, Vec::new()))
            .collect();

    let mut skipped_outside = 0usize;
    for record in records {
        if !filters.allows_category(&record.category_id) {
            continue;
        }
        let Some(month) = record.year_month() else {
            warn!(
                task_id = %record.task_id,
                date = %record.date,
                "skipping time record with unparsable date"
            );
            continue;
        };
        match buckets.get_mut(&month) {
            Some(bucket) => bucket.push(record.clone()),
            None => skipped_outside += 1,
        }
    }
    if skipped_outside > 0 {
        debug!(
            skipped = skipped_outside,
            %start,
            %through,
            "ignored time records outside the active month span"
        );
    }

    buckets
        .into_iter()
        .map(|(year_month, records)| MonthBucket {
            year_month,
            records,
        })
        .collect()
}
