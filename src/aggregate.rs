//! Grouped sum/mean reductions over the rental tables.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::debug;

use crate::derive::{DayType, WeekdayConvention};
use crate::error::AggregationError;
use crate::records::{DailyRecord, HourlyRecord};

/// How the value column is reduced within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Sum,
    Mean,
}

/// One reduced group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<K> {
    pub key: K,
    pub value: f64,
    /// Rows that contributed to `value`.
    pub count: usize,
}

/// Result of grouping a table by a key and reducing one column.
///
/// Groups are ordered ascending by key, which for dates is chronological.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate<K> {
    pub value_column: &'static str,
    pub reduction: Reduction,
    groups: Vec<Group<K>>,
}

impl<K: PartialEq> GroupAggregate<K> {
    pub fn groups(&self) -> &[Group<K>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Group<K>> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.groups.iter().find(|g| &g.key == key).map(|g| g.value)
    }

    /// Sum of the reduced values across groups.
    pub fn total(&self) -> f64 {
        self.groups.iter().map(|g| g.value).sum()
    }

    /// Rows across all groups.
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Groups `rows` by `key` and reduces `value` within each group.
///
/// `value_column` names the reduced column in errors and in the result.
///
/// # Errors
///
/// Returns [`AggregationError::NonNumeric`] if `value` yields NaN or an
/// infinite number for any row, or if a reduced group is not finite.
pub fn aggregate<R, K, FK, FV>(
    rows: &[R],
    value_column: &'static str,
    key: FK,
    value: FV,
    reduction: Reduction,
) -> Result<GroupAggregate<K>, AggregationError>
where
    K: Ord + Debug,
    FK: Fn(&R) -> K,
    FV: Fn(&R) -> f64,
{
    let mut buckets: BTreeMap<K, Accumulator> = BTreeMap::new();

    for row in rows {
        let k = key(row);
        let v = value(row);
        if !v.is_finite() {
            return Err(AggregationError::NonNumeric {
                column: value_column,
                key: format!("{k:?}"),
            });
        }

        let acc = buckets.entry(k).or_default();
        acc.sum += v;
        acc.count += 1;
    }

    let mut groups = Vec::with_capacity(buckets.len());
    for (k, acc) in buckets {
        let value = match reduction {
            Reduction::Sum => acc.sum,
            Reduction::Mean => acc.sum / acc.count as f64,
        };
        if !value.is_finite() {
            return Err(AggregationError::NonNumeric {
                column: value_column,
                key: format!("{k:?}"),
            });
        }
        groups.push(Group {
            key: k,
            value,
            count: acc.count,
        });
    }

    debug!(
        value_column,
        ?reduction,
        rows = rows.len(),
        groups = groups.len(),
        "Aggregated"
    );

    Ok(GroupAggregate {
        value_column,
        reduction,
        groups,
    })
}

fn daily_count(r: &DailyRecord) -> f64 {
    r.rental_count as f64
}

fn hourly_count(r: &HourlyRecord) -> f64 {
    r.rental_count as f64
}

/// Total rentals per season code.
pub fn seasonal_totals(daily: &[DailyRecord]) -> Result<GroupAggregate<u8>, AggregationError> {
    aggregate(daily, "cnt", |r| r.season, daily_count, Reduction::Sum)
}

/// Total rentals per weather situation code.
pub fn weather_totals(daily: &[DailyRecord]) -> Result<GroupAggregate<u8>, AggregationError> {
    aggregate(daily, "cnt", |r| r.weather_situation, daily_count, Reduction::Sum)
}

/// Total rentals per hour of day, across all dates.
pub fn hourly_totals(hourly: &[HourlyRecord]) -> Result<GroupAggregate<u8>, AggregationError> {
    aggregate(hourly, "cnt", |r| r.hour, hourly_count, Reduction::Sum)
}

/// Mean daily rentals for weekdays and weekend days.
pub fn day_type_means(
    daily: &[DailyRecord],
    convention: WeekdayConvention,
) -> Result<GroupAggregate<DayType>, AggregationError> {
    aggregate(
        daily,
        "cnt",
        |r| r.day_type(convention),
        daily_count,
        Reduction::Mean,
    )
}

/// Total rentals per date, in chronological order.
pub fn daily_totals(daily: &[DailyRecord]) -> Result<GroupAggregate<NaiveDate>, AggregationError> {
    aggregate(daily, "cnt", |r| r.date, daily_count, Reduction::Sum)
}
