//! Busiest hours of the morning and of the afternoon.

use serde::Serialize;
use std::cmp::Ordering;

use crate::aggregate::{Group, GroupAggregate};
use crate::derive::{Period, hour_label, period};

/// Hours kept per period unless the caller asks otherwise.
pub const DEFAULT_TOP_K: usize = 4;

/// One selected hour with its total rentals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourSelection {
    pub hour: u8,
    pub period: Period,
    pub label: String,
    pub value: f64,
}

/// Picks the `k` highest hours in each of the AM and PM halves.
///
/// Each half is ranked descending by value with a stable sort, so among
/// equal values the earlier hour wins. The two selections are then merged
/// and returned in ascending hour order. At most `2 * k` rows come back,
/// fewer when a half has fewer than `k` hours.
pub fn select_top_hours(hourly: &GroupAggregate<u8>, k: usize) -> Vec<HourSelection> {
    let (mut am, mut pm): (Vec<&Group<u8>>, Vec<&Group<u8>>) = hourly
        .groups()
        .iter()
        .partition(|g| period(g.key) == Period::AM);

    let mut selected = Vec::with_capacity(2 * k);
    for half in [&mut am, &mut pm] {
        // groups() is ascending by hour, which the stable sort preserves among ties
        half.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        selected.extend(half.iter().take(k).map(|g| {
            let p = period(g.key);
            HourSelection {
                hour: g.key,
                period: p,
                label: hour_label(g.key, p),
                value: g.value,
            }
        }));
    }

    selected.sort_by_key(|s| s.hour);
    selected
}
