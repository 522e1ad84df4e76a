use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::warn;

use crate::engine::period::DateRange;
use crate::models::{Comparison, Item, ItemId, ItemTotal, TrendPoint, WasteRecord};

/// Aggregate statistics for one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTotals {
    pub range: DateRange,
    pub total_waste: f64,
    pub by_item: Vec<ItemTotal>,
    pub trend: Vec<TrendPoint>,
}

/// Records whose date falls inside the range.
pub fn in_range<'a>(
    records: &'a [WasteRecord],
    range: DateRange,
) -> impl Iterator<Item = &'a WasteRecord> + 'a {
    records.iter().filter(move |r| range.contains(r.date))
}

/// Sum of all quantities inside the range.
pub fn sum_waste(records: &[WasteRecord], range: DateRange) -> f64 {
    in_range(records, range).map(|r| r.quantity).sum()
}

/// Per-item totals inside the range, largest first.
///
/// Only items with at least one record appear. Records pointing at an item
/// the registry does not know are left out of the breakdown.
pub fn totals_by_item(
    records: &[WasteRecord],
    range: DateRange,
    items: &HashMap<ItemId, &Item>,
) -> Vec<ItemTotal> {
    let mut sums: BTreeMap<ItemId, f64> = BTreeMap::new();
    let mut stale: BTreeMap<ItemId, usize> = BTreeMap::new();

    for record in in_range(records, range) {
        if items.contains_key(&record.item_id) {
            *sums.entry(record.item_id).or_insert(0.0) += record.quantity;
        } else {
            *stale.entry(record.item_id).or_insert(0) += 1;
        }
    }

    for (item_id, count) in stale {
        warn!(item_id, count, "skipping waste records for unknown item");
    }

    let mut totals: Vec<ItemTotal> = sums
        .into_iter()
        .filter_map(|(item_id, total_waste)| {
            items.get(&item_id).map(|item| ItemTotal {
                item_id,
                item_name: item.name.clone(),
                unit: item.unit,
                total_waste,
            })
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total_waste
            .partial_cmp(&a.total_waste)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    totals
}

/// One point per calendar day of the range; days without records are zero.
pub fn daily_trend(records: &[WasteRecord], range: DateRange) -> Vec<TrendPoint> {
    let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
    for record in in_range(records, range) {
        *per_day.entry(record.date).or_insert(0.0) += record.quantity;
    }

    range
        .dates()
        .map(|date| TrendPoint {
            date,
            total_waste: per_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Build a comparison between two period totals.
///
/// The percentage is only defined against a positive previous total.
pub fn compare(label: &str, current: f64, previous: f64) -> Comparison {
    let delta = current - previous;
    let delta_pct = if previous > 0.0 {
        Some(delta / previous * 100.0)
    } else {
        None
    };

    Comparison {
        label: label.to_string(),
        current_total: current,
        previous_total: previous,
        delta,
        delta_pct,
    }
}

/// Total, per-item breakdown and daily trend for a range.
pub fn aggregate(
    records: &[WasteRecord],
    range: DateRange,
    items: &HashMap<ItemId, &Item>,
) -> RangeTotals {
    RangeTotals {
        range,
        total_waste: sum_waste(records, range),
        by_item: totals_by_item(records, range, items),
        trend: daily_trend(records, range),
    }
}
