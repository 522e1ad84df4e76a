use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::engine::period::{DateRange, days_before};
use crate::engine::policy::{Estimator, ForecastPolicy};
use crate::error::Result;
use crate::models::{Item, ItemId, PlanEntry, WasteRecord};

/// Daily waste totals for one item, keyed by date.
pub type DailyHistory = BTreeMap<NaiveDate, f64>;

/// Representative daily waste and the number of recorded days behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub daily_waste: f64,
    pub points: usize,
}

impl Estimate {
    const EMPTY: Estimate = Estimate {
        daily_waste: 0.0,
        points: 0,
    };

    fn from_days(values: impl Iterator<Item = f64>) -> Self {
        let (sum, points) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if points == 0 {
            return Self::EMPTY;
        }
        Self {
            daily_waste: sum / points as f64,
            points,
        }
    }
}

/// Group raw records into per-item daily totals.
///
/// A zero-quantity record still marks its date as recorded.
pub fn group_history(records: &[WasteRecord]) -> HashMap<ItemId, DailyHistory> {
    let mut history: HashMap<ItemId, DailyHistory> = HashMap::new();
    for record in records {
        *history
            .entry(record.item_id)
            .or_default()
            .entry(record.date)
            .or_insert(0.0) += record.quantity;
    }
    history
}

/// Mean over the recorded days inside the window.
///
/// Divides by recorded days, not the window length, so sparse logging does
/// not drag the estimate toward zero.
pub fn trailing_estimate(days: &DailyHistory, window: DateRange) -> Estimate {
    if window.num_days() == 0 {
        return Estimate::EMPTY;
    }
    Estimate::from_days(days.range(window.start..=window.end).map(|(_, v)| *v))
}

/// Mean of the most recent recorded days that share `target`'s weekday.
pub fn weekday_estimate(
    days: &DailyHistory,
    target: NaiveDate,
    occurrences: usize,
    horizon_days: u32,
) -> Result<Estimate> {
    let end = days_before(target, 1)?;
    let window = DateRange::trailing(end, horizon_days)?;
    let weekday = target.weekday();

    Ok(Estimate::from_days(
        days.range(window.start..=window.end)
            .rev()
            .filter(|(date, _)| date.weekday() == weekday)
            .take(occurrences)
            .map(|(_, v)| *v),
    ))
}

/// The lookback window for a target date: `lookback_days` ending the day before.
pub fn lookback_window(target: NaiveDate, policy: &ForecastPolicy) -> Result<DateRange> {
    let end = days_before(target, 1)?;
    DateRange::trailing(end, policy.lookback_days)
}

/// Pick the estimate the policy calls for.
pub fn estimate_item(
    days: &DailyHistory,
    target: NaiveDate,
    policy: &ForecastPolicy,
) -> Result<Estimate> {
    if policy.estimator == Estimator::SameWeekday {
        let weekday = weekday_estimate(
            days,
            target,
            policy.weekday_occurrences,
            policy.weekday_horizon_days,
        )?;
        if weekday.points >= policy.weekday_min_points {
            return Ok(weekday);
        }
    }

    Ok(trailing_estimate(days, lookback_window(target, policy)?))
}

/// Cook quantity implied by a daily waste estimate.
///
/// With no history there is nothing to invert, so the recommendation is zero.
pub fn cook_quantity(estimate: Estimate, ratio: f64) -> f64 {
    if estimate.points == 0 || ratio <= 0.0 {
        return 0.0;
    }
    estimate.daily_waste / ratio
}

/// Recommendation for a single item.
pub fn forecast_item(
    item: &Item,
    days: &DailyHistory,
    target: NaiveDate,
    policy: &ForecastPolicy,
) -> Result<PlanEntry> {
    let estimate = estimate_item(days, target, policy)?;
    let ratio = policy.ratio_for(item.id);
    let recommended_cook_qty = cook_quantity(estimate, ratio);
    let confidence = policy.confidence_for(estimate.points);

    debug!(
        item_id = item.id,
        points = estimate.points,
        daily_waste = estimate.daily_waste,
        ratio,
        recommended_cook_qty,
        %confidence,
        "forecast item"
    );

    Ok(PlanEntry {
        item_id: item.id,
        item_name: item.name.clone(),
        unit: item.unit,
        target_date: target,
        recommended_cook_qty,
        confidence,
        history_points_used: estimate.points,
    })
}

/// Recommendations for every active item, in the order given.
pub fn plan(
    active_items: &[Item],
    history_by_item: &HashMap<ItemId, DailyHistory>,
    target: NaiveDate,
    policy: &ForecastPolicy,
) -> Result<Vec<PlanEntry>> {
    policy.validate()?;

    let empty = DailyHistory::new();
    active_items
        .iter()
        .filter(|item| item.active)
        .map(|item| {
            let days = history_by_item.get(&item.id).unwrap_or(&empty);
            forecast_item(item, days, target, policy)
        })
        .collect()
}
