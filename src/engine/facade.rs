use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::engine::aggregate::{aggregate, compare, sum_waste};
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::constants::{DAY_COMPARISON_LABEL, MONTH_COMPARISON_LABEL, WEEK_COMPARISON_LABEL};
use crate::engine::forecast::{self, group_history, lookback_window};
use crate::engine::period::{DateRange, Periods, days_after, days_before, parse_date, resolve};
use crate::engine::policy::{Estimator, ForecastPolicy};
use crate::engine::source::{ItemRegistry, WasteLedger, WasteQuery};
use crate::error::Result;
use crate::models::{
    Comparison, DashboardResult, Item, ItemId, TomorrowPlanResult, View, WasteRecord,
};

/// Entry point for dashboard and cook-plan queries.
///
/// Holds no state between calls; every query reads a fresh snapshot from the
/// registry and ledger.
pub struct WasteEngine<R, L, C = SystemClock> {
    registry: R,
    ledger: L,
    clock: C,
    policy: ForecastPolicy,
}

impl<R: ItemRegistry, L: WasteLedger, C: Clock> WasteEngine<R, L, C> {
    pub fn new(registry: R, ledger: L, clock: C) -> Self {
        Self {
            registry,
            ledger,
            clock,
            policy: ForecastPolicy::default(),
        }
    }

    /// Replace the forecasting policy after validating it.
    pub fn with_policy(mut self, policy: ForecastPolicy) -> Result<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    pub fn policy(&self) -> &ForecastPolicy {
        &self.policy
    }

    /// Aggregate waste for `view` anchored on `anchor` (default: today).
    ///
    /// The comparisons always cover day, week and month regardless of `view`;
    /// `view` only selects the range behind the total, breakdown and trend.
    pub fn get_dashboard(&self, view: View, anchor: Option<NaiveDate>) -> Result<DashboardResult> {
        let anchor = anchor.unwrap_or_else(|| self.clock.today());
        let primary = resolve(view, anchor)?;
        let panels = [
            (DAY_COMPARISON_LABEL, resolve(View::Day, anchor)?),
            (WEEK_COMPARISON_LABEL, resolve(View::Week, anchor)?),
            (MONTH_COMPARISON_LABEL, resolve(View::Month, anchor)?),
        ];

        let earliest = panels
            .iter()
            .map(|(_, p)| p.previous.start)
            .chain(std::iter::once(primary.previous.start))
            .min()
            .unwrap_or(primary.previous.start);

        info!(%view, %anchor, start = %primary.current.start, end = %primary.current.end, "building dashboard");

        let records = self.fetch(WasteQuery::between(earliest, anchor))?;
        let items = self.registry.list_items(true)?;
        let index = index_items(&items);

        let totals = aggregate(&records, primary.current, &index);
        let comparisons: Vec<Comparison> = panels
            .iter()
            .map(|(label, periods)| compare_periods(label, &records, periods))
            .collect();

        Ok(DashboardResult {
            view,
            anchor_date: anchor,
            range_start: totals.range.start,
            range_end: totals.range.end,
            total_waste: totals.total_waste,
            by_item: totals.by_item,
            trend: totals.trend,
            comparisons,
        })
    }

    /// Dashboard from raw request parameters.
    ///
    /// The view is checked before the date and before any data is read.
    pub fn dashboard_from_params(
        &self,
        view: &str,
        anchor: Option<&str>,
    ) -> Result<DashboardResult> {
        let view: View = view.parse()?;
        let anchor = anchor.map(parse_date).transpose()?;
        self.get_dashboard(view, anchor)
    }

    /// Cook recommendations for `target` (default: tomorrow) for active items.
    pub fn get_tomorrow_plan(&self, target: Option<NaiveDate>) -> Result<TomorrowPlanResult> {
        let target = match target {
            Some(date) => date,
            None => days_after(self.clock.today(), 1)?,
        };

        let active = self.registry.list_items(false)?;
        let window = self.history_window(target)?;
        info!(%target, items = active.len(), start = %window.start, end = %window.end, "building cook plan");

        let records = self.fetch(WasteQuery::between(window.start, window.end))?;
        let history = group_history(&records);
        let items = forecast::plan(&active, &history, target, &self.policy)?;

        Ok(TomorrowPlanResult {
            target_date: target,
            items,
        })
    }

    /// Cook plan from a raw request parameter.
    pub fn tomorrow_plan_from_params(&self, target: Option<&str>) -> Result<TomorrowPlanResult> {
        let target = target.map(parse_date).transpose()?;
        self.get_tomorrow_plan(target)
    }

    /// Every day the configured estimators may read for `target`.
    fn history_window(&self, target: NaiveDate) -> Result<DateRange> {
        let lookback = lookback_window(target, &self.policy)?;
        if self.policy.estimator != Estimator::SameWeekday {
            return Ok(lookback);
        }

        let end = days_before(target, 1)?;
        let horizon = DateRange::trailing(end, self.policy.weekday_horizon_days)?;
        Ok(DateRange::new(lookback.start.min(horizon.start), end))
    }

    fn fetch(&self, query: WasteQuery) -> Result<Vec<WasteRecord>> {
        let records = self.ledger.list_waste(&query)?;
        debug!(count = records.len(), "fetched waste records");
        Ok(usable_records(records))
    }
}

fn compare_periods(label: &str, records: &[WasteRecord], periods: &Periods) -> Comparison {
    compare(
        label,
        sum_waste(records, periods.current),
        sum_waste(records, periods.previous),
    )
}

fn index_items(items: &[Item]) -> HashMap<ItemId, &Item> {
    items.iter().map(|item| (item.id, item)).collect()
}

/// Drop records whose quantity is negative or not a number.
fn usable_records(records: Vec<WasteRecord>) -> Vec<WasteRecord> {
    records
        .into_iter()
        .filter(|r| {
            let ok = r.quantity.is_finite() && r.quantity >= 0.0;
            if !ok {
                warn!(record_id = r.id, quantity = r.quantity, "ignoring invalid waste quantity");
            }
            ok
        })
        .collect()
}
