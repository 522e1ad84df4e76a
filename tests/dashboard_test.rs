use assert_float_eq::*;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use waste_forecast_rs::engine::{FixedClock, WasteEngine, parse_date};
use waste_forecast_rs::models::{Item, NewWasteRecord, Unit, View, WasteRecord};
use waste_forecast_rs::{ItemRegistry, KitchenError, KitchenStore, WasteLedger, WasteQuery};

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

/// Two items, each wasting 5 per day from 2024-01-01 to 2024-01-14.
fn steady_store() -> KitchenStore {
    let mut store = KitchenStore::new();
    let rolls = store.add_item("Sausage Roll", Unit::Pieces, true).unwrap();
    let curry = store.add_item("Chicken Curry", Unit::Kg, true).unwrap();

    for date in d("2024-01-01").iter_days().take(14) {
        store.record_waste(NewWasteRecord::new(rolls, date, 5.0)).unwrap();
        store.record_waste(NewWasteRecord::new(curry, date, 5.0)).unwrap();
    }
    store
}

#[test]
fn test_week_view_flat_history() {
    let store = steady_store();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-02-01")));
    let result = engine.get_dashboard(View::Week, Some(d("2024-01-14"))).unwrap();

    assert_eq!(result.range_start, d("2024-01-08"));
    assert_eq!(result.range_end, d("2024-01-14"));
    assert_float_absolute_eq!(result.total_waste, 70.0, 1e-9);
    assert_eq!(result.trend.len(), 7);

    let week = &result.comparisons[1];
    assert_eq!(week.label, "This week vs last week");
    assert_float_absolute_eq!(week.current_total, 70.0, 1e-9);
    assert_float_absolute_eq!(week.previous_total, 70.0, 1e-9);
    assert_float_absolute_eq!(week.delta, 0.0, 1e-9);
    assert_float_absolute_eq!(week.delta_pct.unwrap(), 0.0, 1e-9);
}

#[test]
fn test_comparisons_independent_of_view() {
    let store = steady_store();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-02-01")));
    let anchor = Some(d("2024-01-14"));

    let day = engine.get_dashboard(View::Day, anchor).unwrap();
    let month = engine.get_dashboard(View::Month, anchor).unwrap();

    assert_eq!(day.comparisons, month.comparisons);
    let labels: Vec<&str> = day.comparisons.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Today vs yesterday",
            "This week vs last week",
            "This month vs last month"
        ]
    );

    // No history before 2024-01-01, so last month is empty
    let month_cmp = &day.comparisons[2];
    assert_float_absolute_eq!(month_cmp.current_total, 140.0, 1e-9);
    assert_float_absolute_eq!(month_cmp.previous_total, 0.0, 1e-9);
    assert!(month_cmp.delta_pct.is_none());

    assert_eq!(day.trend.len(), 1);
    assert_eq!(month.trend.len(), 30);
    assert_eq!(month.range_start, d("2023-12-16"));
}

#[test]
fn test_anchor_defaults_to_clock() {
    let store = steady_store();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-01-10")));
    let result = engine.get_dashboard(View::Day, None).unwrap();

    assert_eq!(result.anchor_date, d("2024-01-10"));
    assert_float_absolute_eq!(result.total_waste, 10.0, 1e-9);
}

#[test]
fn test_trend_accounts_for_total() {
    let mut store = KitchenStore::new();
    let ids: Vec<u32> = (0..4)
        .map(|i| store.add_item(&format!("Item {}", i), Unit::Pieces, true).unwrap())
        .collect();

    let mut rng = StdRng::seed_from_u64(42);
    for date in d("2023-11-01").iter_days().take(120) {
        for &id in &ids {
            if rng.gen_bool(0.6) {
                let qty = (rng.gen_range(0.0..8.0) * 100.0_f64).round() / 100.0;
                store.record_waste(NewWasteRecord::new(id, date, qty)).unwrap();
            }
        }
    }

    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-03-01")));
    for anchor in ["2023-11-01", "2023-12-31", "2024-01-15", "2024-02-28", "2024-04-10"] {
        for view in [View::Day, View::Week, View::Month] {
            let result = engine.get_dashboard(view, Some(d(anchor))).unwrap();

            let expected_len = (result.range_end - result.range_start).num_days() as usize + 1;
            assert_eq!(result.trend.len(), expected_len);

            let trend_sum: f64 = result.trend.iter().map(|p| p.total_waste).sum();
            assert_float_absolute_eq!(trend_sum, result.total_waste, 1e-6);

            let item_sum: f64 = result.by_item.iter().map(|t| t.total_waste).sum();
            assert_float_absolute_eq!(item_sum, result.total_waste, 1e-6);

            for pair in result.by_item.windows(2) {
                assert!(
                    pair[0].total_waste > pair[1].total_waste
                        || (pair[0].total_waste == pair[1].total_waste
                            && pair[0].item_id < pair[1].item_id)
                );
            }

            for cmp in &result.comparisons {
                match cmp.delta_pct {
                    Some(pct) => assert_float_absolute_eq!(
                        pct,
                        100.0 * (cmp.current_total - cmp.previous_total) / cmp.previous_total,
                        1e-6
                    ),
                    None => assert_eq!(cmp.previous_total, 0.0),
                }
            }

            let again = engine.get_dashboard(view, Some(d(anchor))).unwrap();
            assert_eq!(result, again);
        }
    }
}

#[test]
fn test_empty_ledger_gives_zero_trend() {
    let store = KitchenStore::new();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-01-31")));
    let result = engine.get_dashboard(View::Month, None).unwrap();

    assert_eq!(result.trend.len(), 30);
    assert!(result.trend.iter().all(|p| p.total_waste == 0.0));
    assert!(result.by_item.is_empty());
    assert!(result.comparisons.iter().all(|c| c.delta_pct.is_none()));
}

#[test]
fn test_invalid_params_rejected() {
    let store = steady_store();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-01-14")));

    assert!(matches!(
        engine.dashboard_from_params("fortnight", None),
        Err(KitchenError::InvalidView(_))
    ));
    assert!(matches!(
        engine.dashboard_from_params("week", Some("2024-13-01")),
        Err(KitchenError::InvalidDate(_))
    ));
    assert!(engine.dashboard_from_params("week", Some("2024-01-14")).is_ok());
}

#[test]
fn test_deactivation_does_not_change_earlier_result() {
    let mut store = steady_store();
    let before = {
        let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-01-14")));
        engine.get_dashboard(View::Week, None).unwrap()
    };
    let snapshot = before.clone();

    store.set_item_active(1, false).unwrap();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-01-14")));
    let after = engine.get_dashboard(View::Week, None).unwrap();

    assert_eq!(before, snapshot);
    // History of inactive items still counts
    assert_eq!(after.by_item.len(), 2);
    assert_float_absolute_eq!(after.total_waste, before.total_waste, 1e-9);
}

/// Ledger that hands back fixed rows, including ones for unknown items.
struct FixedLedger(Vec<WasteRecord>);

impl WasteLedger for FixedLedger {
    fn list_waste(&self, query: &WasteQuery) -> waste_forecast_rs::Result<Vec<WasteRecord>> {
        Ok(self.0.iter().filter(|r| query.matches(r)).cloned().collect())
    }
}

struct FixedRegistry(Vec<Item>);

impl ItemRegistry for FixedRegistry {
    fn list_items(&self, include_inactive: bool) -> waste_forecast_rs::Result<Vec<Item>> {
        Ok(self
            .0
            .iter()
            .filter(|i| include_inactive || i.active)
            .cloned()
            .collect())
    }
}

#[test]
fn test_stale_item_reference_skipped() {
    let registry = FixedRegistry(vec![Item::new(1, "Breakfast Roll", Unit::Pieces)]);
    let record = |id, item_id, quantity| WasteRecord {
        id,
        item_id,
        date: d("2024-01-05"),
        quantity,
        note: None,
    };
    let ledger = FixedLedger(vec![record(1, 1, 2.0), record(2, 42, 3.0), record(3, 1, -4.0)]);

    let engine = WasteEngine::new(registry, ledger, FixedClock(d("2024-01-05")));
    let result = engine.get_dashboard(View::Day, None).unwrap();

    assert_eq!(result.by_item.len(), 1);
    assert_eq!(result.by_item[0].item_id, 1);
    assert_float_absolute_eq!(result.by_item[0].total_waste, 2.0, 1e-9);
    // The negative row is dropped; the stale one still counts toward the total
    assert_float_absolute_eq!(result.total_waste, 5.0, 1e-9);
}

#[test]
fn test_dashboard_json_field_names() {
    let store = steady_store();
    let engine = WasteEngine::new(&store, &store, FixedClock(d("2024-01-14")));
    let result = engine.get_dashboard(View::Week, None).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["range_start"], "2024-01-08");
    assert_eq!(json["range_end"], "2024-01-14");
    assert!(json["total_waste"].is_number());
    assert!(json["by_item"][0]["item_id"].is_number());
    assert!(json["by_item"][0]["item_name"].is_string());
    assert!(json["by_item"][0]["total_waste"].is_number());
    assert_eq!(json["trend"][0]["date"], "2024-01-08");
    assert!(json["trend"][0]["total_waste"].is_number());
    for key in ["label", "current_total", "previous_total", "delta", "delta_pct"] {
        assert!(json["comparisons"][0].get(key).is_some(), "missing {}", key);
    }
}
