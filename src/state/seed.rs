use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;

use crate::engine::period::days_before;
use crate::error::Result;
use crate::models::{NewWasteRecord, Unit};
use crate::state::KitchenStore;

/// Demo items for a small deli counter.
pub const DEMO_ITEMS: [(&str, Unit); 5] = [
    ("Chicken Fillet Roll", Unit::Pieces),
    ("Sausage Roll", Unit::Pieces),
    ("Breakfast Roll", Unit::Pieces),
    ("Hot Wedges (tray)", Unit::Pieces),
    ("Chicken Curry", Unit::Kg),
];

/// Chance that an item gets a waste entry on any given day.
const RECORD_PROBABILITY: f64 = 0.88;

/// Multiplier applied to Saturday and Sunday waste.
const WEEKEND_BOOST: f64 = 1.6;

/// Half-width of the uniform noise around each item's base waste.
const NOISE: f64 = 1.2;

/// Entries at or below this are not logged.
const MIN_LOGGED: f64 = 0.05;

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Register any missing demo items and log `days` days of random waste
/// ending on `today`. Returns the number of records written.
pub fn seed_demo<R: Rng>(
    store: &mut KitchenStore,
    today: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Result<usize> {
    for (name, unit) in DEMO_ITEMS {
        if store.find_item(name).is_none() {
            store.add_item(name, unit, true)?;
        }
    }

    let items: Vec<(u32, Unit)> = store.items().iter().map(|i| (i.id, i.unit)).collect();
    let mut written = 0;

    for back in 0..days {
        let date = days_before(today, back)?;
        let boost = if is_weekend(date) { WEEKEND_BOOST } else { 1.0 };

        for &(item_id, unit) in &items {
            if rng.gen_bool(RECORD_PROBABILITY) {
                let base = 2.0 + (item_id % 3) as f64;
                let mut qty = (base * boost + rng.gen_range(-NOISE..=NOISE)).max(0.0);
                if unit == Unit::Kg {
                    qty /= 10.0;
                }
                let qty = (qty * 100.0).round() / 100.0;

                if qty > MIN_LOGGED {
                    store.record_waste(NewWasteRecord::new(item_id, date, qty))?;
                    written += 1;
                }
            }
        }
    }

    Ok(written)
}
