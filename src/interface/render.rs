use std::collections::HashMap;

use crate::models::{
    Comparison, DashboardResult, Item, ItemId, PlanEntry, TomorrowPlanResult, Unit, WasteRecord,
};

/// Smallest positive cook quantity worth showing, per unit.
fn display_minimum(unit: Unit) -> f64 {
    match unit {
        Unit::Pieces => 1.0,
        Unit::Kg => 0.1,
    }
}

/// Round a cook quantity the way the kitchen reads it.
///
/// Pieces are whole numbers, kilograms keep two decimals, and any positive
/// recommendation is lifted to the unit's display minimum.
pub fn display_quantity(unit: Unit, qty: f64) -> f64 {
    if qty <= 0.0 {
        return 0.0;
    }
    let qty = qty.max(display_minimum(unit));
    if unit.is_count() {
        qty.round()
    } else {
        (qty * 100.0).round() / 100.0
    }
}

/// Format a quantity with the precision its unit calls for.
pub fn format_quantity(unit: Unit, qty: f64) -> String {
    if unit.is_count() {
        format!("{:.0} {}", qty, unit)
    } else {
        format!("{:.2} {}", qty, unit)
    }
}

/// Column width for item names, counted in characters.
fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(10)
}

fn format_comparison(cmp: &Comparison) -> String {
    let pct = match cmp.delta_pct {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    };
    format!(
        "{:<26} {:>9.2} vs {:>9.2}  {:+.2} ({})",
        cmp.label, cmp.current_total, cmp.previous_total, cmp.delta, pct
    )
}

/// Display a dashboard: totals, breakdown, trend and comparisons.
pub fn display_dashboard(result: &DashboardResult) {
    println!();
    println!(
        "=== Waste Dashboard ({} view, {} to {}) ===",
        result.view, result.range_start, result.range_end
    );
    println!();
    println!("Total waste: {:.2}", result.total_waste);
    println!();

    if result.by_item.is_empty() {
        println!("No waste recorded in this range.");
    } else {
        let width = name_width(result.by_item.iter().map(|t| t.item_name.as_str()));

        println!("--- By item ---");
        for (i, total) in result.by_item.iter().enumerate() {
            println!(
                "{:>3}. {:<width$}  {}",
                i + 1,
                total.item_name,
                format_quantity(total.unit, total.total_waste),
                width = width
            );
        }
    }

    println!();
    println!("--- Daily trend ---");
    for point in &result.trend {
        println!("  {}  {:>8.2}", point.date, point.total_waste);
    }

    println!();
    println!("--- Comparisons ---");
    for cmp in &result.comparisons {
        println!("  {}", format_comparison(cmp));
    }
    println!();
}

fn format_entry(entry: &PlanEntry, width: usize) -> String {
    let qty = display_quantity(entry.unit, entry.recommended_cook_qty);
    format!(
        "{:<width$}  {:>12}  {:<6}  ({} days)",
        entry.item_name,
        format_quantity(entry.unit, qty),
        entry.confidence,
        entry.history_points_used,
        width = width
    )
}

/// Display cook recommendations.
pub fn display_plan(result: &TomorrowPlanResult, waste_ratio: f64) {
    println!();
    println!("=== Cook Plan for {} ===", result.target_date);
    println!(
        "Rough cook counts from waste history only (assumes waste is ~{:.0}% of cooked quantity).",
        waste_ratio * 100.0
    );
    println!();

    if result.items.is_empty() {
        println!("No active items.");
        println!();
        return;
    }

    let width = name_width(result.items.iter().map(|e| e.item_name.as_str()));

    for entry in &result.items {
        println!("  {}", format_entry(entry, width));
    }
    println!();
}

/// Display the item registry.
pub fn display_items(items: &[Item]) {
    if items.is_empty() {
        println!("No items registered.");
        return;
    }

    println!();
    println!("=== Items ({}) ===", items.len());
    println!();
    for item in items {
        let status = if item.active { "" } else { "  [inactive]" };
        println!("  #{:<4} {} ({}){}", item.id, item.name, item.unit, status);
    }
    println!();
}

/// Display a page of waste records.
pub fn display_waste_page(rows: &[WasteRecord], total: usize, offset: usize, items: &[Item]) {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|i| (i.id, i)).collect();

    if rows.is_empty() {
        println!("No waste records match ({} total).", total);
        return;
    }

    println!();
    println!(
        "=== Waste records {}-{} of {} ===",
        offset + 1,
        offset + rows.len(),
        total
    );
    println!();

    for row in rows {
        let (name, unit) = match by_id.get(&row.item_id) {
            Some(item) => (item.name.as_str(), item.unit),
            None => ("Unknown", Unit::Pieces),
        };
        let note = row
            .note
            .as_deref()
            .map(|n| format!("  \"{}\"", n))
            .unwrap_or_default();
        println!(
            "  {}  {:<24} {:>12}{}",
            row.date,
            name,
            format_quantity(unit, row.quantity),
            note
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quantity_pieces() {
        assert_eq!(display_quantity(Unit::Pieces, 0.0), 0.0);
        assert_eq!(display_quantity(Unit::Pieces, 0.3), 1.0);
        assert_eq!(display_quantity(Unit::Pieces, 13.4), 13.0);
        assert_eq!(display_quantity(Unit::Pieces, 13.6), 14.0);
    }

    #[test]
    fn test_display_quantity_kg() {
        assert_eq!(display_quantity(Unit::Kg, 0.02), 0.1);
        assert!((display_quantity(Unit::Kg, 2.345_6) - 2.35).abs() < 1e-9);
        assert_eq!(display_quantity(Unit::Kg, -1.0), 0.0);
    }

    #[test]
    fn test_format_comparison_without_pct() {
        let cmp = Comparison {
            label: "Today vs yesterday".to_string(),
            current_total: 2.0,
            previous_total: 0.0,
            delta: 2.0,
            delta_pct: None,
        };
        assert!(format_comparison(&cmp).ends_with("(n/a)"));
    }

    #[test]
    fn test_name_width_counts_chars() {
        let names = ["Crème brûlée", "Soup"];
        assert_eq!(name_width(names.into_iter()), 12);
        assert_eq!(name_width(std::iter::empty()), 10);

        let entry = PlanEntry {
            item_id: 1,
            item_name: "Soup".to_string(),
            unit: Unit::Pieces,
            target_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            recommended_cook_qty: 0.0,
            confidence: crate::models::Confidence::None,
            history_points_used: 0,
        };
        let wide = PlanEntry {
            item_name: "Crème brûlée".to_string(),
            ..entry.clone()
        };
        // Both rows line up when padded to the same width
        let a = format_entry(&entry, 12);
        let b = format_entry(&wide, 12);
        assert_eq!(a.chars().count(), b.chars().count());
    }
}
