use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{DashboardResult, TomorrowPlanResult};

/// Pretty JSON for any result, preserving wire field names.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write the dashboard's daily trend and per-item breakdown to CSV.
///
/// One row per trend day followed by one row per item; `kind` tells them apart.
pub fn write_dashboard_csv(result: &DashboardResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["kind", "date", "item_id", "item_name", "unit", "total_waste"])?;

    for point in &result.trend {
        wtr.write_record([
            "trend".to_string(),
            point.date.to_string(),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.3}", point.total_waste),
        ])?;
    }

    for total in &result.by_item {
        wtr.write_record([
            "item".to_string(),
            String::new(),
            total.item_id.to_string(),
            total.item_name.clone(),
            total.unit.to_string(),
            format!("{:.3}", total.total_waste),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write cook recommendations to CSV at full precision.
pub fn write_plan_csv(result: &TomorrowPlanResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "target_date",
        "item_id",
        "item_name",
        "unit",
        "recommended_cook_qty",
        "confidence",
        "history_points_used",
    ])?;

    for entry in &result.items {
        wtr.write_record([
            entry.target_date.to_string(),
            entry.item_id.to_string(),
            entry.item_name.clone(),
            entry.unit.to_string(),
            entry.recommended_cook_qty.to_string(),
            entry.confidence.to_string(),
            entry.history_points_used.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
