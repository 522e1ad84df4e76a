use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::KitchenError;
use crate::models::{ItemId, Unit};

/// Granularity that drives the dashboard's primary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Day,
    #[default]
    Week,
    Month,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Day => "day",
            View::Week => "week",
            View::Month => "month",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(View::Day),
            "week" => Ok(View::Week),
            "month" => Ok(View::Month),
            other => Err(KitchenError::InvalidView(other.to_string())),
        }
    }
}

/// Per-item waste total within the dashboard range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTotal {
    pub item_id: ItemId,
    pub item_name: String,
    pub unit: Unit,
    pub total_waste: f64,
}

/// Total waste for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_waste: f64,
}

/// Current-vs-previous period comparison.
///
/// `delta_pct` is `None` (serialized as `null`) when the previous total is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub label: String,
    pub current_total: f64,
    pub previous_total: f64,
    pub delta: f64,
    pub delta_pct: Option<f64>,
}

/// Aggregated waste statistics for one dashboard query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResult {
    pub view: View,
    pub anchor_date: NaiveDate,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub total_waste: f64,
    pub by_item: Vec<ItemTotal>,
    pub trend: Vec<TrendPoint>,
    pub comparisons: Vec<Comparison>,
}

/// How much history backs a cook recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::None => "none",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cook recommendation for one active item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub item_id: ItemId,
    pub item_name: String,
    pub unit: Unit,
    pub target_date: NaiveDate,

    /// Full precision; rounding is left to the display layer.
    pub recommended_cook_qty: f64,

    pub confidence: Confidence,
    pub history_points_used: usize,
}

/// Cook recommendations for a single target day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TomorrowPlanResult {
    pub target_date: NaiveDate,
    pub items: Vec<PlanEntry>,
}
