/// Assumed fraction of cooked quantity that ends up wasted.
pub const DEFAULT_WASTE_RATIO: f64 = 0.15;

/// Days of history (ending the day before the target) the forecaster reads.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 14;

// ─────────────────────────────────────────────────────────────────────────────
// Confidence tiers (minimum distinct history days per tier)
// ─────────────────────────────────────────────────────────────────────────────

/// Fewer points than this means no confidence at all.
pub const LOW_MIN_POINTS: usize = 1;

pub const MEDIUM_MIN_POINTS: usize = 3;

pub const HIGH_MIN_POINTS: usize = 7;

// ─────────────────────────────────────────────────────────────────────────────
// Same-weekday estimator
// ─────────────────────────────────────────────────────────────────────────────

/// How many recent same-weekday observations are averaged.
pub const WEEKDAY_OCCURRENCES: usize = 4;

/// Minimum same-weekday observations before the weekday estimate is trusted.
pub const WEEKDAY_MIN_POINTS: usize = 2;

/// How far back same-weekday observations are searched.
pub const WEEKDAY_HORIZON_DAYS: u32 = 90;

// ─────────────────────────────────────────────────────────────────────────────
// Period lengths
// ─────────────────────────────────────────────────────────────────────────────

pub const DAY_PERIOD_DAYS: u32 = 1;

pub const WEEK_PERIOD_DAYS: u32 = 7;

/// Fixed-length month so that period-over-period percentages stay comparable.
pub const MONTH_PERIOD_DAYS: u32 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Comparison labels
// ─────────────────────────────────────────────────────────────────────────────

pub const DAY_COMPARISON_LABEL: &str = "Today vs yesterday";

pub const WEEK_COMPARISON_LABEL: &str = "This week vs last week";

pub const MONTH_COMPARISON_LABEL: &str = "This month vs last month";
