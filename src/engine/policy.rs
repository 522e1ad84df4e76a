use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::constants::*;
use crate::error::{KitchenError, Result};
use crate::models::{Confidence, ItemId};

/// How the representative daily waste is estimated from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    /// Mean over the distinct recorded days of the lookback window.
    #[default]
    TrailingMean,
    /// Mean of recent days sharing the target's weekday, falling back to
    /// the trailing mean when too few exist.
    SameWeekday,
}

/// Runtime-configurable forecasting policy.
///
/// Every field falls back to its default when missing from a policy file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPolicy {
    /// Fraction of cooked quantity assumed to be wasted.
    pub waste_ratio: f64,

    /// Per-item overrides of `waste_ratio`.
    pub item_ratios: BTreeMap<ItemId, f64>,

    /// Trailing window length, ending the day before the target date.
    pub lookback_days: u32,

    pub low_min_points: usize,
    pub medium_min_points: usize,
    pub high_min_points: usize,

    pub estimator: Estimator,
    pub weekday_occurrences: usize,
    pub weekday_min_points: usize,
    pub weekday_horizon_days: u32,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            waste_ratio: DEFAULT_WASTE_RATIO,
            item_ratios: BTreeMap::new(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            low_min_points: LOW_MIN_POINTS,
            medium_min_points: MEDIUM_MIN_POINTS,
            high_min_points: HIGH_MIN_POINTS,
            estimator: Estimator::default(),
            weekday_occurrences: WEEKDAY_OCCURRENCES,
            weekday_min_points: WEEKDAY_MIN_POINTS,
            weekday_horizon_days: WEEKDAY_HORIZON_DAYS,
        }
    }
}

fn valid_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0 && ratio <= 1.0
}

impl ForecastPolicy {
    /// Waste ratio in effect for an item.
    pub fn ratio_for(&self, item_id: ItemId) -> f64 {
        self.item_ratios
            .get(&item_id)
            .copied()
            .unwrap_or(self.waste_ratio)
    }

    /// Map a count of history points to a confidence tier.
    pub fn confidence_for(&self, points: usize) -> Confidence {
        if points >= self.high_min_points {
            Confidence::High
        } else if points >= self.medium_min_points {
            Confidence::Medium
        } else if points >= self.low_min_points {
            Confidence::Low
        } else {
            Confidence::None
        }
    }

    /// Reject policies the forecaster cannot apply.
    pub fn validate(&self) -> Result<()> {
        if !valid_ratio(self.waste_ratio) {
            return Err(KitchenError::InvalidPolicy(format!(
                "waste_ratio must be in (0, 1], got {}",
                self.waste_ratio
            )));
        }

        if let Some((id, ratio)) = self.item_ratios.iter().find(|(_, r)| !valid_ratio(**r)) {
            return Err(KitchenError::InvalidPolicy(format!(
                "ratio for item {} must be in (0, 1], got {}",
                id, ratio
            )));
        }

        if self.lookback_days == 0 {
            return Err(KitchenError::InvalidPolicy(
                "lookback_days must be at least 1".to_string(),
            ));
        }

        if self.weekday_horizon_days == 0 {
            return Err(KitchenError::InvalidPolicy(
                "weekday_horizon_days must be at least 1".to_string(),
            ));
        }

        if self.low_min_points == 0
            || self.medium_min_points <= self.low_min_points
            || self.high_min_points <= self.medium_min_points
        {
            return Err(KitchenError::InvalidPolicy(format!(
                "confidence thresholds must satisfy 0 < low < medium < high, got {}/{}/{}",
                self.low_min_points, self.medium_min_points, self.high_min_points
            )));
        }

        if self.estimator == Estimator::SameWeekday
            && (self.weekday_occurrences == 0
                || self.weekday_min_points == 0
                || self.weekday_min_points > self.weekday_occurrences)
        {
            return Err(KitchenError::InvalidPolicy(
                "weekday_min_points must be between 1 and weekday_occurrences".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let policy = ForecastPolicy::default();
        assert_eq!(policy.confidence_for(0), Confidence::None);
        assert_eq!(policy.confidence_for(1), Confidence::Low);
        assert_eq!(policy.confidence_for(2), Confidence::Low);
        assert_eq!(policy.confidence_for(3), Confidence::Medium);
        assert_eq!(policy.confidence_for(6), Confidence::Medium);
        assert_eq!(policy.confidence_for(7), Confidence::High);
        assert_eq!(policy.confidence_for(14), Confidence::High);
    }

    #[test]
    fn test_item_ratio_override() {
        let mut policy = ForecastPolicy::default();
        policy.item_ratios.insert(2, 0.25);
        assert!((policy.ratio_for(1) - DEFAULT_WASTE_RATIO).abs() < 1e-12);
        assert!((policy.ratio_for(2) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_zero_ratio() {
        let policy = ForecastPolicy {
            waste_ratio: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(KitchenError::InvalidPolicy(_))
        ));

        let mut per_item = ForecastPolicy::default();
        per_item.item_ratios.insert(4, f64::NAN);
        assert!(per_item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unordered_thresholds() {
        let policy = ForecastPolicy {
            medium_min_points: 7,
            high_min_points: 7,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
        assert!(ForecastPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_windows() {
        let no_lookback = ForecastPolicy {
            lookback_days: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_lookback.validate(),
            Err(KitchenError::InvalidPolicy(_))
        ));

        let no_horizon = ForecastPolicy {
            weekday_horizon_days: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_horizon.validate(),
            Err(KitchenError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_partial_policy_json_uses_defaults() {
        let policy: ForecastPolicy =
            serde_json::from_str(r#"{"waste_ratio": 0.2, "item_ratios": {"3": 0.1}}"#).unwrap();
        assert!((policy.waste_ratio - 0.2).abs() < 1e-12);
        assert_eq!(policy.lookback_days, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(policy.estimator, Estimator::TrailingMean);
        assert!((policy.ratio_for(3) - 0.1).abs() < 1e-12);
    }
}
