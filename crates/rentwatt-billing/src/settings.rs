//! Settings validation
//!
//! Guard for owner edits to [`ElectricitySettings`]. Every rule is checked
//! and every violation reported; only present fields are checked.
//!
//! [`ElectricitySettings`]: rentwatt_common::ElectricitySettings

use rentwatt_common::{SettingsPatch, ValidationReport};
use rust_decimal::Decimal;
use tracing::debug;

/// Validate a full or partial settings edit
pub fn validate_settings(patch: &SettingsPatch) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Some(rate) = patch.rate_per_unit {
        if rate <= Decimal::ZERO {
            report.reject("Rate per unit must be greater than 0");
        }
    }

    if let Some(day) = patch.due_date {
        if !(1..=31).contains(&day) {
            report.reject("Due date must be between 1 and 31");
        }
    }

    if let Some(pct) = patch.late_fee_percentage {
        if pct < Decimal::ZERO {
            report.reject("Late fee percentage cannot be negative");
        }
    }

    if let Some(min) = patch.minimum_units {
        if min < Decimal::ZERO {
            report.reject("Minimum units cannot be negative");
        }
    }

    if let Some(max) = patch.maximum_units {
        if max < Decimal::ZERO {
            report.reject("Maximum units cannot be negative");
        }
    }

    if let (Some(min), Some(max)) = (patch.minimum_units, patch.maximum_units) {
        if min > max {
            report.reject("Minimum units cannot be greater than maximum units");
        }
    }

    if !report.is_valid {
        debug!(errors = ?report.errors, "Settings rejected");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentwatt_common::ElectricitySettings;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_patch_is_valid() {
        let report = validate_settings(&SettingsPatch::default());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_full_settings_valid() {
        let settings = ElectricitySettings::new(dec!(8), 31)
            .with_late_fee(dec!(0))
            .with_bounds(dec!(0), dec!(0));
        assert!(validate_settings(&SettingsPatch::from(&settings)).is_valid);
    }

    #[test]
    fn test_collects_every_violation() {
        let patch = SettingsPatch {
            rate_per_unit: Some(dec!(0)),
            due_date: Some(32),
            late_fee_percentage: Some(dec!(-1)),
            minimum_units: Some(dec!(-5)),
            maximum_units: Some(dec!(-10)),
        };
        let report = validate_settings(&patch);
        assert!(!report.is_valid);
        // min > max is reported alongside the sign errors
        assert_eq!(report.errors.len(), 6);
    }

    #[test]
    fn test_due_date_bounds() {
        for day in [0, -3, 32] {
            let patch = SettingsPatch {
                due_date: Some(day),
                ..Default::default()
            };
            assert!(!validate_settings(&patch).is_valid, "day {}", day);
        }
        for day in [1, 15, 31] {
            let patch = SettingsPatch {
                due_date: Some(day),
                ..Default::default()
            };
            assert!(validate_settings(&patch).is_valid, "day {}", day);
        }
    }

    #[test]
    fn test_min_above_max() {
        let patch = SettingsPatch {
            minimum_units: Some(dec!(100)),
            maximum_units: Some(dec!(50)),
            ..Default::default()
        };
        let report = validate_settings(&patch);
        assert_eq!(
            report.errors,
            vec!["Minimum units cannot be greater than maximum units"]
        );

        // Only one bound present: no ordering check
        let patch = SettingsPatch {
            minimum_units: Some(dec!(100)),
            ..Default::default()
        };
        assert!(validate_settings(&patch).is_valid);
    }
}
