//! Owner-configured electricity settings
//!
//! Settings are created and edited by the property owner elsewhere; the
//! billing engines only read them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Electricity billing configuration for one property owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricitySettings {
    /// Currency per unit (> 0)
    pub rate_per_unit: Decimal,
    /// Day of month payment falls due (1-31)
    pub due_date: u32,
    /// Late-fee percentage applied per day overdue (>= 0)
    pub late_fee_percentage: Decimal,
    /// Lowest plausible monthly consumption
    pub minimum_units: Decimal,
    /// Highest plausible monthly consumption
    pub maximum_units: Decimal,
}

impl ElectricitySettings {
    pub fn new(rate_per_unit: Decimal, due_date: u32) -> Self {
        Self {
            rate_per_unit,
            due_date,
            late_fee_percentage: Decimal::ZERO,
            minimum_units: Decimal::ZERO,
            maximum_units: Decimal::MAX,
        }
    }

    /// Set the per-day late-fee percentage
    pub fn with_late_fee(mut self, percentage: Decimal) -> Self {
        self.late_fee_percentage = percentage;
        self
    }

    /// Set the consumption sanity bounds
    pub fn with_bounds(mut self, minimum_units: Decimal, maximum_units: Decimal) -> Self {
        self.minimum_units = minimum_units;
        self.maximum_units = maximum_units;
        self
    }
}

/// Partial settings edit; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_per_unit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_fee_percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_units: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_units: Option<Decimal>,
}

impl SettingsPatch {
    /// Overlay the present fields onto `settings`.
    ///
    /// Callers validate the patch first; a due day that does not fit in
    /// `u32` is ignored.
    pub fn apply(&self, settings: &mut ElectricitySettings) {
        if let Some(rate) = self.rate_per_unit {
            settings.rate_per_unit = rate;
        }
        if let Some(day) = self.due_date.and_then(|d| u32::try_from(d).ok()) {
            settings.due_date = day;
        }
        if let Some(pct) = self.late_fee_percentage {
            settings.late_fee_percentage = pct;
        }
        if let Some(min) = self.minimum_units {
            settings.minimum_units = min;
        }
        if let Some(max) = self.maximum_units {
            settings.maximum_units = max;
        }
    }
}

impl From<&ElectricitySettings> for SettingsPatch {
    fn from(settings: &ElectricitySettings) -> Self {
        Self {
            rate_per_unit: Some(settings.rate_per_unit),
            due_date: Some(i64::from(settings.due_date)),
            late_fee_percentage: Some(settings.late_fee_percentage),
            minimum_units: Some(settings.minimum_units),
            maximum_units: Some(settings.maximum_units),
        }
    }
}
