//! Reading validation and billing
//!
//! Hard failures (negative or regressing readings, consumption outside the
//! owner's bounds) invalidate the calculation. High consumption only adds
//! an advisory message. Units and amount are returned either way so the
//! caller can show the attempted calculation next to the rejection.

use rentwatt_common::{ElectricityBill, ElectricitySettings, ValidationReport};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Priced consumption for one reading pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingCalculation {
    pub units: Decimal,
    pub amount: Decimal,
    pub rate_per_unit: Decimal,
    pub previous_reading: Decimal,
    pub current_reading: Decimal,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Result of a tenant submitting a reading
#[derive(Debug, Clone)]
pub struct Submission {
    pub calculation: ReadingCalculation,
    /// Present only when the calculation was valid
    pub bill: Option<ElectricityBill>,
}

/// Validates reading pairs and computes consumption cost
#[derive(Debug, Clone)]
pub struct ReadingBiller {
    high_usage_threshold: Decimal,
}

impl ReadingBiller {
    pub fn new(high_usage_threshold: u32) -> Self {
        Self {
            high_usage_threshold: Decimal::from(high_usage_threshold),
        }
    }

    /// Validate a reading pair and price the consumption
    #[instrument(skip(self, settings))]
    pub fn calculate(
        &self,
        previous_reading: Decimal,
        current_reading: Decimal,
        rate_per_unit: Decimal,
        settings: Option<&ElectricitySettings>,
    ) -> ReadingCalculation {
        let mut report = ValidationReport::new();

        if previous_reading < Decimal::ZERO {
            report.reject("Previous reading cannot be negative");
        }
        if current_reading < Decimal::ZERO {
            report.reject("Current reading cannot be negative");
        }
        if current_reading < previous_reading {
            report.reject("Current reading cannot be less than previous reading");
        }

        let charge =
            ElectricityBill::checked_charge(previous_reading, current_reading, rate_per_unit);
        let (units, amount) = match charge {
            Some(charge) => charge,
            None => {
                report.reject("Reading values out of range");
                (Decimal::ZERO, Decimal::ZERO)
            }
        };

        // Bounds and usage checks only mean something for a computable charge
        if charge.is_some() {
            if let Some(settings) = settings {
                if units < settings.minimum_units {
                    report.reject(format!(
                        "Consumption of {} units is below the minimum threshold of {} units",
                        units, settings.minimum_units
                    ));
                }
                if units > settings.maximum_units {
                    report.reject(format!(
                        "Consumption of {} units exceeds the maximum threshold of {} units",
                        units, settings.maximum_units
                    ));
                }
            }

            if units >= self.high_usage_threshold {
                report.warn(format!(
                    "High consumption warning: {} units is at or above {} units",
                    units, self.high_usage_threshold
                ));
            }
        }

        if report.is_valid {
            debug!(%units, %amount, "Reading accepted");
        } else {
            warn!(%units, errors = ?report.errors, "Reading rejected");
        }

        ReadingCalculation {
            units,
            amount,
            rate_per_unit,
            previous_reading,
            current_reading,
            is_valid: report.is_valid,
            errors: report.errors,
        }
    }

    /// Validate a tenant's reading and, if acceptable, open a PENDING bill.
    ///
    /// The bill is priced at `settings.rate_per_unit`.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &self,
        bill_id: impl Into<String>,
        owner_id: impl Into<String>,
        tenant_id: impl Into<String>,
        month: impl Into<String>,
        previous_reading: Decimal,
        current_reading: Decimal,
        settings: &ElectricitySettings,
    ) -> Submission {
        let calculation = self.calculate(
            previous_reading,
            current_reading,
            settings.rate_per_unit,
            Some(settings),
        );

        let bill = calculation.is_valid.then(|| {
            ElectricityBill::new(
                bill_id,
                owner_id,
                tenant_id,
                month,
                previous_reading,
                current_reading,
                settings.rate_per_unit,
            )
        });

        Submission { calculation, bill }
    }
}

impl Default for ReadingBiller {
    fn default() -> Self {
        Self::new(rentwatt_common::HIGH_USAGE_THRESHOLD_UNITS)
    }
}
