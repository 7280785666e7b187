//! Consumption statistics and forecasting
//!
//! Callers pass bills in chronological order (oldest first). The forecast
//! averages the last `window` approved bills of that slice:
//!
//! ```text
//! predicted_units  = round(mean)
//! predicted_amount = round(predicted_units × rate)
//! confidence       = clamp(1 - stddev / mean, 0, max_confidence)
//! ```

use rentwatt_common::ElectricityBill;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Aggregate figures over approved bills
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionStats {
    pub total_units: Decimal,
    pub average_units: Decimal,
    pub total_amount: Decimal,
    pub average_amount: Decimal,
    pub highest_consumption: Decimal,
    pub lowest_consumption: Decimal,
    /// Number of approved bills the figures cover
    pub approved_count: usize,
}

/// Next-period estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillForecast {
    pub predicted_units: Decimal,
    pub predicted_amount: Decimal,
    /// 0.0 - max_confidence
    pub confidence: f64,
}

/// Derives statistics and forecasts from bill history
#[derive(Debug, Clone)]
pub struct HistoryAnalyzer {
    min_history: usize,
    window: usize,
    max_confidence: f64,
}

impl HistoryAnalyzer {
    /// `max_confidence` is clamped to at most 0.95.
    pub fn new(min_history: usize, window: usize, max_confidence: f64) -> Self {
        Self {
            min_history,
            window: window.max(1),
            max_confidence: max_confidence.clamp(0.0, rentwatt_common::MAX_FORECAST_CONFIDENCE),
        }
    }

    /// Totals, means and extremes of units and amount over approved bills.
    ///
    /// No approved bills yields all-zero statistics.
    #[instrument(skip(self, bills), fields(bills = bills.len()))]
    pub fn consumption_stats(&self, bills: &[ElectricityBill]) -> ConsumptionStats {
        let approved: Vec<&ElectricityBill> = bills.iter().filter(|b| b.is_approved()).collect();
        if approved.is_empty() {
            return ConsumptionStats::default();
        }

        let count = Decimal::from(approved.len());
        let total_units: Decimal = approved.iter().map(|b| b.units).sum();
        let total_amount: Decimal = approved.iter().map(|b| b.amount).sum();
        let highest = approved.iter().map(|b| b.units).max().unwrap_or_default();
        let lowest = approved.iter().map(|b| b.units).min().unwrap_or_default();

        debug!(approved = approved.len(), %total_units, "Computed consumption stats");

        ConsumptionStats {
            total_units,
            average_units: total_units / count,
            total_amount,
            average_amount: total_amount / count,
            highest_consumption: highest,
            lowest_consumption: lowest,
            approved_count: approved.len(),
        }
    }

    /// Forecast the next bill from history.
    ///
    /// `bills` must be sorted ascending by period. The minimum-history
    /// check counts every bill supplied, approved or not; the averaging
    /// then uses approved bills only.
    #[instrument(skip(self, bills), fields(bills = bills.len()))]
    pub fn predict_next_bill(
        &self,
        bills: &[ElectricityBill],
        current_reading: Decimal,
        rate_per_unit: Decimal,
    ) -> BillForecast {
        if bills.len() < self.min_history {
            debug!(required = self.min_history, "Not enough history to forecast");
            return BillForecast::default();
        }

        let approved: Vec<Decimal> = bills
            .iter()
            .filter(|b| b.is_approved())
            .map(|b| b.units)
            .collect();
        let recent = &approved[approved.len().saturating_sub(self.window)..];
        if recent.is_empty() {
            return BillForecast::default();
        }

        let mean = recent.iter().copied().sum::<Decimal>() / Decimal::from(recent.len());
        let confidence = self.confidence(recent, mean);

        let predicted_units = mean.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let predicted_amount = (predicted_units * rate_per_unit)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        debug!(
            %current_reading,
            %predicted_units,
            %predicted_amount,
            confidence,
            "Forecast next bill"
        );

        BillForecast {
            predicted_units,
            predicted_amount,
            confidence,
        }
    }

    fn confidence(&self, units: &[Decimal], mean: Decimal) -> f64 {
        let mean = mean.to_f64().unwrap_or(0.0);
        if mean <= 0.0 {
            return 0.0;
        }

        let n = units.len() as f64;
        let variance = units
            .iter()
            .map(|u| {
                let diff = u.to_f64().unwrap_or(0.0) - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;

        (1.0 - variance.sqrt() / mean).clamp(0.0, self.max_confidence)
    }
}

impl Default for HistoryAnalyzer {
    fn default() -> Self {
        Self::new(
            rentwatt_common::MIN_HISTORY_BILLS,
            rentwatt_common::FORECAST_WINDOW_BILLS,
            rentwatt_common::MAX_FORECAST_CONFIDENCE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn bill(month: u32, units: Decimal, approved: bool) -> ElectricityBill {
        let mut bill = ElectricityBill::new(
            format!("b{}", month),
            "owner",
            "tenant",
            format!("2024-{:02}", month),
            dec!(1000),
            dec!(1000) + units,
            dec!(8),
        );
        if approved {
            bill.approve(Utc::now()).unwrap();
        }
        bill
    }

    #[test]
    fn test_empty_stats() {
        let analyzer = HistoryAnalyzer::default();
        assert_eq!(analyzer.consumption_stats(&[]), ConsumptionStats::default());

        let pending = vec![bill(1, dec!(100), false)];
        assert_eq!(analyzer.consumption_stats(&pending), ConsumptionStats::default());
    }

    #[test]
    fn test_stats_over_approved_only() {
        let analyzer = HistoryAnalyzer::default();
        let bills = vec![
            bill(1, dec!(100), true),
            bill(2, dec!(900), false),
            bill(3, dec!(200), true),
            bill(4, dec!(150), true),
        ];

        let stats = analyzer.consumption_stats(&bills);
        assert_eq!(stats.approved_count, 3);
        assert_eq!(stats.total_units, dec!(450));
        assert_eq!(stats.average_units, dec!(150));
        assert_eq!(stats.total_amount, dec!(3600));
        assert_eq!(stats.average_amount, dec!(1200));
        assert_eq!(stats.highest_consumption, dec!(200));
        assert_eq!(stats.lowest_consumption, dec!(100));
    }

    #[test]
    fn test_short_history_forecasts_nothing() {
        let analyzer = HistoryAnalyzer::default();
        let bills = vec![bill(1, dec!(100), true), bill(2, dec!(120), true)];
        let forecast = analyzer.predict_next_bill(&bills, dec!(1300), dec!(8));
        assert_eq!(forecast, BillForecast::default());
        assert_eq!(forecast.confidence, 0.0);
    }

    #[test]
    fn test_threshold_counts_unapproved_bills() {
        let analyzer = HistoryAnalyzer::default();
        let bills = vec![
            bill(1, dec!(100), true),
            bill(2, dec!(500), false),
            bill(3, dec!(100), false),
        ];
        let forecast = analyzer.predict_next_bill(&bills, dec!(1300), dec!(8));
        assert_eq!(forecast.predicted_units, dec!(100));
        assert_eq!(forecast.predicted_amount, dec!(800));
        // Single sample: zero spread, clamped to the ceiling
        assert_eq!(forecast.confidence, 0.95);
    }

    #[test]
    fn test_forecast_uses_last_six_approved() {
        let analyzer = HistoryAnalyzer::default();
        let mut bills = vec![bill(1, dec!(1000), true), bill(2, dec!(1000), true)];
        for (i, units) in [100, 110, 90, 100, 110, 90].iter().enumerate() {
            bills.push(bill(3 + i as u32, Decimal::from(*units), true));
        }

        let forecast = analyzer.predict_next_bill(&bills, dec!(5000), dec!(7.5));
        assert_eq!(forecast.predicted_units, dec!(100));
        assert_eq!(forecast.predicted_amount, dec!(750));

        // stddev = sqrt(200/3) ≈ 8.165, confidence ≈ 0.918
        assert!((forecast.confidence - 0.9184).abs() < 1e-3);
    }

    #[test]
    fn test_forecast_rounding() {
        let analyzer = HistoryAnalyzer::default();
        let bills = vec![
            bill(1, dec!(100), true),
            bill(2, dec!(101), true),
            bill(3, dec!(100), true),
            bill(4, dec!(101), true),
        ];
        // mean 100.5 rounds up
        let forecast = analyzer.predict_next_bill(&bills, dec!(1400), dec!(3.33));
        assert_eq!(forecast.predicted_units, dec!(101));
        // 101 × 3.33 = 336.33
        assert_eq!(forecast.predicted_amount, dec!(336));
    }

    #[test]
    fn test_confidence_ceiling_cannot_be_raised() {
        let analyzer = HistoryAnalyzer::new(3, 6, 1.0);
        let bills = vec![
            bill(1, dec!(100), true),
            bill(2, dec!(100), true),
            bill(3, dec!(100), true),
        ];
        let forecast = analyzer.predict_next_bill(&bills, dec!(1300), dec!(8));
        assert_eq!(forecast.confidence, 0.95);
    }

    #[test]
    fn test_zero_mean_has_no_confidence() {
        let analyzer = HistoryAnalyzer::default();
        let bills = vec![
            bill(1, dec!(0), true),
            bill(2, dec!(0), true),
            bill(3, dec!(0), true),
        ];
        let forecast = analyzer.predict_next_bill(&bills, dec!(1000), dec!(8));
        assert_eq!(forecast.predicted_units, Decimal::ZERO);
        assert_eq!(forecast.confidence, 0.0);
    }

    #[test]
    fn test_volatile_history_floors_at_zero() {
        let analyzer = HistoryAnalyzer::default();
        let bills = vec![
            bill(1, dec!(0), true),
            bill(2, dec!(0), true),
            bill(3, dec!(0), true),
            bill(4, dec!(600), true),
        ];
        // mean 150, stddev ≈ 259.8
        let forecast = analyzer.predict_next_bill(&bills, dec!(1600), dec!(8));
        assert_eq!(forecast.predicted_units, dec!(150));
        assert_eq!(forecast.confidence, 0.0);
    }
}
