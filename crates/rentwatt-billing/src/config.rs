//! Billing configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for the billing engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Units at or above which a reading draws an advisory warning
    pub high_usage_threshold: u32,
    /// Maximum late fee as a share of the bill (0.0 - 0.5)
    pub late_fee_cap_ratio: f64,
    /// Bills required before a forecast is attempted
    pub min_history_bills: usize,
    /// Most-recent approved bills averaged by a forecast
    pub forecast_window: usize,
    /// Ceiling on reported forecast confidence (0.0 - 0.95)
    pub max_confidence: f64,
    /// Prefix for generated receipt numbers
    pub receipt_prefix: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            high_usage_threshold: rentwatt_common::HIGH_USAGE_THRESHOLD_UNITS,
            late_fee_cap_ratio: rentwatt_common::LATE_FEE_CAP_RATIO,
            min_history_bills: rentwatt_common::MIN_HISTORY_BILLS,
            forecast_window: rentwatt_common::FORECAST_WINDOW_BILLS,
            max_confidence: rentwatt_common::MAX_FORECAST_CONFIDENCE,
            receipt_prefix: "ELEC".to_string(),
        }
    }
}

impl BillingConfig {
    /// Load configuration from `.env` and `RENTWATT_*` variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("RENTWATT_HIGH_USAGE_THRESHOLD") {
            if let Ok(v) = val.parse() {
                cfg.high_usage_threshold = v;
            }
        }
        if let Ok(val) = std::env::var("RENTWATT_LATE_FEE_CAP_RATIO") {
            if let Ok(v) = val.parse() {
                cfg.late_fee_cap_ratio = v;
            }
        }
        if let Ok(val) = std::env::var("RENTWATT_MIN_HISTORY_BILLS") {
            if let Ok(v) = val.parse() {
                cfg.min_history_bills = v;
            }
        }
        if let Ok(val) = std::env::var("RENTWATT_FORECAST_WINDOW") {
            if let Ok(v) = val.parse() {
                cfg.forecast_window = v;
            }
        }
        if let Ok(val) = std::env::var("RENTWATT_MAX_CONFIDENCE") {
            if let Ok(v) = val.parse() {
                cfg.max_confidence = v;
            }
        }
        if let Ok(prefix) = std::env::var("RENTWATT_RECEIPT_PREFIX") {
            cfg.receipt_prefix = prefix;
        }

        cfg.check()?;
        Ok(cfg)
    }

    /// Reject values that would break billing invariants
    pub fn check(&self) -> Result<()> {
        let cap_limit = rentwatt_common::LATE_FEE_CAP_RATIO;
        if !(0.0..=cap_limit).contains(&self.late_fee_cap_ratio) {
            bail!(
                "late_fee_cap_ratio must be within [0, {}], got {}",
                cap_limit,
                self.late_fee_cap_ratio
            );
        }
        let confidence_limit = rentwatt_common::MAX_FORECAST_CONFIDENCE;
        if !(0.0..=confidence_limit).contains(&self.max_confidence) {
            bail!(
                "max_confidence must be within [0, {}], got {}",
                confidence_limit,
                self.max_confidence
            );
        }
        if self.forecast_window == 0 {
            bail!("forecast_window must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_constants() {
        let cfg = BillingConfig::default();
        assert_eq!(cfg.high_usage_threshold, 500);
        assert_eq!(cfg.late_fee_cap_ratio, 0.5);
        assert_eq!(cfg.min_history_bills, 3);
        assert_eq!(cfg.forecast_window, 6);
        assert_eq!(cfg.max_confidence, 0.95);
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn test_check_rejects_full_confidence() {
        let cfg = BillingConfig {
            max_confidence: 1.0,
            ..Default::default()
        };
        assert!(cfg.check().is_err());

        let cfg = BillingConfig {
            max_confidence: 0.9,
            ..Default::default()
        };
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn test_check_rejects_bad_cap() {
        let cfg = BillingConfig {
            late_fee_cap_ratio: 1.5,
            ..Default::default()
        };
        assert!(cfg.check().is_err());

        let cfg = BillingConfig {
            late_fee_cap_ratio: 1.0,
            ..Default::default()
        };
        assert!(cfg.check().is_err());

        let cfg = BillingConfig {
            late_fee_cap_ratio: 0.25,
            ..Default::default()
        };
        assert!(cfg.check().is_ok());

        let cfg = BillingConfig {
            forecast_window: 0,
            ..Default::default()
        };
        assert!(cfg.check().is_err());
    }
}
