//! # RentWatt Billing
//!
//! Electricity billing core: turns meter readings into priced consumption,
//! folds it into rent with late-fee accrual, and forecasts from history.
//!
//! ## Invoice Formula
//!
//! ```text
//! units   = current - previous
//! amount  = units × rate
//! final   = base_rent + amount + late_fees + other_charges
//! ```
//!
//! Where late fees accrue only on APPROVED bills:
//! - per day overdue: amount × pct / 100
//! - capped at 50% of amount
//!
//! All calculations are synchronous and hold no shared state. "Now" comes
//! from an injected [`Clock`].

pub mod config;
pub mod history;
pub mod metering;
pub mod pricing;
pub mod settings;

pub use config::BillingConfig;
pub use history::{BillForecast, ConsumptionStats, HistoryAnalyzer};
pub use metering::{ReadingBiller, ReadingCalculation, Submission};
pub use pricing::{InvoiceComposer, LateFeeAccruer, RentIntegration};
pub use settings::validate_settings;

use chrono::NaiveDate;
use rentwatt_common::{
    Clock, ElectricityBill, ElectricitySettings, Invoice, RentWattError, Result, SettingsPatch,
    SystemClock, ValidationReport,
};
use rust_decimal::Decimal;

/// RentWatt billing service
pub struct RentWatt<C = SystemClock> {
    config: BillingConfig,
    clock: C,
    biller: ReadingBiller,
    accruer: LateFeeAccruer,
    composer: InvoiceComposer<C>,
    analyzer: HistoryAnalyzer,
}

impl RentWatt<SystemClock> {
    pub fn new(config: BillingConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Build from `.env` / `RENTWATT_*` configuration
    pub fn from_env() -> Result<Self> {
        let config = BillingConfig::load().map_err(|e| RentWattError::Config(e.to_string()))?;
        Ok(Self::new(config))
    }
}

impl<C: Clock + Clone> RentWatt<C> {
    pub fn with_clock(config: BillingConfig, clock: C) -> Self {
        let accruer = LateFeeAccruer::new(config.late_fee_cap_ratio);
        let composer = InvoiceComposer::with_clock(accruer.clone(), clock.clone())
            .with_receipt_prefix(config.receipt_prefix.clone());

        Self {
            biller: ReadingBiller::new(config.high_usage_threshold),
            analyzer: HistoryAnalyzer::new(
                config.min_history_bills,
                config.forecast_window,
                config.max_confidence,
            ),
            accruer,
            composer,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Validate a reading pair and price it
    pub fn calculate_bill(
        &self,
        previous_reading: Decimal,
        current_reading: Decimal,
        rate_per_unit: Decimal,
        settings: Option<&ElectricitySettings>,
    ) -> ReadingCalculation {
        self.biller
            .calculate(previous_reading, current_reading, rate_per_unit, settings)
    }

    /// Validate a tenant's reading and open a PENDING bill if acceptable
    #[allow(clippy::too_many_arguments)]
    pub fn submit_reading(
        &self,
        bill_id: impl Into<String>,
        owner_id: impl Into<String>,
        tenant_id: impl Into<String>,
        month: impl Into<String>,
        previous_reading: Decimal,
        current_reading: Decimal,
        settings: &ElectricitySettings,
    ) -> Submission {
        self.biller.submit(
            bill_id,
            owner_id,
            tenant_id,
            month,
            previous_reading,
            current_reading,
            settings,
        )
    }

    /// Re-price a bill at the owner's current rate.
    ///
    /// Fails for APPROVED bills, whose amounts are frozen.
    pub fn reprice_bill(
        &self,
        bill: &mut ElectricityBill,
        settings: &ElectricitySettings,
    ) -> Result<()> {
        bill.recompute(settings.rate_per_unit)?;
        Ok(())
    }

    /// Late fee owed today on `bill_amount`
    pub fn calculate_late_fees(
        &self,
        bill_amount: Decimal,
        due_date: NaiveDate,
        late_fee_percentage: Decimal,
    ) -> Decimal {
        self.accruer
            .calculate(bill_amount, due_date, late_fee_percentage, self.clock.today())
    }

    /// Combine base rent with an electricity bill
    pub fn integrate_with_rent(
        &self,
        base_rent: Decimal,
        bill: &ElectricityBill,
        settings: Option<&ElectricitySettings>,
    ) -> RentIntegration {
        self.composer.integrate_with_rent(base_rent, bill, settings)
    }

    /// Combine base rent with an electricity bill owed since `due_date`
    pub fn integrate_against(
        &self,
        base_rent: Decimal,
        bill: &ElectricityBill,
        settings: Option<&ElectricitySettings>,
        due_date: NaiveDate,
    ) -> RentIntegration {
        self.composer
            .integrate_against(base_rent, bill, settings, due_date)
    }

    /// Materialize a DUE invoice for a bill plus base rent
    pub fn generate_electricity_invoice(
        &self,
        bill: &ElectricityBill,
        base_rent: Decimal,
        settings: Option<&ElectricitySettings>,
    ) -> Invoice {
        self.composer.generate_invoice(bill, base_rent, settings)
    }

    /// Statistics over approved bills
    pub fn consumption_stats(&self, bills: &[ElectricityBill]) -> ConsumptionStats {
        self.analyzer.consumption_stats(bills)
    }

    /// Forecast the next bill; `bills` must be sorted oldest first
    pub fn predict_next_bill(
        &self,
        bills: &[ElectricityBill],
        current_reading: Decimal,
        rate_per_unit: Decimal,
    ) -> BillForecast {
        self.analyzer
            .predict_next_bill(bills, current_reading, rate_per_unit)
    }

    /// Validate an owner's settings edit
    pub fn validate_settings(&self, patch: &SettingsPatch) -> ValidationReport {
        validate_settings(patch)
    }
}

impl Default for RentWatt<SystemClock> {
    fn default() -> Self {
        Self::new(BillingConfig::default())
    }
}
