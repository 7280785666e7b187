//! Invoice composition
//!
//! Merges base rent, electricity cost and late fees into one payable
//! total:
//!
//! ```text
//! final = base_rent + electricity + late_fees + other_charges
//! ```
//!
//! Late fees accrue only for APPROVED bills when settings are supplied.

use chrono::{Datelike, NaiveDate};
use rentwatt_common::{
    Clock, ElectricityBill, ElectricitySettings, Invoice, InvoiceBreakdown, InvoiceStatus,
    SystemClock,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::late_fee::LateFeeAccruer;

/// Rent and electricity combined into one billable amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentIntegration {
    /// Base rent plus electricity, before late fees
    pub total_rent: Decimal,
    pub electricity_amount: Decimal,
    pub final_amount: Decimal,
    pub breakdown: InvoiceBreakdown,
}

/// Builds rent integrations and invoice records
#[derive(Debug, Clone)]
pub struct InvoiceComposer<C = SystemClock> {
    accruer: LateFeeAccruer,
    clock: C,
    receipt_prefix: String,
}

impl InvoiceComposer<SystemClock> {
    pub fn new(accruer: LateFeeAccruer) -> Self {
        Self::with_clock(accruer, SystemClock)
    }
}

impl<C: Clock> InvoiceComposer<C> {
    pub fn with_clock(accruer: LateFeeAccruer, clock: C) -> Self {
        Self {
            accruer,
            clock,
            receipt_prefix: "ELEC".to_string(),
        }
    }

    /// Set the receipt number prefix
    pub fn with_receipt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.receipt_prefix = prefix.into();
        self
    }

    /// Combine rent and an electricity bill, deriving the due date from
    /// `settings.due_date`.
    ///
    /// The derived due date never lies in the past, so this path only
    /// accrues late fees through [`Self::integrate_against`].
    #[instrument(skip(self, bill, settings), fields(bill_id = %bill.id))]
    pub fn integrate_with_rent(
        &self,
        base_rent: Decimal,
        bill: &ElectricityBill,
        settings: Option<&ElectricitySettings>,
    ) -> RentIntegration {
        let today = self.clock.today();
        self.integrate_on(base_rent, bill, settings, today)
    }

    /// Combine rent and an electricity bill against a known due date,
    /// e.g. when re-issuing an invoice that is already outstanding.
    #[instrument(skip(self, bill, settings), fields(bill_id = %bill.id))]
    pub fn integrate_against(
        &self,
        base_rent: Decimal,
        bill: &ElectricityBill,
        settings: Option<&ElectricitySettings>,
        due_date: NaiveDate,
    ) -> RentIntegration {
        let today = self.clock.today();
        let late_fees = self.late_fees(bill, settings, due_date, today);
        Self::compose(base_rent, bill, late_fees)
    }

    /// Materialize a DUE invoice for `bill` plus `base_rent`.
    ///
    /// Without settings the invoice falls due today.
    #[instrument(skip(self, bill, settings), fields(bill_id = %bill.id))]
    pub fn generate_invoice(
        &self,
        bill: &ElectricityBill,
        base_rent: Decimal,
        settings: Option<&ElectricitySettings>,
    ) -> Invoice {
        let today = self.clock.today();
        let integration = self.integrate_on(base_rent, bill, settings, today);
        let due_date = settings
            .map(|s| derive_due_date(s.due_date, today))
            .unwrap_or(today);

        let id = Uuid::now_v7();
        let receipt_no = self.receipt_number(bill, &id);

        info!(
            invoice_id = %id,
            %receipt_no,
            amount = %integration.final_amount,
            %due_date,
            "Generated electricity invoice"
        );

        Invoice {
            id,
            bill_id: bill.id.clone(),
            owner_id: bill.owner_id.clone(),
            tenant_id: bill.tenant_id.clone(),
            month: bill.month.clone(),
            amount: integration.final_amount,
            status: InvoiceStatus::Due,
            due_date,
            receipt_no,
            breakdown: integration.breakdown,
        }
    }

    fn integrate_on(
        &self,
        base_rent: Decimal,
        bill: &ElectricityBill,
        settings: Option<&ElectricitySettings>,
        today: NaiveDate,
    ) -> RentIntegration {
        let late_fees = match settings {
            Some(s) => self.late_fees(bill, settings, derive_due_date(s.due_date, today), today),
            None => Decimal::ZERO,
        };
        Self::compose(base_rent, bill, late_fees)
    }

    fn late_fees(
        &self,
        bill: &ElectricityBill,
        settings: Option<&ElectricitySettings>,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> Decimal {
        match settings {
            Some(s) if bill.is_approved() => {
                self.accruer
                    .calculate(bill.amount, due_date, s.late_fee_percentage, today)
            }
            _ => {
                debug!(status = %bill.status, "No late fees for bill");
                Decimal::ZERO
            }
        }
    }

    fn compose(base_rent: Decimal, bill: &ElectricityBill, late_fees: Decimal) -> RentIntegration {
        let breakdown = InvoiceBreakdown {
            base_rent,
            electricity: bill.amount,
            late_fees,
            other_charges: Decimal::ZERO,
        };

        RentIntegration {
            total_rent: base_rent + bill.amount,
            electricity_amount: bill.amount,
            final_amount: breakdown.total(),
            breakdown,
        }
    }

    fn receipt_number(&self, bill: &ElectricityBill, invoice_id: &Uuid) -> String {
        // Trailing random bits of the v7 id keep re-issued receipts distinct
        let suffix = invoice_id.simple().to_string();
        format!(
            "{}-{}-{}",
            self.receipt_prefix,
            bill.id,
            &suffix[suffix.len() - 8..]
        )
    }
}

/// Next occurrence of `day` on or after `today`.
///
/// Days past the end of a month clamp to its last day.
fn derive_due_date(day: u32, today: NaiveDate) -> NaiveDate {
    let this_month = day_in_month(today.year(), today.month(), day);
    if this_month >= today {
        return this_month;
    }

    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    day_in_month(year, month, day)
}

fn day_in_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
