//! Electricity bill - one tenant-month reading submission
//!
//! A bill is created PENDING when a tenant submits a reading pair. The
//! owner approves or rejects it outside this crate; once APPROVED its
//! computed values are frozen.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BillError;

/// Approval state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    /// Awaiting owner review
    Pending,
    /// Reading confirmed; eligible for invoicing and history
    Approved,
    /// Reading refused by the owner
    Rejected,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BillStatus::Pending => "PENDING",
            BillStatus::Approved => "APPROVED",
            BillStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Electricity consumption record for a tenant and billing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityBill {
    /// Record identifier assigned by the store
    pub id: String,
    pub owner_id: String,
    pub tenant_id: String,
    /// Billing period key (e.g. "2024-05")
    pub month: String,
    pub previous_reading: Decimal,
    pub current_reading: Decimal,
    /// current_reading - previous_reading
    pub units: Decimal,
    pub rate_per_unit: Decimal,
    /// units * rate_per_unit
    pub amount: Decimal,
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl ElectricityBill {
    /// Units and amount for a reading pair, or `None` if either overflows
    pub fn checked_charge(
        previous_reading: Decimal,
        current_reading: Decimal,
        rate_per_unit: Decimal,
    ) -> Option<(Decimal, Decimal)> {
        let units = current_reading.checked_sub(previous_reading)?;
        let amount = units.checked_mul(rate_per_unit)?;
        Some((units, amount))
    }

    /// Create a PENDING bill with units and amount derived from the readings.
    ///
    /// Readings whose charge overflows get zero units and amount.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        tenant_id: impl Into<String>,
        month: impl Into<String>,
        previous_reading: Decimal,
        current_reading: Decimal,
        rate_per_unit: Decimal,
    ) -> Self {
        let (units, amount) =
            Self::checked_charge(previous_reading, current_reading, rate_per_unit)
                .unwrap_or_default();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            tenant_id: tenant_id.into(),
            month: month.into(),
            previous_reading,
            current_reading,
            units,
            rate_per_unit,
            amount,
            status: BillStatus::Pending,
            approved_at: None,
        }
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status == BillStatus::Approved
    }

    /// Mark a pending bill approved at `at`
    pub fn approve(&mut self, at: DateTime<Utc>) -> Result<(), BillError> {
        self.transition(BillStatus::Approved)?;
        self.approved_at = Some(at);
        Ok(())
    }

    /// Mark a pending bill rejected
    pub fn reject(&mut self) -> Result<(), BillError> {
        self.transition(BillStatus::Rejected)
    }

    /// Re-price the bill at a new rate.
    ///
    /// Approved bills are frozen and refuse recomputation.
    pub fn recompute(&mut self, rate_per_unit: Decimal) -> Result<(), BillError> {
        if self.is_approved() {
            return Err(BillError::Locked {
                bill_id: self.id.clone(),
            });
        }
        let (units, amount) =
            Self::checked_charge(self.previous_reading, self.current_reading, rate_per_unit)
                .ok_or_else(|| BillError::OutOfRange {
                    bill_id: self.id.clone(),
                })?;
        self.units = units;
        self.rate_per_unit = rate_per_unit;
        self.amount = amount;
        Ok(())
    }

    fn transition(&mut self, to: BillStatus) -> Result<(), BillError> {
        if self.status != BillStatus::Pending {
            return Err(BillError::InvalidTransition {
                bill_id: self.id.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
