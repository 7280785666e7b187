//! Invoice - the payable unit handed to billing/collection
//!
//! Payment and cancellation belong to the collection subsystem; this crate
//! only creates invoices in the DUE state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Due,
    Paid,
    Cancelled,
}

/// Itemized components of an invoice total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceBreakdown {
    pub base_rent: Decimal,
    pub electricity: Decimal,
    pub late_fees: Decimal,
    /// Reserved for future charges; always zero today
    pub other_charges: Decimal,
}

impl InvoiceBreakdown {
    /// Sum of all components
    #[inline]
    pub fn total(&self) -> Decimal {
        self.base_rent + self.electricity + self.late_fees + self.other_charges
    }
}

/// Payable invoice record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique per generated invoice
    pub id: Uuid,
    /// Source electricity bill
    pub bill_id: String,
    pub owner_id: String,
    pub tenant_id: String,
    pub month: String,
    /// Final payable total
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    /// Receipt number traceable to `bill_id`
    pub receipt_no: String,
    pub breakdown: InvoiceBreakdown,
}

impl Invoice {
    /// Whether the amount still agrees with the itemized breakdown
    pub fn is_balanced(&self) -> bool {
        self.breakdown.total() == self.amount
    }
}
