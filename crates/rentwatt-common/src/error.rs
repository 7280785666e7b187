//! Error types for RentWatt billing
//!
//! Input validation is reported through [`crate::ValidationReport`], never
//! through these errors. They cover misconfiguration and illegal bill
//! state changes.

use thiserror::Error;

use crate::types::bill::BillStatus;

/// Result type alias using RentWattError
pub type Result<T> = std::result::Result<T, RentWattError>;

/// Unified error type for RentWatt operations
#[derive(Debug, Error)]
pub enum RentWattError {
    // Bill lifecycle errors
    #[error("Bill error: {0}")]
    Bill(#[from] BillError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Electricity bill state errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BillError {
    #[error("Bill {bill_id} is approved and can no longer be recomputed")]
    Locked { bill_id: String },

    #[error("Bill {bill_id} charge is out of range")]
    OutOfRange { bill_id: String },

    #[error("Bill {bill_id} cannot move from {from} to {to}")]
    InvalidTransition {
        bill_id: String,
        from: BillStatus,
        to: BillStatus,
    },
}
