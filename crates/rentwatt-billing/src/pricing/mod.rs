//! Pricing module
//!
//! Turns an electricity bill into a payable amount:
//! - LateFeeAccruer: per-day overdue penalty, capped at half the bill
//! - InvoiceComposer: rent + electricity + late fees, and invoice records

pub mod invoice;
pub mod late_fee;

pub use invoice::{InvoiceComposer, RentIntegration};
pub use late_fee::LateFeeAccruer;
