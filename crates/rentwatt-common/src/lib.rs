//! # RentWatt Common
//!
//! Shared record shapes, errors, and the clock abstraction for RentWatt
//! electricity billing.
//!
//! ## Core Types
//!
//! - [`ElectricitySettings`]: owner-configured rate, due day and bounds
//! - [`ElectricityBill`]: one tenant-month reading submission
//! - [`Invoice`]: the payable unit handed to collection
//! - [`ValidationReport`]: structured `{is_valid, errors}` result
//!
//! ## Time
//!
//! - [`Clock`]: injectable "now", with [`SystemClock`] and [`FixedClock`]

pub mod clock;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BillError, RentWattError, Result};
pub use types::{
    bill::{BillStatus, ElectricityBill},
    invoice::{Invoice, InvoiceBreakdown, InvoiceStatus},
    settings::{ElectricitySettings, SettingsPatch},
    validation::ValidationReport,
};

/// RentWatt version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Consumption above this many units draws an advisory warning
pub const HIGH_USAGE_THRESHOLD_UNITS: u32 = 500;

/// Late fees never exceed this share of the bill (50%)
pub const LATE_FEE_CAP_RATIO: f64 = 0.50;

/// Minimum number of historical bills before a forecast is attempted
pub const MIN_HISTORY_BILLS: usize = 3;

/// Number of most-recent approved bills a forecast averages over
pub const FORECAST_WINDOW_BILLS: usize = 6;

/// Forecast confidence is never reported above this value
pub const MAX_FORECAST_CONFIDENCE: f64 = 0.95;
