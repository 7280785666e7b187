//! History module
//!
//! Statistics and a next-period forecast over a tenant's bill history.
//! Only APPROVED bills contribute to the figures.

pub mod analyzer;

pub use analyzer::{BillForecast, ConsumptionStats, HistoryAnalyzer};
