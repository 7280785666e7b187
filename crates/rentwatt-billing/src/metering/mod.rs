//! Metering module
//!
//! Turns a raw meter reading pair into a validated, priced consumption:
//! - ReadingBiller: validates readings against settings and prices them
//! - Submission: a PENDING bill built from an accepted reading

pub mod reading;

pub use reading::{ReadingBiller, ReadingCalculation, Submission};
