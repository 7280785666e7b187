//! Core record types for RentWatt billing

pub mod bill;
pub mod invoice;
pub mod settings;
pub mod validation;
