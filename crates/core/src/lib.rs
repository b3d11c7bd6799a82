//! Domain logic for the Crestline Builders back office.
//!
//! This crate contains no database or HTTP dependencies beyond the sqlx
//! type derives on the status enums; all data is passed in by the caller.

pub mod dashboard;
pub mod error;
pub mod quotation;
pub mod roles;
pub mod status;
pub mod types;
