//! Core accounting logic for Toko.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping: accounts, journal entries,
//!   validation, posting rules, reversals
//! - `period` - Accounting period management
//! - `subledger` - Subsidiary (customer/vendor) account tracking
//! - `reports` - Financial report computation

pub mod ledger;
pub mod period;
pub mod reports;
pub mod subledger;
