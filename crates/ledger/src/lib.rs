//! In-memory double-entry ledger engine for Toko.
//!
//! Wires the pure logic from `toko-core` to a single shared store:
//!
//! - `registry` - chart of accounts
//! - `builder` - draft entry construction
//! - `posting` - approve / post / reverse state machine
//! - `periods` - period lifecycle (open / close / lock)
//! - `subledger` - per-entity subsidiary accounts
//! - `reports` - trial balance, balance sheet, income statement,
//!   general ledger
//! - `service` - the [`Ledger`] facade tying it all together
//!
//! Every mutating operation validates first and mutates second under
//! one write guard, so callers observe each operation as atomic.

pub mod builder;
pub mod periods;
pub mod posting;
pub mod registry;
pub mod reports;
pub mod service;
pub mod store;
pub mod subledger;

pub use builder::LedgerEntryBuilder;
pub use periods::PeriodManager;
pub use posting::PostingEngine;
pub use registry::{AccountRegistry, CreateAccountInput};
pub use reports::ReportGenerator;
pub use service::Ledger;
pub use store::LedgerStore;
pub use subledger::{RegisterSubsidiaryInput, SubledgerTracker};
