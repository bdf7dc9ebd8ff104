//! Financial report computation.
//!
//! Pure read-side logic: the engine gathers posted-line sums from its
//! store and hands them to [`service::ReportService`], which assembles
//! the reports and enforces the integrity checks.

pub mod service;
pub mod types;

pub use service::{CURRENT_EARNINGS_NAME, ReportService};
pub use types::{
    AccountActivityRow, AccountBalanceRow, BalanceSheetReport, BalanceSheetSection,
    GeneralLedgerReport,
    GeneralLedgerRow, IncomeStatementReport, IncomeStatementSection, TrialBalanceReport,
};
