//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Chart of accounts nodes and balance sign conventions
//! - Journal entries and lines
//! - Entry validation (balance check, line rules)
//! - Posting/reversal state machine rules
//! - Running balance tracking
//! - Error types for ledger operations

pub mod account;
pub mod balance;
pub mod entry;
pub mod error;
pub mod posting;
pub mod reversal;
pub mod types;
pub mod validation;

#[cfg(test)]
mod reversal_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, AccountType, NormalBalance};
pub use balance::RunningBalance;
pub use entry::{EntryStatus, JournalEntry, JournalLine, SourceType};
pub use error::LedgerError;
pub use posting::{PostAction, ReverseAction, validate_post, validate_reverse};
pub use reversal::build_reversing_lines;
pub use types::{BuildEntryInput, EntryTotals, LineInput, LineSide};
pub use validation::validate_lines;
