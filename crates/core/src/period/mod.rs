//! Accounting period management.
//!
//! Periods gate posting by date: an entry may only post into an `Open`
//! period. Closing is reversible (reopen); locking is not. Once a period
//! is locked, no entry dated within it may ever be posted, reversed, or
//! edited again.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use toko_shared::types::{PeriodId, UserId};

use crate::ledger::error::LedgerError;

/// Status of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed; no new postings, but may be reopened.
    Closed,
    /// Period is locked; permanently frozen.
    Locked,
}

impl PeriodStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Locked => "locked",
        }
    }

    /// Returns true if the period accepts new postings.
    #[must_use]
    pub fn allows_posting(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// Period name (e.g. "March 2026").
    pub name: String,
    /// Start date (inclusive).
    pub start_date: NaiveDate,
    /// End date (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
    /// Who closed the period.
    pub closed_by: Option<UserId>,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Who locked the period.
    pub locked_by: Option<UserId>,
    /// When the period was locked.
    pub locked_at: Option<DateTime<Utc>>,
}

impl AccountingPeriod {
    /// Creates a new open period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodRange` if `start_date > end_date`.
    pub fn new(name: String, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, LedgerError> {
        validate_date_range(start_date, end_date)?;
        Ok(Self {
            id: PeriodId::new(),
            name,
            start_date,
            end_date,
            status: PeriodStatus::Open,
            closed_by: None,
            closed_at: None,
            locked_by: None,
            locked_at: None,
        })
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if this period's dates intersect another's.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        date_ranges_overlap(self.start_date, self.end_date, start, end)
    }

    /// Validates and applies the Open -> Closed transition.
    ///
    /// The caller must first check that no draft entries are dated inside
    /// the period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodTransition` if the period is not open.
    pub fn close(&mut self, actor: UserId) -> Result<(), LedgerError> {
        if self.status != PeriodStatus::Open {
            return Err(LedgerError::InvalidPeriodTransition {
                from: self.status.to_string(),
                to: PeriodStatus::Closed.to_string(),
            });
        }
        self.status = PeriodStatus::Closed;
        self.closed_by = Some(actor);
        self.closed_at = Some(Utc::now());
        Ok(())
    }

    /// Validates and applies the Closed -> Open transition.
    ///
    /// A locked period can never be reopened.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodTransition` if the period is not closed.
    pub fn reopen(&mut self) -> Result<(), LedgerError> {
        if self.status != PeriodStatus::Closed {
            return Err(LedgerError::InvalidPeriodTransition {
                from: self.status.to_string(),
                to: PeriodStatus::Open.to_string(),
            });
        }
        self.status = PeriodStatus::Open;
        self.closed_by = None;
        self.closed_at = None;
        Ok(())
    }

    /// Validates and applies the Closed -> Locked transition.
    ///
    /// Irreversible: there is no transition out of `Locked`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodTransition` if the period is not closed.
    pub fn lock(&mut self, actor: UserId) -> Result<(), LedgerError> {
        if self.status != PeriodStatus::Closed {
            return Err(LedgerError::InvalidPeriodTransition {
                from: self.status.to_string(),
                to: PeriodStatus::Locked.to_string(),
            });
        }
        self.status = PeriodStatus::Locked;
        self.locked_by = Some(actor);
        self.locked_at = Some(Utc::now());
        Ok(())
    }

    /// Checks that the period accepts a new posting.
    ///
    /// # Errors
    ///
    /// Returns `PeriodLocked` or `PeriodClosed`.
    pub fn validate_posting_allowed(&self) -> Result<(), LedgerError> {
        match self.status {
            PeriodStatus::Open => Ok(()),
            PeriodStatus::Closed => Err(LedgerError::PeriodClosed),
            PeriodStatus::Locked => Err(LedgerError::PeriodLocked),
        }
    }

    /// Checks that an entry dated in this period may be reversed.
    ///
    /// Reversal mutates the original entry's status, so a locked period
    /// forbids it. A merely closed period also rejects reversal because
    /// the reversal entry would have to post into it.
    ///
    /// # Errors
    ///
    /// Returns `PeriodLocked` or `PeriodClosed`.
    pub fn validate_reversal_allowed(&self) -> Result<(), LedgerError> {
        match self.status {
            PeriodStatus::Open => Ok(()),
            PeriodStatus::Closed => Err(LedgerError::PeriodClosed),
            PeriodStatus::Locked => Err(LedgerError::PeriodLocked),
        }
    }
}

/// Validates that a start/end pair forms a proper range.
///
/// # Errors
///
/// Returns `InvalidPeriodRange` if `start > end`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), LedgerError> {
    if start > end {
        return Err(LedgerError::InvalidPeriodRange);
    }
    Ok(())
}

/// Returns true if two inclusive date ranges intersect.
#[must_use]
pub fn date_ranges_overlap(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> bool {
    start_a <= end_b && start_b <= end_a
}
