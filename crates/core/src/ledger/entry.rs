//! Journal entry and line domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_shared::types::{JournalEntryId, JournalLineId, SubsidiaryAccountId, UserId};

/// Journal entry status.
///
/// The single authoritative state field. "Locked" is not a stored state:
/// it is derived from the status of the period the entry is dated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is a validated draft; no balances touched yet.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry was posted and later negated by a reversal entry (immutable).
    Reversed,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }

    /// Returns true if the entry's lines contribute to account balances.
    ///
    /// A reversed entry stays in the ledger history; its effect is negated
    /// by its reversal entry, not erased.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The business event a journal entry originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Sales invoice.
    Invoice,
    /// Payment (incoming or outgoing).
    Payment,
    /// Manually keyed journal entry.
    Manual,
    /// Adjustment entry.
    Adjustment,
    /// Opening balance entry.
    OpeningBalance,
    /// Reversal of a previous entry.
    Reversal,
}

impl SourceType {
    /// Returns the string representation of the source type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::Manual => "manual",
            Self::Adjustment => "adjustment",
            Self::OpeningBalance => "opening_balance",
            Self::Reversal => "reversal",
        }
    }
}

/// A single line of a journal entry.
///
/// Exactly one of `debit`/`credit` is strictly positive; the other is zero.
/// Lines are immutable after entry creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// The entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// Code of the account this line posts to.
    pub account_code: String,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
    /// Optional subsidiary (customer/vendor) account reference.
    pub subsidiary_id: Option<SubsidiaryAccountId>,
}

impl JournalLine {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A journal entry: a balanced set of debit and credit lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Sequential human-readable number ("JE-000001").
    pub entry_number: String,
    /// Date the entry takes effect.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Optional external reference (invoice number, receipt, ...).
    pub reference: Option<String>,
    /// Originating business event type.
    pub source_type: SourceType,
    /// Opaque link to the originating business object.
    pub source_id: Option<uuid::Uuid>,
    /// Current status.
    pub status: EntryStatus,
    /// Sum of line debits.
    pub total_debit: Decimal,
    /// Sum of line credits.
    pub total_credit: Decimal,
    /// Whether debits equal credits. Lines are immutable after creation,
    /// so this can never desynchronize.
    pub is_balanced: bool,
    /// Whether posting is gated on approval above the configured threshold.
    pub requires_approval: bool,
    /// Who approved the entry, if approved.
    pub approved_by: Option<UserId>,
    /// When the entry was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Who posted the entry.
    pub posted_by: Option<UserId>,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// The entry this one reverses (set on reversal entries).
    pub reverses_entry_id: Option<JournalEntryId>,
    /// The entry that reversed this one (set on reversed originals).
    pub reversed_by_entry_id: Option<JournalEntryId>,
    /// Who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// The entry's lines.
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Returns true if the entry can be posted (status-wise).
    #[must_use]
    pub fn can_post(&self) -> bool {
        self.status == EntryStatus::Draft && self.is_balanced
    }

    /// Returns true if the entry can be reversed (status-wise).
    ///
    /// Reversal entries are themselves immutable posted entries and cannot
    /// be un-reversed; correcting one requires a fresh entry.
    #[must_use]
    pub fn can_reverse(&self) -> bool {
        self.status == EntryStatus::Posted && self.reverses_entry_id.is_none()
    }

    /// Returns true if the entry has been approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approved_by.is_some()
    }
}
