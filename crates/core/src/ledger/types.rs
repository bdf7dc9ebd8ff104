//! Input types for journal entry construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_shared::types::{SubsidiaryAccountId, UserId};

use super::entry::SourceType;

/// Which side of the ledger a line posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSide {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

/// Input for a single journal line.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// Code of the account to post to.
    pub account_code: String,
    /// Debit or credit.
    pub side: LineSide,
    /// Amount (must be strictly positive).
    pub amount: Decimal,
    /// Optional line description.
    pub description: Option<String>,
    /// Optional subsidiary account reference.
    pub subsidiary_id: Option<SubsidiaryAccountId>,
}

impl LineInput {
    /// Convenience constructor for a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            side: LineSide::Debit,
            amount,
            description: None,
            subsidiary_id: None,
        }
    }

    /// Convenience constructor for a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            side: LineSide::Credit,
            amount,
            description: None,
            subsidiary_id: None,
        }
    }

    /// Tags the line with a subsidiary account.
    #[must_use]
    pub fn with_subsidiary(mut self, subsidiary_id: SubsidiaryAccountId) -> Self {
        self.subsidiary_id = Some(subsidiary_id);
        self
    }

    /// Returns the (debit, credit) pair for this line.
    #[must_use]
    pub fn amounts(&self) -> (Decimal, Decimal) {
        match self.side {
            LineSide::Debit => (self.amount, Decimal::ZERO),
            LineSide::Credit => (Decimal::ZERO, self.amount),
        }
    }
}

/// Input for building a new journal entry.
#[derive(Debug, Clone)]
pub struct BuildEntryInput {
    /// Date the entry takes effect.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Optional external reference.
    pub reference: Option<String>,
    /// Originating business event type.
    pub source_type: SourceType,
    /// Opaque link to the originating business object.
    pub source_id: Option<uuid::Uuid>,
    /// The lines (must have at least 2).
    pub lines: Vec<LineInput>,
    /// Whether posting is gated on approval above the threshold.
    pub requires_approval: bool,
    /// The user creating the entry.
    pub created_by: UserId,
}

/// Totals computed while validating an entry's lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of line debits.
    pub total_debit: Decimal,
    /// Sum of line credits.
    pub total_credit: Decimal,
    /// Whether debits equal credits (exact decimal equality).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}
