//! Posting state machine rules.
//!
//! Pure transition logic: these functions validate a transition against
//! the entry's current state and return the audit data to record. The
//! engine applies the resulting action inside its store transaction.
//!
//! Valid transitions:
//! - Draft -> Posted (post)
//! - Posted -> Reversed (reverse; creates a new posted reversal entry)
//!
//! "Locked" is not a stored transition: it is derived from the status of
//! the period the entry is dated in and checked separately.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use toko_shared::types::UserId;

use super::entry::{EntryStatus, JournalEntry};
use super::error::LedgerError;

/// Audit data recorded when an entry is posted.
#[derive(Debug, Clone)]
pub struct PostAction {
    /// The user posting the entry.
    pub posted_by: UserId,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
}

/// Audit data recorded when an entry is reversed.
#[derive(Debug, Clone)]
pub struct ReverseAction {
    /// The user reversing the entry.
    pub reversed_by: UserId,
    /// When the reversal happened.
    pub reversed_at: DateTime<Utc>,
    /// The stated reason.
    pub reason: String,
}

/// Validates that an entry may be posted, including the approval gate.
///
/// Status rules: the entry must be a balanced draft. Posting the same
/// entry twice is impossible because the second call sees status
/// `Posted` and fails here, before any mutation.
///
/// Approval gate: when the entry is flagged `requires_approval` and its
/// total exceeds `approval_threshold`, a prior approval must have been
/// recorded.
///
/// # Errors
///
/// Returns `CannotPost` or `ApprovalRequired`.
pub fn validate_post(
    entry: &JournalEntry,
    approval_threshold: Option<Decimal>,
    actor: UserId,
) -> Result<PostAction, LedgerError> {
    if !entry.can_post() {
        return Err(LedgerError::CannotPost {
            status: entry.status.to_string(),
        });
    }

    if entry.requires_approval {
        if let Some(threshold) = approval_threshold {
            if entry.total_debit > threshold && !entry.is_approved() {
                return Err(LedgerError::ApprovalRequired {
                    total: entry.total_debit,
                    threshold,
                });
            }
        }
    }

    Ok(PostAction {
        posted_by: actor,
        posted_at: Utc::now(),
    })
}

/// Validates that an entry may be reversed.
///
/// Only posted entries can be reversed, and a reversal entry can never
/// itself be reversed (correcting one requires a fresh entry). The
/// caller additionally checks that the entry's period is not locked.
///
/// # Errors
///
/// Returns `ReasonRequired` or `CannotReverse`.
pub fn validate_reverse(
    entry: &JournalEntry,
    reason: &str,
    actor: UserId,
) -> Result<ReverseAction, LedgerError> {
    if reason.trim().is_empty() {
        return Err(LedgerError::ReasonRequired);
    }

    if !entry.can_reverse() {
        return Err(LedgerError::CannotReverse {
            status: reversal_block_reason(entry),
        });
    }

    Ok(ReverseAction {
        reversed_by: actor,
        reversed_at: Utc::now(),
        reason: reason.to_string(),
    })
}

/// Describes why a reversal is blocked, for the error message.
fn reversal_block_reason(entry: &JournalEntry) -> String {
    if entry.status == EntryStatus::Posted && entry.reverses_entry_id.is_some() {
        "posted (is itself a reversal)".to_string()
    } else {
        entry.status.to_string()
    }
}
