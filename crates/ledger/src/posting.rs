//! Posting engine: approve, post, reverse.
//!
//! Each operation takes the store's write guard once, validates
//! everything while nothing has changed, then mutates. An error on the
//! validation path leaves the ledger untouched; the mutation path only
//! runs after every check has passed.

use chrono::Utc;
use rust_decimal::Decimal;
use toko_core::ledger::{
    EntryStatus, JournalEntry, JournalLine, LedgerError, SourceType, build_reversing_lines,
    validate_lines, validate_post, validate_reverse,
};
use toko_shared::types::{JournalEntryId, JournalLineId, SubsidiaryAccountId, UserId};
use tracing::info;
use uuid::Uuid;

use crate::store::{LedgerState, LedgerStore};

/// Balance delta extracted from a line, applied after validation.
type LineDelta = (String, Decimal, Decimal, Option<SubsidiaryAccountId>);

/// Drives the entry state machine and keeps account balances current.
#[derive(Debug, Clone)]
pub struct PostingEngine {
    store: LedgerStore,
    entry_number_prefix: String,
    approval_threshold: Option<Decimal>,
}

impl PostingEngine {
    pub(crate) fn new(
        store: LedgerStore,
        entry_number_prefix: String,
        approval_threshold: Option<Decimal>,
    ) -> Self {
        Self {
            store,
            entry_number_prefix,
            approval_threshold,
        }
    }

    /// Records approval on a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or `CannotApprove` if the entry is no
    /// longer a draft.
    pub fn approve(
        &self,
        entry_id: JournalEntryId,
        actor: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        let mut state = self.store.write();
        let entry = state.entry_mut(entry_id)?;

        if entry.status != EntryStatus::Draft {
            return Err(LedgerError::CannotApprove {
                status: entry.status.to_string(),
            });
        }

        entry.approved_by = Some(actor);
        entry.approved_at = Some(Utc::now());
        info!(entry_number = %entry.entry_number, "entry approved");
        Ok(entry.clone())
    }

    /// Posts a draft entry: Draft -> Posted, applying every line to its
    /// account (and tagged subsidiary) balance.
    ///
    /// Posting is not idempotent by design: a second post of the same
    /// entry fails on the status check before anything mutates, so line
    /// amounts can never be applied twice.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `PeriodNotFound`, `PeriodClosed`,
    /// `PeriodLocked`, `CannotPost`, `ApprovalRequired`,
    /// `AccountInactive`, or `SubsidiaryNotFound`.
    pub fn post(
        &self,
        entry_id: JournalEntryId,
        actor: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        let mut state = self.store.write();

        let action = {
            let entry = state.entry(entry_id)?;
            state
                .period_for_date(entry.entry_date)?
                .validate_posting_allowed()?;
            for line in &entry.lines {
                state.account(&line.account_code)?.validate_postable()?;
                if let Some(subsidiary_id) = line.subsidiary_id {
                    state.subsidiary(subsidiary_id)?;
                }
            }
            validate_post(entry, self.approval_threshold, actor)?
        };

        let deltas: Vec<LineDelta> = {
            let entry = state.entry_mut(entry_id)?;
            entry.status = EntryStatus::Posted;
            entry.posted_by = Some(action.posted_by);
            entry.posted_at = Some(action.posted_at);
            entry
                .lines
                .iter()
                .map(|l| (l.account_code.clone(), l.debit, l.credit, l.subsidiary_id))
                .collect()
        };
        apply_deltas(&mut state, &deltas)?;

        let entry = state.entry(entry_id)?;
        info!(
            entry_number = %entry.entry_number,
            total = %entry.total_debit,
            "journal entry posted"
        );
        Ok(entry.clone())
    }

    /// Reverses a posted entry by creating and immediately posting a
    /// mirror entry (debits and credits swapped), then marking the
    /// original Reversed. Both happen under the same write guard.
    ///
    /// The reversal is dated on the original's date, so it lands in the
    /// same period and the pair nets to zero in every report that
    /// includes one of them. A reversal entry can never itself be
    /// reversed.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `ReasonRequired`, `PeriodClosed`,
    /// `PeriodLocked`, or `CannotReverse`.
    pub fn reverse(
        &self,
        entry_id: JournalEntryId,
        reason: &str,
        actor: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        let mut state = self.store.write();
        self.reverse_in_state(&mut state, entry_id, reason, actor)
    }

    /// Reverses every reversible posted entry originating from the given
    /// source object, all-or-nothing under one write guard. Drafts,
    /// already-reversed entries, and reversal entries are skipped.
    ///
    /// Every target is validated before any of them mutates, so one
    /// entry dated in a locked period fails the whole batch instead of
    /// leaving it half reversed.
    ///
    /// # Errors
    ///
    /// Returns `ReasonRequired`, `PeriodClosed`, or `PeriodLocked`.
    pub(crate) fn reverse_all(
        &self,
        source_type: SourceType,
        source_id: Uuid,
        reason: &str,
        actor: UserId,
    ) -> Result<Vec<JournalEntry>, LedgerError> {
        let mut state = self.store.write();

        let targets: Vec<JournalEntryId> = state
            .entries
            .iter()
            .filter(|e| {
                e.source_type == source_type && e.source_id == Some(source_id) && e.can_reverse()
            })
            .map(|e| e.id)
            .collect();

        for entry_id in &targets {
            let entry = state.entry(*entry_id)?;
            state
                .period_for_date(entry.entry_date)?
                .validate_reversal_allowed()?;
            validate_reverse(entry, reason, actor)?;
        }

        let mut reversals = Vec::with_capacity(targets.len());
        for entry_id in targets {
            reversals.push(self.reverse_in_state(&mut state, entry_id, reason, actor)?);
        }
        Ok(reversals)
    }

    fn reverse_in_state(
        &self,
        state: &mut LedgerState,
        entry_id: JournalEntryId,
        reason: &str,
        actor: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        let (action, original_number, entry_date, source_id, reversing_inputs) = {
            let entry = state.entry(entry_id)?;
            state
                .period_for_date(entry.entry_date)?
                .validate_reversal_allowed()?;
            let action = validate_reverse(entry, reason, actor)?;
            (
                action,
                entry.entry_number.clone(),
                entry.entry_date,
                entry.source_id,
                build_reversing_lines(&entry.lines),
            )
        };
        // A mirror of a balanced entry is itself balanced.
        let totals = validate_lines(&reversing_inputs)?;

        let reversal_id = JournalEntryId::new();
        let lines: Vec<JournalLine> = reversing_inputs
            .iter()
            .map(|line| {
                let (debit, credit) = line.amounts();
                JournalLine {
                    id: JournalLineId::new(),
                    entry_id: reversal_id,
                    account_code: line.account_code.clone(),
                    debit,
                    credit,
                    description: line.description.clone(),
                    subsidiary_id: line.subsidiary_id,
                }
            })
            .collect();

        let reversal = JournalEntry {
            id: reversal_id,
            entry_number: state.next_entry_number(&self.entry_number_prefix),
            entry_date,
            description: format!("Reversal of {original_number}: {}", action.reason),
            reference: None,
            source_type: SourceType::Reversal,
            source_id,
            status: EntryStatus::Posted,
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
            is_balanced: totals.is_balanced,
            requires_approval: false,
            approved_by: None,
            approved_at: None,
            posted_by: Some(action.reversed_by),
            posted_at: Some(action.reversed_at),
            reverses_entry_id: Some(entry_id),
            reversed_by_entry_id: None,
            created_by: actor,
            created_at: action.reversed_at,
            lines,
        };

        let deltas: Vec<LineDelta> = reversal
            .lines
            .iter()
            .map(|l| (l.account_code.clone(), l.debit, l.credit, l.subsidiary_id))
            .collect();
        state.insert_entry(reversal.clone());
        apply_deltas(state, &deltas)?;

        let original = state.entry_mut(entry_id)?;
        original.status = EntryStatus::Reversed;
        original.reversed_by_entry_id = Some(reversal_id);

        info!(
            entry_number = %reversal.entry_number,
            reverses = %original_number,
            "journal entry reversed"
        );
        Ok(reversal)
    }
}

/// Applies validated line deltas to account and subsidiary balances.
///
/// Runs under the caller's write guard; lookups were validated before
/// any mutation started, so the `?` paths are unreachable in practice.
fn apply_deltas(state: &mut LedgerState, deltas: &[LineDelta]) -> Result<(), LedgerError> {
    for (code, debit, credit, subsidiary_id) in deltas {
        state.account_mut(code)?.apply_posting_delta(*debit, *credit);
        if let Some(subsidiary_id) = subsidiary_id {
            state
                .subsidiary_mut(*subsidiary_id)?
                .apply_posting_delta(*debit, *credit);
        }
    }
    Ok(())
}
