//! Shared in-memory ledger state.
//!
//! All engine components hold a clone of [`LedgerStore`] and go through
//! its single `RwLock`. Every mutating operation validates first and
//! mutates second while holding one write guard, so callers observe
//! each operation as atomic and operations serialize cleanly under
//! concurrency. Reports take a read guard and see a consistent snapshot.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use toko_core::ledger::{Account, JournalEntry, LedgerError};
use toko_core::period::AccountingPeriod;
use toko_core::subledger::SubsidiaryAccount;
use toko_shared::types::{JournalEntryId, SubsidiaryAccountId};

/// The engine's entire mutable state, guarded by one lock.
#[derive(Debug, Default)]
pub(crate) struct LedgerState {
    /// Chart of accounts, keyed by code.
    pub accounts: BTreeMap<String, Account>,
    /// Journal entries in creation order.
    pub entries: Vec<JournalEntry>,
    /// Entry ID -> position in `entries`.
    pub entry_index: HashMap<JournalEntryId, usize>,
    /// Accounting periods, unordered.
    pub periods: Vec<AccountingPeriod>,
    /// Subsidiary accounts, keyed by ID.
    pub subsidiaries: HashMap<SubsidiaryAccountId, SubsidiaryAccount>,
    /// Next sequential entry number.
    pub next_entry_seq: u64,
}

impl LedgerState {
    pub fn account(&self, code: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(code)
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    }

    pub fn account_mut(&mut self, code: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(code)
            .ok_or_else(|| LedgerError::AccountNotFound(code.to_string()))
    }

    pub fn entry(&self, id: JournalEntryId) -> Result<&JournalEntry, LedgerError> {
        self.entry_index
            .get(&id)
            .and_then(|&idx| self.entries.get(idx))
            .ok_or(LedgerError::EntryNotFound(id))
    }

    pub fn entry_mut(&mut self, id: JournalEntryId) -> Result<&mut JournalEntry, LedgerError> {
        let idx = *self.entry_index.get(&id).ok_or(LedgerError::EntryNotFound(id))?;
        self.entries.get_mut(idx).ok_or(LedgerError::EntryNotFound(id))
    }

    pub fn insert_entry(&mut self, entry: JournalEntry) {
        self.entry_index.insert(entry.id, self.entries.len());
        self.entries.push(entry);
    }

    pub fn period_for_date(&self, date: NaiveDate) -> Result<&AccountingPeriod, LedgerError> {
        self.periods
            .iter()
            .find(|p| p.contains_date(date))
            .ok_or(LedgerError::PeriodNotFound(date))
    }

    pub fn period_for_date_mut(
        &mut self,
        date: NaiveDate,
    ) -> Result<&mut AccountingPeriod, LedgerError> {
        self.periods
            .iter_mut()
            .find(|p| p.contains_date(date))
            .ok_or(LedgerError::PeriodNotFound(date))
    }

    pub fn subsidiary(
        &self,
        id: SubsidiaryAccountId,
    ) -> Result<&SubsidiaryAccount, LedgerError> {
        self.subsidiaries
            .get(&id)
            .ok_or(LedgerError::SubsidiaryNotFound(id))
    }

    pub fn subsidiary_mut(
        &mut self,
        id: SubsidiaryAccountId,
    ) -> Result<&mut SubsidiaryAccount, LedgerError> {
        self.subsidiaries
            .get_mut(&id)
            .ok_or(LedgerError::SubsidiaryNotFound(id))
    }

    /// Allocates the next sequential entry number ("JE-000001").
    ///
    /// Called under the write guard, so numbers never collide or skip.
    pub fn next_entry_number(&mut self, prefix: &str) -> String {
        self.next_entry_seq += 1;
        format!("{prefix}-{:06}", self.next_entry_seq)
    }
}

/// Cheaply cloneable handle to the shared state.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    inner: Arc<RwLock<LedgerState>>,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.inner.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_numbers_are_sequential() {
        let store = LedgerStore::new();
        let mut state = store.write();
        assert_eq!(state.next_entry_number("JE"), "JE-000001");
        assert_eq!(state.next_entry_number("JE"), "JE-000002");
        assert_eq!(state.next_entry_number("GL"), "GL-000003");
    }

    #[test]
    fn test_missing_lookups_error() {
        let store = LedgerStore::new();
        let state = store.read();
        assert!(matches!(
            state.account("1100"),
            Err(LedgerError::AccountNotFound(_))
        ));
        assert!(matches!(
            state.entry(JournalEntryId::new()),
            Err(LedgerError::EntryNotFound(_))
        ));
        assert!(matches!(
            state.period_for_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            Err(LedgerError::PeriodNotFound(_))
        ));
    }
}
