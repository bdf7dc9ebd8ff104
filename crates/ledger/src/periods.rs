//! Accounting period lifecycle management.
//!
//! Periods are identified by any date they contain; dates never overlap
//! across periods, so a date names at most one.

use chrono::NaiveDate;
use toko_core::ledger::{EntryStatus, LedgerError};
use toko_core::period::AccountingPeriod;
use toko_shared::types::UserId;
use tracing::{info, warn};

use crate::store::LedgerStore;

/// Creates periods and drives the Open -> Closed -> Locked lifecycle.
#[derive(Debug, Clone)]
pub struct PeriodManager {
    store: LedgerStore,
}

impl PeriodManager {
    pub(crate) fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Creates a new open period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodRange` or `OverlappingPeriod`.
    pub fn create_period(
        &self,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<AccountingPeriod, LedgerError> {
        let period = AccountingPeriod::new(name.into(), start_date, end_date)?;

        let mut state = self.store.write();
        if let Some(existing) = state.periods.iter().find(|p| p.overlaps(start_date, end_date)) {
            return Err(LedgerError::OverlappingPeriod {
                name: existing.name.clone(),
            });
        }

        info!(name = %period.name, %start_date, %end_date, "period created");
        state.periods.push(period.clone());
        Ok(period)
    }

    /// Closes the period containing `date`.
    ///
    /// Draft entries dated inside the period block the close: they must
    /// be posted or discarded first, otherwise they would be stranded
    /// unpostable.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound`, `OpenEntriesExist`, or
    /// `InvalidPeriodTransition`.
    pub fn close_period(
        &self,
        date: NaiveDate,
        actor: UserId,
    ) -> Result<AccountingPeriod, LedgerError> {
        let mut state = self.store.write();

        let (start, end) = {
            let period = state.period_for_date(date)?;
            (period.start_date, period.end_date)
        };
        let draft_count = state
            .entries
            .iter()
            .filter(|e| {
                e.status == EntryStatus::Draft && e.entry_date >= start && e.entry_date <= end
            })
            .count();
        if draft_count > 0 {
            warn!(draft_count, "period close blocked by draft entries");
            return Err(LedgerError::OpenEntriesExist { count: draft_count });
        }

        let period = state.period_for_date_mut(date)?;
        period.close(actor)?;
        info!(name = %period.name, "period closed");
        Ok(period.clone())
    }

    /// Reopens the closed period containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` or `InvalidPeriodTransition` (a locked
    /// period can never reopen).
    pub fn reopen_period(&self, date: NaiveDate) -> Result<AccountingPeriod, LedgerError> {
        let mut state = self.store.write();
        let period = state.period_for_date_mut(date)?;
        period.reopen()?;
        info!(name = %period.name, "period reopened");
        Ok(period.clone())
    }

    /// Locks the closed period containing `date`. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` or `InvalidPeriodTransition` (only a
    /// closed period can be locked).
    pub fn lock_period(
        &self,
        date: NaiveDate,
        actor: UserId,
    ) -> Result<AccountingPeriod, LedgerError> {
        let mut state = self.store.write();
        let period = state.period_for_date_mut(date)?;
        period.lock(actor)?;
        info!(name = %period.name, "period locked");
        Ok(period.clone())
    }

    /// Fetches the period containing `date`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound`.
    pub fn get_period_for_date(&self, date: NaiveDate) -> Result<AccountingPeriod, LedgerError> {
        self.store.read().period_for_date(date).cloned()
    }

    /// Lists all periods ordered by start date.
    #[must_use]
    pub fn list_periods(&self) -> Vec<AccountingPeriod> {
        let mut periods = self.store.read().periods.clone();
        periods.sort_by_key(|p| p.start_date);
        periods
    }
}
