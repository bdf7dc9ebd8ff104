//! Ledger facade wiring all components over one shared store.

use toko_core::ledger::{BuildEntryInput, JournalEntry, LedgerError, SourceType};
use toko_shared::LedgerConfig;
use toko_shared::types::{JournalEntryId, UserId};
use uuid::Uuid;

use crate::builder::LedgerEntryBuilder;
use crate::periods::PeriodManager;
use crate::posting::PostingEngine;
use crate::registry::AccountRegistry;
use crate::reports::ReportGenerator;
use crate::store::LedgerStore;
use crate::subledger::SubledgerTracker;

/// A complete in-memory double-entry ledger.
///
/// All components share one store, so any mix of concurrent calls
/// serializes through its lock.
#[derive(Debug, Clone)]
pub struct Ledger {
    store: LedgerStore,
    accounts: AccountRegistry,
    entries: LedgerEntryBuilder,
    posting: PostingEngine,
    periods: PeriodManager,
    subledgers: SubledgerTracker,
    reports: ReportGenerator,
}

impl Ledger {
    /// Creates an empty ledger with the given configuration.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        let store = LedgerStore::new();
        Self {
            accounts: AccountRegistry::new(store.clone()),
            entries: LedgerEntryBuilder::new(store.clone(), config.entry_number_prefix.clone()),
            posting: PostingEngine::new(
                store.clone(),
                config.entry_number_prefix.clone(),
                config.approval_threshold,
            ),
            periods: PeriodManager::new(store.clone()),
            subledgers: SubledgerTracker::new(store.clone()),
            reports: ReportGenerator::new(store.clone()),
            store,
        }
    }

    /// Chart of accounts operations.
    #[must_use]
    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    /// Draft entry construction.
    #[must_use]
    pub fn entries(&self) -> &LedgerEntryBuilder {
        &self.entries
    }

    /// Posting, approval, and reversal.
    #[must_use]
    pub fn posting(&self) -> &PostingEngine {
        &self.posting
    }

    /// Period lifecycle management.
    #[must_use]
    pub fn periods(&self) -> &PeriodManager {
        &self.periods
    }

    /// Subsidiary account tracking.
    #[must_use]
    pub fn subledgers(&self) -> &SubledgerTracker {
        &self.subledgers
    }

    /// Report generation.
    #[must_use]
    pub fn reports(&self) -> &ReportGenerator {
        &self.reports
    }

    /// Fetches an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`.
    pub fn get_entry(&self, id: JournalEntryId) -> Result<JournalEntry, LedgerError> {
        self.store.read().entry(id).cloned()
    }

    /// Lists all entries in creation order.
    #[must_use]
    pub fn list_entries(&self) -> Vec<JournalEntry> {
        self.store.read().entries.clone()
    }

    /// Builds a draft and posts it in one call.
    ///
    /// The draft is stored even if the post step fails, so a rejected
    /// post (closed period, approval gate) leaves a draft that can be
    /// fixed up and posted later.
    ///
    /// # Errors
    ///
    /// Returns any build or post error.
    pub fn create_and_post_entry(
        &self,
        input: BuildEntryInput,
        actor: UserId,
    ) -> Result<JournalEntry, LedgerError> {
        let draft = self.entries.build(input)?;
        self.posting.post(draft.id, actor)
    }

    /// Reverses every reversible posted entry that originated from the
    /// given source object, all-or-nothing. Returns the reversal
    /// entries.
    ///
    /// Entries that are drafts, already reversed, or themselves
    /// reversals are skipped. If any target cannot be reversed (e.g. it
    /// is dated in a locked period), the whole batch fails and nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns `ReasonRequired`, `PeriodClosed`, or `PeriodLocked`.
    pub fn reverse_entries_for_source(
        &self,
        source_type: SourceType,
        source_id: Uuid,
        reason: &str,
        actor: UserId,
    ) -> Result<Vec<JournalEntry>, LedgerError> {
        self.posting.reverse_all(source_type, source_id, reason, actor)
    }
}
