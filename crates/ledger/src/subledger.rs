//! Subsidiary account registration and balance queries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_core::ledger::LedgerError;
use toko_core::subledger::{EntityType, SubsidiaryAccount};
use toko_shared::types::SubsidiaryAccountId;
use tracing::info;
use uuid::Uuid;

use crate::store::LedgerStore;

/// Input for registering a subsidiary account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSubsidiaryInput {
    /// Code of the main account the subsidiary rolls up into.
    pub main_account_code: String,
    /// Kind of entity being tracked.
    pub entity_type: EntityType,
    /// The external entity's ID.
    pub entity_id: Uuid,
    /// Display name of the entity.
    pub name: String,
}

/// Tracks per-entity subsidiary accounts beneath main accounts.
///
/// Balance updates happen inside the posting engine; this component
/// only registers subsidiaries and answers queries.
#[derive(Debug, Clone)]
pub struct SubledgerTracker {
    store: LedgerStore,
}

impl SubledgerTracker {
    pub(crate) fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Registers a subsidiary account under a main account.
    ///
    /// The subsidiary inherits the main account's sign convention. An
    /// entity can have at most one subsidiary per main account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `DuplicateSubsidiary`.
    pub fn register(
        &self,
        input: RegisterSubsidiaryInput,
    ) -> Result<SubsidiaryAccount, LedgerError> {
        let mut state = self.store.write();
        let main = state.account(&input.main_account_code)?;
        let normal_balance = main.account_type.normal_balance();

        let duplicate = state.subsidiaries.values().any(|s| {
            s.main_account_code == input.main_account_code
                && s.entity_type == input.entity_type
                && s.entity_id == input.entity_id
        });
        if duplicate {
            return Err(LedgerError::DuplicateSubsidiary);
        }

        let subsidiary = SubsidiaryAccount::new(
            input.main_account_code,
            input.entity_type,
            input.entity_id,
            input.name,
            normal_balance,
        );
        info!(
            main_account = %subsidiary.main_account_code,
            entity = %subsidiary.name,
            "subsidiary account registered"
        );
        state.subsidiaries.insert(subsidiary.id, subsidiary.clone());
        Ok(subsidiary)
    }

    /// Fetches a subsidiary account.
    ///
    /// # Errors
    ///
    /// Returns `SubsidiaryNotFound`.
    pub fn get(&self, id: SubsidiaryAccountId) -> Result<SubsidiaryAccount, LedgerError> {
        self.store.read().subsidiary(id).cloned()
    }

    /// Returns a subsidiary's current balance.
    ///
    /// # Errors
    ///
    /// Returns `SubsidiaryNotFound`.
    pub fn get_balance(&self, id: SubsidiaryAccountId) -> Result<Decimal, LedgerError> {
        Ok(self.store.read().subsidiary(id)?.current_balance)
    }

    /// Returns an entity's total balance across all of its subsidiary
    /// accounts (e.g. a customer's receivables over several main
    /// accounts). An entity with no subsidiaries has a zero balance.
    #[must_use]
    pub fn entity_balance(&self, entity_type: EntityType, entity_id: Uuid) -> Decimal {
        self.store
            .read()
            .subsidiaries
            .values()
            .filter(|s| s.entity_type == entity_type && s.entity_id == entity_id)
            .map(|s| s.current_balance)
            .sum()
    }

    /// Lists all subsidiaries under a main account, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the main account does not exist.
    pub fn list_for_account(
        &self,
        main_account_code: &str,
    ) -> Result<Vec<SubsidiaryAccount>, LedgerError> {
        let state = self.store.read();
        state.account(main_account_code)?;

        let mut subsidiaries: Vec<SubsidiaryAccount> = state
            .subsidiaries
            .values()
            .filter(|s| s.main_account_code == main_account_code)
            .cloned()
            .collect();
        subsidiaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subsidiaries)
    }
}
