//! Chart of accounts registry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_core::ledger::{Account, AccountType, LedgerError};
use tracing::info;

use crate::store::LedgerStore;

/// Input for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountInput {
    /// Globally unique account code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Account type, fixed at creation.
    pub account_type: AccountType,
    /// Parent account code, for hierarchy placement.
    pub parent_code: Option<String>,
}

/// Manages the chart of accounts tree.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    store: LedgerStore,
}

impl AccountRegistry {
    pub(crate) fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Creates an account, placing it in the hierarchy if a parent is given.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code is taken, or `ParentNotFound`
    /// if the named parent does not exist.
    pub fn create_account(&self, input: CreateAccountInput) -> Result<Account, LedgerError> {
        let mut state = self.store.write();

        if state.accounts.contains_key(&input.code) {
            return Err(LedgerError::DuplicateCode(input.code));
        }

        let account = match &input.parent_code {
            Some(parent_code) => {
                let parent = state
                    .accounts
                    .get(parent_code)
                    .ok_or_else(|| LedgerError::ParentNotFound(parent_code.clone()))?;
                Account::new_child(input.code, input.name, input.account_type, parent)
            }
            None => Account::new_root(input.code, input.name, input.account_type),
        };

        info!(code = %account.code, path = %account.path, "account created");
        state.accounts.insert(account.code.clone(), account.clone());
        Ok(account)
    }

    /// Fetches an account by code.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn get_account(&self, code: &str) -> Result<Account, LedgerError> {
        self.store.read().account(code).cloned()
    }

    /// Lists accounts in hierarchy order (by materialized path),
    /// optionally restricted to one account type.
    #[must_use]
    pub fn list_accounts(&self, type_filter: Option<AccountType>) -> Vec<Account> {
        let state = self.store.read();
        let mut accounts: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| type_filter.is_none_or(|t| a.account_type == t))
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.path.cmp(&b.path));
        accounts
    }

    /// Deactivates an account so no new lines can reference it.
    ///
    /// Posted history is untouched; accounts are never deleted.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn deactivate_account(&self, code: &str) -> Result<Account, LedgerError> {
        let mut state = self.store.write();
        let account = state.account_mut(code)?;
        account.is_active = false;
        info!(code = %account.code, "account deactivated");
        Ok(account.clone())
    }

    /// Rolls up the balance of an account and all its descendants.
    ///
    /// Descendants are found via the materialized path prefix.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn subtree_balance(&self, code: &str) -> Result<Decimal, LedgerError> {
        let state = self.store.read();
        let root = state.account(code)?;
        let child_prefix = format!("{}.", root.path);

        let total = root.current_balance
            + state
                .accounts
                .values()
                .filter(|a| a.path.starts_with(&child_prefix))
                .map(|a| a.current_balance)
                .sum::<Decimal>();
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry() -> AccountRegistry {
        AccountRegistry::new(LedgerStore::new())
    }

    fn input(code: &str, parent: Option<&str>) -> CreateAccountInput {
        CreateAccountInput {
            code: code.into(),
            name: format!("Account {code}"),
            account_type: AccountType::Asset,
            parent_code: parent.map(Into::into),
        }
    }

    #[test]
    fn test_create_root_and_child() {
        let registry = registry();
        registry.create_account(input("1000", None)).unwrap();
        let child = registry.create_account(input("1100", Some("1000"))).unwrap();
        assert_eq!(child.path, "1000.1100");
        assert_eq!(child.level, 1);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let registry = registry();
        registry.create_account(input("1000", None)).unwrap();
        assert!(matches!(
            registry.create_account(input("1000", None)),
            Err(LedgerError::DuplicateCode(_))
        ));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let registry = registry();
        assert!(matches!(
            registry.create_account(input("1100", Some("9999"))),
            Err(LedgerError::ParentNotFound(_))
        ));
    }

    #[test]
    fn test_list_accounts_hierarchy_order() {
        let registry = registry();
        registry.create_account(input("2000", None)).unwrap();
        registry.create_account(input("1000", None)).unwrap();
        registry.create_account(input("1100", Some("1000"))).unwrap();

        let paths: Vec<String> = registry
            .list_accounts(None)
            .into_iter()
            .map(|a| a.path)
            .collect();
        assert_eq!(paths, vec!["1000", "1000.1100", "2000"]);
    }

    #[test]
    fn test_list_accounts_type_filter() {
        let registry = registry();
        registry.create_account(input("1000", None)).unwrap();
        registry
            .create_account(CreateAccountInput {
                code: "4000".into(),
                name: "Sales".into(),
                account_type: AccountType::Revenue,
                parent_code: None,
            })
            .unwrap();

        let revenue = registry.list_accounts(Some(AccountType::Revenue));
        assert_eq!(revenue.len(), 1);
        assert_eq!(revenue[0].code, "4000");
        assert_eq!(registry.list_accounts(Some(AccountType::Equity)).len(), 0);
    }

    #[test]
    fn test_deactivate() {
        let registry = registry();
        registry.create_account(input("1000", None)).unwrap();
        let account = registry.deactivate_account("1000").unwrap();
        assert!(!account.is_active);
    }

    #[test]
    fn test_subtree_balance_sums_descendants() {
        let registry = registry();
        registry.create_account(input("1000", None)).unwrap();
        registry.create_account(input("1100", Some("1000"))).unwrap();
        registry.create_account(input("1110", Some("1100"))).unwrap();
        // Sibling subtree that must not be included.
        registry.create_account(input("2000", None)).unwrap();

        {
            let mut state = registry.store.write();
            state.account_mut("1100").unwrap().apply_posting_delta(dec!(100), Decimal::ZERO);
            state.account_mut("1110").unwrap().apply_posting_delta(dec!(50), Decimal::ZERO);
            state.account_mut("2000").unwrap().apply_posting_delta(dec!(999), Decimal::ZERO);
        }

        assert_eq!(registry.subtree_balance("1000").unwrap(), dec!(150));
        assert_eq!(registry.subtree_balance("1100").unwrap(), dec!(150));
        assert_eq!(registry.subtree_balance("1110").unwrap(), dec!(50));
    }
}
