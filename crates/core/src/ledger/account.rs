//! Chart of accounts domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_shared::types::AccountId;

use super::error::LedgerError;

/// Account type classification.
///
/// The type fixes the account's sign convention at creation; it never
/// changes once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, inventory, receivables).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's stake.
    Equity,
    /// Income from sales and services.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Parses an account type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the normal balance side for this account type.
    ///
    /// - Asset/Expense: debit-normal (balance = debit - credit)
    /// - Liability/Equity/Revenue: credit-normal (balance = credit - debit)
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

/// Which side increases an account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

impl NormalBalance {
    /// Calculates the signed balance change for a debit/credit pair.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A node in the chart of accounts tree.
///
/// Balances are mutated only by the posting engine; accounts referenced by
/// posted lines are never deleted, only deactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Globally unique account code (e.g. "1100").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Account type, fixed at creation.
    pub account_type: AccountType,
    /// Parent account code, if any.
    pub parent_code: Option<String>,
    /// Depth in the tree (root = 0).
    pub level: i32,
    /// Materialized hierarchy path ("1000.1100").
    pub path: String,
    /// Accumulated debit total from posted lines.
    pub debit_balance: Decimal,
    /// Accumulated credit total from posted lines.
    pub credit_balance: Decimal,
    /// Derived balance per the type's sign convention.
    pub current_balance: Decimal,
    /// Whether the account accepts new postings.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a root account (no parent).
    #[must_use]
    pub fn new_root(code: String, name: String, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            path: code.clone(),
            code,
            name,
            account_type,
            parent_code: None,
            level: 0,
            debit_balance: Decimal::ZERO,
            credit_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Creates a child account under `parent`.
    #[must_use]
    pub fn new_child(code: String, name: String, account_type: AccountType, parent: &Self) -> Self {
        Self {
            id: AccountId::new(),
            path: format!("{}.{}", parent.path, code),
            code: code.clone(),
            name,
            account_type,
            parent_code: Some(parent.code.clone()),
            level: parent.level + 1,
            debit_balance: Decimal::ZERO,
            credit_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Accumulates a posting delta and recomputes the derived balance.
    ///
    /// Engine-internal: callers go through the posting engine, which holds
    /// the store write lock while this runs.
    pub fn apply_posting_delta(&mut self, debit_delta: Decimal, credit_delta: Decimal) {
        self.debit_balance += debit_delta;
        self.credit_balance += credit_delta;
        self.current_balance = self
            .account_type
            .normal_balance()
            .balance_change(self.debit_balance, self.credit_balance);
    }

    /// Validates that the account can appear on a new entry line.
    ///
    /// # Errors
    ///
    /// Returns `AccountInactive` if the account has been deactivated.
    pub fn validate_postable(&self) -> Result<(), LedgerError> {
        if !self.is_active {
            return Err(LedgerError::AccountInactive(self.code.clone()));
        }
        Ok(())
    }
}
