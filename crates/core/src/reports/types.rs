//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_shared::types::{AccountId, JournalEntryId};

use crate::ledger::account::AccountType;

/// Per-account balance row feeding trial balance and balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Sum of posted debits.
    pub total_debit: Decimal,
    /// Sum of posted credits.
    pub total_credit: Decimal,
    /// Net balance per the account's sign convention.
    pub balance: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date (inclusive).
    pub as_of: NaiveDate,
    /// Account balances, hierarchy order.
    pub accounts: Vec<AccountBalanceRow>,
    /// Sum of all debit columns.
    pub total_debits: Decimal,
    /// Sum of all credit columns.
    pub total_credits: Decimal,
    /// Whether debits equal credits. Always true for a consistent
    /// ledger; false is an integrity failure, not a business outcome.
    pub is_balanced: bool,
}

/// Balance sheet section (assets, liabilities, equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountBalanceRow>,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As-of date (inclusive).
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section, including current earnings to date.
    pub equity: BalanceSheetSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities plus equity.
    pub total_liabilities_equity: Decimal,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

/// Income statement section (revenue or expenses).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatementSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountBalanceRow>,
}

/// Income statement report over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Period start date (inclusive).
    pub period_start: NaiveDate,
    /// Period end date (inclusive).
    pub period_end: NaiveDate,
    /// Revenue section (movements strictly within the range).
    pub revenue: IncomeStatementSection,
    /// Expense section (movements strictly within the range).
    pub expenses: IncomeStatementSection,
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Net income (revenue - expenses).
    pub net_income: Decimal,
}

/// One posted line's activity against an account, before running
/// balances are computed. Input to the general ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActivityRow {
    /// The entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// The entry's number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry or line description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One line of a general ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerRow {
    /// The entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// The entry's number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry or line description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line.
    pub running_balance: Decimal,
}

/// General ledger report for one account over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Period start date (inclusive).
    pub period_start: NaiveDate,
    /// Period end date (inclusive).
    pub period_end: NaiveDate,
    /// Balance before the period.
    pub opening_balance: Decimal,
    /// Posted lines within the period, date order, with running balance.
    pub rows: Vec<GeneralLedgerRow>,
    /// Balance at the end of the period.
    pub closing_balance: Decimal,
}
