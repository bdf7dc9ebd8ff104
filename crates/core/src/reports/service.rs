//! Report assembly.
//!
//! All functions here are pure: the engine fetches posted-line
//! aggregates from its store and passes them in. Reports never see
//! draft entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::account::{AccountType, NormalBalance};
use crate::ledger::balance::RunningBalance;
use crate::ledger::error::LedgerError;

use super::types::{
    AccountActivityRow, AccountBalanceRow, BalanceSheetReport, BalanceSheetSection,
    GeneralLedgerReport, GeneralLedgerRow, IncomeStatementReport, IncomeStatementSection,
    TrialBalanceReport,
};

/// Name of the synthetic equity row that folds net income to date into
/// the balance sheet.
pub const CURRENT_EARNINGS_NAME: &str = "Current earnings";

/// Assembles financial reports from per-account aggregates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService;

impl ReportService {
    /// Creates a new report service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds a trial balance from per-account debit/credit totals.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if total debits do not equal total
    /// credits. A consistent ledger can never trip this: every posted
    /// entry was balanced when it was accepted.
    pub fn trial_balance(
        &self,
        as_of: NaiveDate,
        accounts: Vec<AccountBalanceRow>,
    ) -> Result<TrialBalanceReport, LedgerError> {
        let total_debits: Decimal = accounts.iter().map(|row| row.total_debit).sum();
        let total_credits: Decimal = accounts.iter().map(|row| row.total_credit).sum();

        if total_debits != total_credits {
            return Err(LedgerError::IntegrityViolation {
                debit: total_debits,
                credit: total_credits,
            });
        }

        Ok(TrialBalanceReport {
            as_of,
            accounts,
            total_debits,
            total_credits,
            is_balanced: true,
        })
    }

    /// Builds a balance sheet from per-account balances of all types.
    ///
    /// Revenue and expense rows are not shown directly; their net is
    /// folded into equity as a synthetic "Current earnings" row so the
    /// accounting equation holds mid-period.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if assets do not equal liabilities
    /// plus equity.
    pub fn balance_sheet(
        &self,
        as_of: NaiveDate,
        accounts: Vec<AccountBalanceRow>,
    ) -> Result<BalanceSheetReport, LedgerError> {
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();
        let mut net_income = Decimal::ZERO;

        for row in accounts {
            match row.account_type {
                AccountType::Asset => {
                    assets.total += row.balance;
                    assets.accounts.push(row);
                }
                AccountType::Liability => {
                    liabilities.total += row.balance;
                    liabilities.accounts.push(row);
                }
                AccountType::Equity => {
                    equity.total += row.balance;
                    equity.accounts.push(row);
                }
                AccountType::Revenue => net_income += row.balance,
                AccountType::Expense => net_income -= row.balance,
            }
        }

        if net_income != Decimal::ZERO {
            equity.total += net_income;
            equity.accounts.push(current_earnings_row(net_income));
        }

        let total_assets = assets.total;
        let total_liabilities_equity = liabilities.total + equity.total;

        if total_assets != total_liabilities_equity {
            return Err(LedgerError::IntegrityViolation {
                debit: total_assets,
                credit: total_liabilities_equity,
            });
        }

        Ok(BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities_equity,
            is_balanced: true,
        })
    }

    /// Builds an income statement from revenue and expense movement
    /// within the date range. Rows of other account types are ignored.
    #[must_use]
    pub fn income_statement(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        accounts: Vec<AccountBalanceRow>,
    ) -> IncomeStatementReport {
        let mut revenue = IncomeStatementSection::default();
        let mut expenses = IncomeStatementSection::default();

        for row in accounts {
            match row.account_type {
                AccountType::Revenue => {
                    revenue.total += row.balance;
                    revenue.accounts.push(row);
                }
                AccountType::Expense => {
                    expenses.total += row.balance;
                    expenses.accounts.push(row);
                }
                _ => {}
            }
        }

        let total_revenue = revenue.total;
        let total_expenses = expenses.total;
        IncomeStatementReport {
            period_start,
            period_end,
            revenue,
            expenses,
            total_revenue,
            total_expenses,
            net_income: total_revenue - total_expenses,
        }
    }

    /// Builds a general ledger for one account: each posted line in
    /// date order with a running balance, bracketed by opening and
    /// closing balances. `activity` must already be sorted.
    #[must_use]
    pub fn general_ledger(
        &self,
        account_code: String,
        account_name: String,
        normal_balance: NormalBalance,
        period_start: NaiveDate,
        period_end: NaiveDate,
        opening_balance: Decimal,
        activity: Vec<AccountActivityRow>,
    ) -> GeneralLedgerReport {
        let mut running = RunningBalance::opening(opening_balance);
        let mut rows = Vec::with_capacity(activity.len());

        for line in activity {
            let change = normal_balance.balance_change(line.debit, line.credit);
            running = running.advance(change);
            rows.push(GeneralLedgerRow {
                entry_id: line.entry_id,
                entry_number: line.entry_number,
                entry_date: line.entry_date,
                description: line.description,
                debit: line.debit,
                credit: line.credit,
                running_balance: running.current_balance,
            });
        }

        GeneralLedgerReport {
            account_code,
            account_name,
            period_start,
            period_end,
            opening_balance,
            rows,
            closing_balance: running.current_balance,
        }
    }
}

fn current_earnings_row(net_income: Decimal) -> AccountBalanceRow {
    AccountBalanceRow {
        account_id: toko_shared::types::AccountId::new(),
        code: String::new(),
        name: CURRENT_EARNINGS_NAME.to_string(),
        account_type: AccountType::Equity,
        total_debit: Decimal::ZERO,
        total_credit: Decimal::ZERO,
        balance: net_income,
    }
}
