//! Report generation over the stored ledger.
//!
//! Aggregates are recomputed from applied entries' lines on every call
//! rather than read from the cached account balances. The cached
//! balances exist for cheap point queries; reports replay so that the
//! two views can be checked against each other.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use toko_core::ledger::LedgerError;
use toko_core::period::validate_date_range;
use toko_core::reports::{
    AccountActivityRow, AccountBalanceRow, BalanceSheetReport, GeneralLedgerReport,
    IncomeStatementReport, ReportService, TrialBalanceReport,
};

use crate::store::{LedgerState, LedgerStore};

/// Generates financial reports from a consistent snapshot of the store.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    store: LedgerStore,
    service: ReportService,
}

impl ReportGenerator {
    pub(crate) fn new(store: LedgerStore) -> Self {
        Self {
            store,
            service: ReportService::new(),
        }
    }

    /// Trial balance of all accounts with activity up to `as_of`.
    ///
    /// Draft entries are invisible here; only posted and reversed
    /// entries contribute.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if total debits and credits diverge.
    pub fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalanceReport, LedgerError> {
        let state = self.store.read();
        let rows = balance_rows(&state, None, as_of)?;
        self.service.trial_balance(as_of, rows)
    }

    /// Balance sheet as of a date, with net income to date folded into
    /// equity as a synthetic "Current earnings" row.
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if the accounting equation fails.
    pub fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, LedgerError> {
        let state = self.store.read();
        let rows = balance_rows(&state, None, as_of)?;
        self.service.balance_sheet(as_of, rows)
    }

    /// Income statement over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriodRange` if `start > end`.
    pub fn income_statement(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<IncomeStatementReport, LedgerError> {
        validate_date_range(period_start, period_end)?;
        let state = self.store.read();
        let rows = balance_rows(&state, Some(period_start), period_end)?;
        Ok(self
            .service
            .income_statement(period_start, period_end, rows))
    }

    /// General ledger for one account over an inclusive date range:
    /// opening balance, each posted line with a running balance, and
    /// the closing balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `InvalidPeriodRange`.
    pub fn general_ledger(
        &self,
        account_code: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<GeneralLedgerReport, LedgerError> {
        validate_date_range(period_start, period_end)?;
        let state = self.store.read();
        let account = state.account(account_code)?;
        let normal_balance = account.account_type.normal_balance();

        let mut opening_balance = Decimal::ZERO;
        let mut activity: Vec<AccountActivityRow> = Vec::new();

        for entry in state.entries.iter().filter(|e| e.status.is_applied()) {
            if entry.entry_date > period_end {
                continue;
            }
            for line in entry.lines.iter().filter(|l| l.account_code == account_code) {
                if entry.entry_date < period_start {
                    opening_balance += normal_balance.balance_change(line.debit, line.credit);
                } else {
                    activity.push(AccountActivityRow {
                        entry_id: entry.id,
                        entry_number: entry.entry_number.clone(),
                        entry_date: entry.entry_date,
                        description: line
                            .description
                            .clone()
                            .unwrap_or_else(|| entry.description.clone()),
                        debit: line.debit,
                        credit: line.credit,
                    });
                }
            }
        }
        activity.sort_by(|a, b| {
            (a.entry_date, &a.entry_number).cmp(&(b.entry_date, &b.entry_number))
        });

        Ok(self.service.general_ledger(
            account.code.clone(),
            account.name.clone(),
            normal_balance,
            period_start,
            period_end,
            opening_balance,
            activity,
        ))
    }
}

/// Sums applied entries' lines per account over a date window and
/// produces one balance row per account with activity, in hierarchy
/// order.
fn balance_rows(
    state: &LedgerState,
    from: Option<NaiveDate>,
    to: NaiveDate,
) -> Result<Vec<AccountBalanceRow>, LedgerError> {
    let mut sums: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for entry in state.entries.iter().filter(|e| e.status.is_applied()) {
        if entry.entry_date > to || from.is_some_and(|f| entry.entry_date < f) {
            continue;
        }
        for line in &entry.lines {
            let sum = sums.entry(line.account_code.clone()).or_default();
            sum.0 += line.debit;
            sum.1 += line.credit;
        }
    }

    let mut rows = Vec::with_capacity(sums.len());
    for (code, (total_debit, total_credit)) in sums {
        let account = state.account(&code)?;
        rows.push((
            account.path.clone(),
            AccountBalanceRow {
                account_id: account.id,
                code,
                name: account.name.clone(),
                account_type: account.account_type,
                total_debit,
                total_credit,
                balance: account
                    .account_type
                    .normal_balance()
                    .balance_change(total_debit, total_credit),
            },
        ));
    }
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(rows.into_iter().map(|(_, row)| row).collect())
}
