//! Business rule validation for journal entry construction.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, LineInput};

/// Validates a proposed set of journal lines and computes entry totals.
///
/// Rules:
/// 1. At least 2 lines.
/// 2. Every line amount is strictly positive (a line is exactly one of
///    debit or credit by construction of [`LineInput`]).
/// 3. Sum of debits equals sum of credits with exact decimal equality,
///    no rounding tolerance.
///
/// Pure: performs no lookups and no mutation. Account existence and
/// activity are the caller's responsibility.
///
/// # Errors
///
/// Returns `InsufficientLines`, `ZeroAmount`, `NegativeAmount`, or
/// `UnbalancedEntry`.
pub fn validate_lines(lines: &[LineInput]) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for line in lines {
        if line.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if line.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        let (debit, credit) = line.amounts();
        total_debit += debit;
        total_credit += credit;
    }

    let totals = EntryTotals::new(total_debit, total_credit);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.total_debit,
            credit: totals.total_credit,
        });
    }

    Ok(totals)
}
