//! Reversing-entry construction.
//!
//! A reversal negates a posted entry by creating a brand-new entry whose
//! lines are the exact debit/credit swap of the original, so that
//! total_debit_new == total_credit_old and vice versa. The net effect of
//! original + reversal on every account balance is zero.

use super::entry::JournalLine;
use super::types::{LineInput, LineSide};

/// Builds the reversing lines for a posted entry's lines.
///
/// For each original line:
/// - Debits become credits and credits become debits
/// - Amount, account, and subsidiary reference are preserved
/// - The description is prefixed with "Reversal: "
#[must_use]
pub fn build_reversing_lines(original_lines: &[JournalLine]) -> Vec<LineInput> {
    original_lines
        .iter()
        .map(|line| {
            let (side, amount) = if line.debit > rust_decimal::Decimal::ZERO {
                (LineSide::Credit, line.debit)
            } else {
                (LineSide::Debit, line.credit)
            };

            LineInput {
                account_code: line.account_code.clone(),
                side,
                amount,
                description: Some(format!(
                    "Reversal: {}",
                    line.description.clone().unwrap_or_default()
                )),
                subsidiary_id: line.subsidiary_id,
            }
        })
        .collect()
}
