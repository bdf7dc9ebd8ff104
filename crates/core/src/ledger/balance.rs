//! Running balance tracking for general ledger rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running balance carried through an account's posted lines.
///
/// Used by the general ledger report: each row shows the balance before
/// and after the line, so `current[N] = previous[N] + change` and
/// `previous[N] = current[N-1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Sequence position of the line on the account (1-based).
    pub sequence: i64,
    /// Balance before this line.
    pub previous_balance: Decimal,
    /// Balance after this line.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Starts a running balance chain from an opening balance.
    #[must_use]
    pub fn opening(opening_balance: Decimal) -> Self {
        Self {
            sequence: 0,
            previous_balance: opening_balance,
            current_balance: opening_balance,
        }
    }

    /// Advances the chain with the next balance change.
    #[must_use]
    pub fn advance(&self, balance_change: Decimal) -> Self {
        Self {
            sequence: self.sequence + 1,
            previous_balance: self.current_balance,
            current_balance: self.current_balance + balance_change,
        }
    }
}
