//! Subsidiary (customer/vendor) account types.
//!
//! Subsidiary accounts give per-entity drill-down beneath a summary main
//! account (accounts receivable per customer, accounts payable per
//! vendor) without polluting the main ledger's granularity. Balances are
//! mirrored from posted lines tagged with a subsidiary reference.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toko_shared::types::SubsidiaryAccountId;
use uuid::Uuid;

use crate::ledger::account::NormalBalance;

/// The kind of external entity a subsidiary account tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// A customer (receivables drill-down).
    Customer,
    /// A vendor (payables drill-down).
    Vendor,
    /// An employee (advances, reimbursements).
    Employee,
}

impl EntityType {
    /// Returns the string representation of the entity type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Employee => "employee",
        }
    }
}

/// A subsidiary account beneath a main ledger account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsidiaryAccount {
    /// Unique identifier.
    pub id: SubsidiaryAccountId,
    /// Code of the main account this subsidiary rolls up into.
    pub main_account_code: String,
    /// The external entity's kind.
    pub entity_type: EntityType,
    /// The external entity's ID (customer/vendor/employee).
    pub entity_id: Uuid,
    /// Display name of the entity.
    pub name: String,
    /// Sign convention inherited from the main account's type.
    pub normal_balance: NormalBalance,
    /// Accumulated debit total from posted lines.
    pub debit_balance: Decimal,
    /// Accumulated credit total from posted lines.
    pub credit_balance: Decimal,
    /// Derived balance per the inherited sign convention.
    pub current_balance: Decimal,
    /// When the subsidiary account was registered.
    pub created_at: DateTime<Utc>,
}

impl SubsidiaryAccount {
    /// Creates a new subsidiary account with a zero balance.
    #[must_use]
    pub fn new(
        main_account_code: String,
        entity_type: EntityType,
        entity_id: Uuid,
        name: String,
        normal_balance: NormalBalance,
    ) -> Self {
        Self {
            id: SubsidiaryAccountId::new(),
            main_account_code,
            entity_type,
            entity_id,
            name,
            normal_balance,
            debit_balance: Decimal::ZERO,
            credit_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Mirrors a posted line's amounts into this subsidiary's balance.
    ///
    /// Engine-internal: runs under the posting transaction, once per
    /// tagged line.
    pub fn apply_posting_delta(&mut self, debit_delta: Decimal, credit_delta: Decimal) {
        self.debit_balance += debit_delta;
        self.credit_balance += credit_delta;
        self.current_balance = self
            .normal_balance
            .balance_change(self.debit_balance, self.credit_balance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer_receivable() -> SubsidiaryAccount {
        SubsidiaryAccount::new(
            "1200".into(),
            EntityType::Customer,
            Uuid::now_v7(),
            "Acme Pty Ltd".into(),
            NormalBalance::Debit,
        )
    }

    #[test]
    fn test_new_subsidiary_zero_balance() {
        let sub = customer_receivable();
        assert_eq!(sub.current_balance, Decimal::ZERO);
        assert_eq!(sub.entity_type, EntityType::Customer);
    }

    #[test]
    fn test_receivable_sign_convention() {
        // Receivables are debit-normal: invoice debits raise the balance,
        // payment credits lower it.
        let mut sub = customer_receivable();
        sub.apply_posting_delta(dec!(1000.00), Decimal::ZERO);
        assert_eq!(sub.current_balance, dec!(1000.00));

        sub.apply_posting_delta(Decimal::ZERO, dec!(400.00));
        assert_eq!(sub.current_balance, dec!(600.00));
    }

    #[test]
    fn test_payable_sign_convention() {
        let mut sub = SubsidiaryAccount::new(
            "2100".into(),
            EntityType::Vendor,
            Uuid::now_v7(),
            "Supplies Inc".into(),
            NormalBalance::Credit,
        );
        sub.apply_posting_delta(Decimal::ZERO, dec!(500.00));
        assert_eq!(sub.current_balance, dec!(500.00));

        sub.apply_posting_delta(dec!(200.00), Decimal::ZERO);
        assert_eq!(sub.current_balance, dec!(300.00));
    }
}
