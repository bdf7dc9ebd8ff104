//! Draft journal entry construction.

use chrono::Utc;
use toko_core::ledger::{
    BuildEntryInput, EntryStatus, JournalEntry, JournalLine, LedgerError, validate_lines,
};
use toko_shared::types::{JournalEntryId, JournalLineId};
use tracing::debug;

use crate::store::{LedgerState, LedgerStore};

/// Builds validated draft entries.
///
/// An entry that fails any check here is never stored; there is no such
/// thing as an unbalanced or half-validated draft. Periods are not
/// consulted at build time: drafts may be dated into a period that is
/// not open yet, and the posting engine re-checks the period when the
/// entry actually posts.
#[derive(Debug, Clone)]
pub struct LedgerEntryBuilder {
    store: LedgerStore,
    entry_number_prefix: String,
}

impl LedgerEntryBuilder {
    pub(crate) fn new(store: LedgerStore, entry_number_prefix: String) -> Self {
        Self {
            store,
            entry_number_prefix,
        }
    }

    /// Validates the input and stores a new draft entry.
    ///
    /// Checks, in order: line rules (count, positivity, exact balance),
    /// account existence and activity, and subsidiary references. The
    /// sequential entry number is allocated under the same write guard
    /// that stores the draft.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is stored on error.
    pub fn build(&self, input: BuildEntryInput) -> Result<JournalEntry, LedgerError> {
        let totals = validate_lines(&input.lines)?;

        let mut state = self.store.write();
        validate_line_references(&state, &input)?;

        let entry_id = JournalEntryId::new();
        let lines = input
            .lines
            .iter()
            .map(|line| {
                let (debit, credit) = line.amounts();
                JournalLine {
                    id: JournalLineId::new(),
                    entry_id,
                    account_code: line.account_code.clone(),
                    debit,
                    credit,
                    description: line.description.clone(),
                    subsidiary_id: line.subsidiary_id,
                }
            })
            .collect();

        let entry = JournalEntry {
            id: entry_id,
            entry_number: state.next_entry_number(&self.entry_number_prefix),
            entry_date: input.entry_date,
            description: input.description,
            reference: input.reference,
            source_type: input.source_type,
            source_id: input.source_id,
            status: EntryStatus::Draft,
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
            is_balanced: totals.is_balanced,
            requires_approval: input.requires_approval,
            approved_by: None,
            approved_at: None,
            posted_by: None,
            posted_at: None,
            reverses_entry_id: None,
            reversed_by_entry_id: None,
            created_by: input.created_by,
            created_at: Utc::now(),
            lines,
        };

        debug!(entry_number = %entry.entry_number, lines = entry.lines.len(), "draft entry created");
        state.insert_entry(entry.clone());
        Ok(entry)
    }
}

/// Checks that every line references a postable account, and that any
/// subsidiary tag belongs to the line's account.
fn validate_line_references(
    state: &LedgerState,
    input: &BuildEntryInput,
) -> Result<(), LedgerError> {
    for line in &input.lines {
        let account = state.account(&line.account_code)?;
        account.validate_postable()?;

        if let Some(subsidiary_id) = line.subsidiary_id {
            let subsidiary = state.subsidiary(subsidiary_id)?;
            if subsidiary.main_account_code != line.account_code {
                return Err(LedgerError::SubsidiaryMismatch {
                    subsidiary: subsidiary_id,
                    account_code: line.account_code.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use toko_core::ledger::{AccountType, LineInput, SourceType};
    use toko_shared::types::UserId;

    use crate::registry::{AccountRegistry, CreateAccountInput};

    fn setup() -> (LedgerStore, LedgerEntryBuilder) {
        let store = LedgerStore::new();
        let registry = AccountRegistry::new(store.clone());
        for (code, account_type) in [
            ("1100", AccountType::Asset),
            ("4000", AccountType::Revenue),
        ] {
            registry
                .create_account(CreateAccountInput {
                    code: code.into(),
                    name: format!("Account {code}"),
                    account_type,
                    parent_code: None,
                })
                .unwrap();
        }
        let builder = LedgerEntryBuilder::new(store.clone(), "JE".into());
        (store, builder)
    }

    fn sale_input() -> BuildEntryInput {
        BuildEntryInput {
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            description: "Cash sale".into(),
            reference: None,
            source_type: SourceType::Manual,
            source_id: None,
            lines: vec![
                LineInput::debit("1100", dec!(1000.00)),
                LineInput::credit("4000", dec!(1000.00)),
            ],
            requires_approval: false,
            created_by: UserId::new(),
        }
    }

    #[test]
    fn test_build_balanced_draft() {
        let (_, builder) = setup();
        let entry = builder.build(sale_input()).unwrap();
        assert_eq!(entry.status, EntryStatus::Draft);
        assert_eq!(entry.entry_number, "JE-000001");
        assert_eq!(entry.total_debit, dec!(1000.00));
        assert!(entry.is_balanced);
        assert_eq!(entry.lines.len(), 2);
    }

    #[test]
    fn test_unbalanced_input_rejected_and_not_stored() {
        let (store, builder) = setup();
        let mut input = sale_input();
        input.lines[1] = LineInput::credit("4000", dec!(999.00));

        assert!(matches!(
            builder.build(input),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
        assert!(store.read().entries.is_empty());
    }

    #[test]
    fn test_unknown_account_rejected() {
        let (_, builder) = setup();
        let mut input = sale_input();
        input.lines[0] = LineInput::debit("9999", dec!(1000.00));
        assert!(matches!(
            builder.build(input),
            Err(LedgerError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let (store, builder) = setup();
        store.write().account_mut("1100").unwrap().is_active = false;
        assert!(matches!(
            builder.build(sale_input()),
            Err(LedgerError::AccountInactive(_))
        ));
    }

    #[test]
    fn test_unknown_subsidiary_rejected() {
        let (_, builder) = setup();
        let mut input = sale_input();
        input.lines[0] = LineInput::debit("1100", dec!(1000.00))
            .with_subsidiary(toko_shared::types::SubsidiaryAccountId::new());
        assert!(matches!(
            builder.build(input),
            Err(LedgerError::SubsidiaryNotFound(_))
        ));
    }

    #[test]
    fn test_entry_numbers_increment() {
        let (_, builder) = setup();
        let first = builder.build(sale_input()).unwrap();
        let second = builder.build(sale_input()).unwrap();
        assert_eq!(first.entry_number, "JE-000001");
        assert_eq!(second.entry_number, "JE-000002");
    }
}
