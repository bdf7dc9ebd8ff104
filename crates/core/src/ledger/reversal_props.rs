//! Property tests for reversing-entry construction.

use proptest::prelude::*;
use rust_decimal::Decimal;
use toko_shared::types::{JournalEntryId, JournalLineId};

use super::entry::JournalLine;
use super::reversal::build_reversing_lines;
use super::types::LineSide;

fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a balanced set of posted lines.
fn posted_lines_strategy() -> impl Strategy<Value = Vec<JournalLine>> {
    prop::collection::vec((1000u32..9999u32, positive_amount_strategy()), 1..8).prop_map(
        |pairs| {
            let entry_id = JournalEntryId::new();
            pairs
                .into_iter()
                .flat_map(|(code, amount)| {
                    let debit_line = JournalLine {
                        id: JournalLineId::new(),
                        entry_id,
                        account_code: code.to_string(),
                        debit: amount,
                        credit: Decimal::ZERO,
                        description: None,
                        subsidiary_id: None,
                    };
                    let credit_line = JournalLine {
                        id: JournalLineId::new(),
                        entry_id,
                        account_code: (code + 1).to_string(),
                        debit: Decimal::ZERO,
                        credit: amount,
                        description: None,
                        subsidiary_id: None,
                    };
                    vec![debit_line, credit_line]
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Reversal law: new total debits equal old total credits and vice
    /// versa, for any balanced set of posted lines.
    #[test]
    fn prop_totals_swap(lines in posted_lines_strategy()) {
        let old_debits: Decimal = lines.iter().map(|l| l.debit).sum();
        let old_credits: Decimal = lines.iter().map(|l| l.credit).sum();

        let reversed = build_reversing_lines(&lines);
        let new_debits: Decimal = reversed.iter().map(|l| l.amounts().0).sum();
        let new_credits: Decimal = reversed.iter().map(|l| l.amounts().1).sum();

        prop_assert_eq!(new_debits, old_credits);
        prop_assert_eq!(new_credits, old_debits);
    }

    /// Net-zero effect: for every account, the signed sum of original
    /// plus reversing lines is zero.
    #[test]
    fn prop_net_zero_per_account(lines in posted_lines_strategy()) {
        let reversed = build_reversing_lines(&lines);

        let mut per_account: std::collections::HashMap<String, Decimal> =
            std::collections::HashMap::new();
        for line in &lines {
            *per_account.entry(line.account_code.clone()).or_default() +=
                line.debit - line.credit;
        }
        for line in &reversed {
            let (debit, credit) = line.amounts();
            *per_account.entry(line.account_code.clone()).or_default() += debit - credit;
        }

        for (account, net) in per_account {
            prop_assert_eq!(net, Decimal::ZERO, "account {} nets to zero", account);
        }
    }

    /// Structure is preserved: same line count, same accounts in order,
    /// every side flipped.
    #[test]
    fn prop_structure_preserved(lines in posted_lines_strategy()) {
        let reversed = build_reversing_lines(&lines);
        prop_assert_eq!(reversed.len(), lines.len());

        for (original, flipped) in lines.iter().zip(reversed.iter()) {
            prop_assert_eq!(&original.account_code, &flipped.account_code);
            let expected_side = if original.debit > Decimal::ZERO {
                LineSide::Credit
            } else {
                LineSide::Debit
            };
            prop_assert_eq!(flipped.side, expected_side);
        }
    }
}
