//! Property tests for entry validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{LineInput, LineSide};
use super::validation::validate_lines;

/// Strategy for strictly positive amounts with 2 decimal places.
fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for an account code.
fn account_code_strategy() -> impl Strategy<Value = String> {
    (1000u32..9999u32).prop_map(|n| n.to_string())
}

/// Strategy for a balanced set of lines: each generated amount produces
/// one debit and one credit line of the same value.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<LineInput>> {
    prop::collection::vec(
        (account_code_strategy(), account_code_strategy(), positive_amount_strategy()),
        1..10,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .flat_map(|(debit_account, credit_account, amount)| {
                vec![
                    LineInput::debit(debit_account, amount),
                    LineInput::credit(credit_account, amount),
                ]
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any set of matched debit/credit pairs validates as balanced, and
    /// the computed totals equal the sum of the generated amounts.
    #[test]
    fn prop_matched_pairs_always_balance(lines in balanced_lines_strategy()) {
        let totals = validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, totals.total_credit);

        let expected: Decimal = lines
            .iter()
            .filter(|l| l.side == LineSide::Debit)
            .map(|l| l.amount)
            .sum();
        prop_assert_eq!(totals.total_debit, expected);
    }

    /// Perturbing any single line of a balanced set by a non-zero delta
    /// always produces `UnbalancedEntry`.
    #[test]
    fn prop_any_perturbation_unbalances(
        lines in balanced_lines_strategy(),
        delta in 1i64..100_000i64,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut lines = lines;
        let idx = pick.index(lines.len());
        lines[idx].amount += Decimal::new(delta, 2);

        prop_assert!(
            matches!(
                validate_lines(&lines),
                Err(LedgerError::UnbalancedEntry { .. })
            ),
            "expected Err(LedgerError::UnbalancedEntry)"
        );
    }

    /// A zero or negative amount anywhere is rejected before the balance
    /// check runs, regardless of the other lines.
    #[test]
    fn prop_nonpositive_amount_rejected(
        lines in balanced_lines_strategy(),
        pick in any::<prop::sample::Index>(),
        make_negative in any::<bool>(),
    ) {
        let mut lines = lines;
        let idx = pick.index(lines.len());
        lines[idx].amount = if make_negative {
            -lines[idx].amount
        } else {
            Decimal::ZERO
        };

        let result = validate_lines(&lines);
        prop_assert!(matches!(
            result,
            Err(LedgerError::ZeroAmount | LedgerError::NegativeAmount)
        ));
    }

    /// Fewer than two lines is always rejected, balanced or not.
    #[test]
    fn prop_single_line_rejected(
        code in account_code_strategy(),
        amount in positive_amount_strategy(),
    ) {
        let lines = vec![LineInput::debit(code, amount)];
        prop_assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InsufficientLines)
        ));
    }

    /// Validation is pure: running it twice on the same input yields the
    /// same totals.
    #[test]
    fn prop_validation_deterministic(lines in balanced_lines_strategy()) {
        let first = validate_lines(&lines).unwrap();
        let second = validate_lines(&lines).unwrap();
        prop_assert_eq!(first.total_debit, second.total_debit);
        prop_assert_eq!(first.total_credit, second.total_credit);
    }
}
