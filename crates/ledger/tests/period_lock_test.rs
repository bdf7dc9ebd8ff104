//! Period lifecycle tests.
//!
//! Verifies the Open -> Closed -> Locked state machine end to end:
//! closed periods reject postings but can reopen; locked periods are
//! permanent and freeze every entry dated inside them.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use toko_core::ledger::{AccountType, BuildEntryInput, EntryStatus, LedgerError, LineInput, SourceType};
use toko_core::period::PeriodStatus;
use toko_ledger::{CreateAccountInput, Ledger};
use toko_shared::LedgerConfig;
use toko_shared::types::UserId;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_ledger() -> Ledger {
    let ledger = Ledger::new(LedgerConfig::default());
    for (code, account_type) in [
        ("1100", AccountType::Asset),
        ("4000", AccountType::Revenue),
    ] {
        ledger
            .accounts()
            .create_account(CreateAccountInput {
                code: code.into(),
                name: format!("Account {code}"),
                account_type,
                parent_code: None,
            })
            .unwrap();
    }
    ledger
        .periods()
        .create_period("March 2026", date(2026, 3, 1), date(2026, 3, 31))
        .unwrap();
    ledger
        .periods()
        .create_period("April 2026", date(2026, 4, 1), date(2026, 4, 30))
        .unwrap();
    ledger
}

fn entry_on(day: NaiveDate) -> BuildEntryInput {
    BuildEntryInput {
        entry_date: day,
        description: "Sale".into(),
        reference: None,
        source_type: SourceType::Manual,
        source_id: None,
        lines: vec![
            LineInput::debit("1100", dec!(100.00)),
            LineInput::credit("4000", dec!(100.00)),
        ],
        requires_approval: false,
        created_by: UserId::new(),
    }
}

#[test]
fn closed_period_rejects_posting_until_reopened() {
    let ledger = setup_ledger();
    let actor = UserId::new();

    let draft = ledger.entries().build(entry_on(date(2026, 3, 10))).unwrap();
    // Posting the draft first so the close is not blocked by it.
    ledger.posting().post(draft.id, actor).unwrap();
    ledger.periods().close_period(date(2026, 3, 1), actor).unwrap();

    let late = ledger.entries().build(entry_on(date(2026, 3, 20))).unwrap();
    assert!(matches!(
        ledger.posting().post(late.id, actor),
        Err(LedgerError::PeriodClosed)
    ));

    ledger.periods().reopen_period(date(2026, 3, 1)).unwrap();
    let posted = ledger.posting().post(late.id, actor).unwrap();
    assert_eq!(posted.status, EntryStatus::Posted);
}

#[test]
fn close_is_blocked_by_draft_entries() {
    let ledger = setup_ledger();
    let actor = UserId::new();

    ledger.entries().build(entry_on(date(2026, 3, 10))).unwrap();
    ledger.entries().build(entry_on(date(2026, 3, 11))).unwrap();
    // Draft in a different period must not count.
    ledger.entries().build(entry_on(date(2026, 4, 2))).unwrap();

    assert!(matches!(
        ledger.periods().close_period(date(2026, 3, 1), actor),
        Err(LedgerError::OpenEntriesExist { count: 2 })
    ));
}

#[test]
fn locked_period_is_absolute() {
    let ledger = setup_ledger();
    let actor = UserId::new();

    // Post, then close and lock March.
    let entry = ledger
        .create_and_post_entry(entry_on(date(2026, 3, 10)), actor)
        .unwrap();
    ledger.periods().close_period(date(2026, 3, 1), actor).unwrap();
    ledger.periods().lock_period(date(2026, 3, 1), actor).unwrap();

    // No posting into the locked period.
    let stranded = ledger.entries().build(entry_on(date(2026, 3, 20))).unwrap();
    assert!(matches!(
        ledger.posting().post(stranded.id, actor),
        Err(LedgerError::PeriodLocked)
    ));

    // No reversal of an entry dated inside it.
    assert!(matches!(
        ledger.posting().reverse(entry.id, "found an error", actor),
        Err(LedgerError::PeriodLocked)
    ));

    // No way back out of Locked.
    assert!(matches!(
        ledger.periods().reopen_period(date(2026, 3, 1)),
        Err(LedgerError::InvalidPeriodTransition { .. })
    ));

    // The untouched balance is still reported.
    assert_eq!(
        ledger.accounts().get_account("1100").unwrap().current_balance,
        dec!(100.00)
    );
    // April is unaffected.
    assert_eq!(
        ledger.periods().get_period_for_date(date(2026, 4, 15)).unwrap().status,
        PeriodStatus::Open
    );
}

#[test]
fn lock_requires_close_first() {
    let ledger = setup_ledger();
    let actor = UserId::new();

    assert!(matches!(
        ledger.periods().lock_period(date(2026, 3, 1), actor),
        Err(LedgerError::InvalidPeriodTransition { .. })
    ));
}

#[test]
fn posting_without_a_period_fails() {
    let ledger = setup_ledger();
    let actor = UserId::new();

    let draft = ledger.entries().build(entry_on(date(2026, 6, 1))).unwrap();
    assert!(matches!(
        ledger.posting().post(draft.id, actor),
        Err(LedgerError::PeriodNotFound(_))
    ));
}
