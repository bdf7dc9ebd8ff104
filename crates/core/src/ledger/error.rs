//! Ledger error types for validation, state, and policy violations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use toko_shared::types::{JournalEntryId, SubsidiaryAccountId};

/// Errors that can occur during ledger operations.
///
/// Every failure is returned before any mutation; the ledger never
/// partially commits on an error path and never retries internally.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry is not balanced (debits != credits).
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(String),

    /// Account code already exists.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(String),

    // ========== Entry State Errors ==========
    /// Entry not found.
    #[error("Entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// Entry cannot be posted from its current status.
    #[error("Cannot post entry in status '{status}'")]
    CannotPost {
        /// The entry's current status.
        status: String,
    },

    /// Entry cannot be approved from its current status.
    #[error("Cannot approve entry in status '{status}'")]
    CannotApprove {
        /// The entry's current status.
        status: String,
    },

    /// Entry cannot be reversed from its current status.
    #[error("Cannot reverse entry in status '{status}'")]
    CannotReverse {
        /// The entry's current status.
        status: String,
    },

    /// A reversal must state its reason.
    #[error("Reversal reason is required")]
    ReasonRequired,

    /// Entry requires approval before posting.
    #[error("Entry total {total} exceeds approval threshold {threshold}; approval required")]
    ApprovalRequired {
        /// The entry's total amount.
        total: Decimal,
        /// The configured threshold.
        threshold: Decimal,
    },

    // ========== Period Errors ==========
    /// No accounting period found for the given date.
    #[error("No accounting period found for date {0}")]
    PeriodNotFound(NaiveDate),

    /// Period is closed, no posting allowed.
    #[error("Accounting period is closed, no posting allowed")]
    PeriodClosed,

    /// Period is locked; entries dated within it are frozen permanently.
    #[error("Accounting period is locked, no posting, reversal, or edit allowed")]
    PeriodLocked,

    /// Period dates overlap an existing period.
    #[error("Period dates overlap existing period '{name}'")]
    OverlappingPeriod {
        /// The name of the conflicting period.
        name: String,
    },

    /// Period start date is not before its end date.
    #[error("Period start date must be on or before end date")]
    InvalidPeriodRange,

    /// Period cannot be closed while draft entries are dated inside it.
    #[error("Cannot close period: {count} draft entries are dated within it")]
    OpenEntriesExist {
        /// The number of offending draft entries.
        count: usize,
    },

    /// Invalid period status transition.
    #[error("Invalid period transition from '{from}' to '{to}'")]
    InvalidPeriodTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    // ========== Subledger Errors ==========
    /// Subsidiary account not found.
    #[error("Subsidiary account not found: {0}")]
    SubsidiaryNotFound(SubsidiaryAccountId),

    /// Subsidiary account's entity is already registered.
    #[error("Subsidiary account already registered for this entity")]
    DuplicateSubsidiary,

    /// Line tagged with a subsidiary that belongs to a different main account.
    #[error("Subsidiary account {subsidiary} does not belong to account {account_code}")]
    SubsidiaryMismatch {
        /// The tagged subsidiary.
        subsidiary: SubsidiaryAccountId,
        /// The account code on the line.
        account_code: String,
    },

    // ========== Integrity Errors ==========
    /// A report detected an imbalance that should be structurally
    /// impossible. Indicates a posting-engine defect, not user error.
    #[error(
        "Ledger integrity violation: total debits {debit} != total credits {credit}"
    )]
    IntegrityViolation {
        /// Total debits found.
        debit: Decimal,
        /// Total credits found.
        credit: Decimal,
    },
}

impl LedgerError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::CannotPost { .. } => "CANNOT_POST",
            Self::CannotApprove { .. } => "CANNOT_APPROVE",
            Self::CannotReverse { .. } => "CANNOT_REVERSE",
            Self::ReasonRequired => "REASON_REQUIRED",
            Self::ApprovalRequired { .. } => "APPROVAL_REQUIRED",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::PeriodClosed => "PERIOD_CLOSED",
            Self::PeriodLocked => "PERIOD_LOCKED",
            Self::OverlappingPeriod { .. } => "OVERLAPPING_PERIOD",
            Self::InvalidPeriodRange => "INVALID_PERIOD_RANGE",
            Self::OpenEntriesExist { .. } => "OPEN_ENTRIES_EXIST",
            Self::InvalidPeriodTransition { .. } => "INVALID_PERIOD_TRANSITION",
            Self::SubsidiaryNotFound(_) => "SUBSIDIARY_NOT_FOUND",
            Self::DuplicateSubsidiary => "DUPLICATE_SUBSIDIARY",
            Self::SubsidiaryMismatch { .. } => "SUBSIDIARY_MISMATCH",
            Self::IntegrityViolation { .. } => "INTEGRITY_VIOLATION",
        }
    }

    /// Returns true if the error signals a defect rather than bad input.
    #[must_use]
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::IntegrityViolation { .. })
    }
}

impl From<LedgerError> for toko_shared::AppError {
    fn from(err: LedgerError) -> Self {
        use toko_shared::AppError;

        let reason = err.to_string();
        match err {
            LedgerError::AccountNotFound(_)
            | LedgerError::ParentNotFound(_)
            | LedgerError::EntryNotFound(_)
            | LedgerError::PeriodNotFound(_)
            | LedgerError::SubsidiaryNotFound(_) => AppError::NotFound(reason),

            LedgerError::InsufficientLines
            | LedgerError::UnbalancedEntry { .. }
            | LedgerError::ZeroAmount
            | LedgerError::NegativeAmount
            | LedgerError::ReasonRequired
            | LedgerError::SubsidiaryMismatch { .. }
            | LedgerError::InvalidPeriodRange => AppError::Validation(reason),

            LedgerError::DuplicateCode(_)
            | LedgerError::OverlappingPeriod { .. }
            | LedgerError::DuplicateSubsidiary => AppError::Conflict(reason),

            LedgerError::AccountInactive(_)
            | LedgerError::CannotPost { .. }
            | LedgerError::CannotApprove { .. }
            | LedgerError::CannotReverse { .. }
            | LedgerError::ApprovalRequired { .. }
            | LedgerError::PeriodClosed
            | LedgerError::PeriodLocked
            | LedgerError::OpenEntriesExist { .. }
            | LedgerError::InvalidPeriodTransition { .. } => AppError::BusinessRule(reason),

            LedgerError::IntegrityViolation { .. } => AppError::Internal(reason),
        }
    }
}
