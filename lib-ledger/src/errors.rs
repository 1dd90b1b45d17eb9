//! Ledger Operation Errors

use lib_types::{Address, Amount};
use thiserror::Error;

/// Error during ledger operations.
///
/// Every failure is local, synchronous, and fail-fast: the triggering
/// operation applies no state mutation and appends no event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid receiver: the zero address cannot receive a transfer")]
    InvalidReceiver,

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Access denied: caller lacks the required role")]
    AccessDenied,

    #[error("Invalid target: the zero address cannot hold a role")]
    InvalidTarget,

    #[error("Not a minter: {0:?}")]
    NotAMinter(Address),

    #[error("Arithmetic overflow")]
    Overflow,
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
