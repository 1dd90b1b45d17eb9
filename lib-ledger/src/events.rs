//! Ledger Events
//!
//! Every state change in the ledger emits an event. The ordered event log
//! is the source of truth for external observers: wallets, indexers, and
//! administrative tooling subscribe to it through the hosting environment.

use lib_types::{Address, Amount, Gas};
use serde::{Deserialize, Serialize};

/// Ledger events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Value moved between accounts. Mints carry the zero address as
    /// sender, burns carry it as receiver.
    Transfer {
        /// Debited account
        sender: Address,
        /// Credited account
        receiver: Address,
        /// Amount moved in base units
        amount: Amount,
    },

    /// Delegated spend authority was set (overwrite, not increment)
    Approval {
        /// Account granting the authority
        owner: Address,
        /// Account receiving the authority
        spender: Address,
        /// New remaining allowance
        amount: Amount,
    },

    /// Ledger ownership was reassigned
    OwnershipTransfer {
        /// Outgoing owner
        previous_owner: Address,
        /// Incoming owner
        new_owner: Address,
    },

    /// Summary of one batch-transfer call
    BatchTransfer {
        /// Batch initiator
        sender: Address,
        /// Sender's stored balance after the batch committed
        sender_balance_after: Amount,
        /// Number of payments applied
        tx_count: u32,
        /// Total value moved
        tx_value: Amount,
        /// Final per-payment cost estimate
        gas_per_tx: Gas,
        /// Whether iteration stopped on the budget floor
        gas_exhausted: bool,
    },
}

impl LedgerEvent {
    /// Stable event-kind tag for indexing and logging
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::Transfer { .. } => "transfer",
            LedgerEvent::Approval { .. } => "approval",
            LedgerEvent::OwnershipTransfer { .. } => "ownership_transfer",
            LedgerEvent::BatchTransfer { .. } => "batch_transfer",
        }
    }
}

/// One ordered append to the observable log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    /// Position in the log, strictly increasing across the ledger lifetime
    pub sequence: u64,
    /// The recorded event
    pub event: LedgerEvent,
}
