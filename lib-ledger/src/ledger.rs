//! Ledger State
//!
//! The [`Ledger`] is the single stateful component of the system: balances,
//! delegated allowances, supply, roles, and the ordered event log. The
//! hosting environment owns exactly one instance per deployment, serializes
//! calls to it, and persists it between calls.
//!
//! All operations are synchronous, atomic state transitions. A failed
//! operation leaves the ledger untouched, including the event log.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount};

use crate::constants::{MUSD_TOKEN_DECIMALS, MUSD_TOKEN_NAME, MUSD_TOKEN_SYMBOL};
use crate::events::{EventRecord, LedgerEvent};

// =============================================================================
// LEDGER STATE
// =============================================================================

/// The fungible-token ledger.
///
/// Accounts exist implicitly wherever they appear as a key; an absent
/// balance or allowance entry reads as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    // =========================================================================
    // Roles
    // =========================================================================
    /// Privileged account. Initially the initializer identity; reassigned
    /// through `transfer_ownership`. Always authorized to mint.
    pub owner: Address,
    /// Accounts authorized to mint in addition to the owner
    pub minters: HashSet<Address>,

    // =========================================================================
    // Ledger State
    // =========================================================================
    /// Account balances in base units
    pub balances: HashMap<Address, Amount>,
    /// Remaining delegated spend authority, keyed by (owner, spender)
    pub allowances: HashMap<(Address, Address), Amount>,
    /// Total supply in circulation. Increased only by mint, decreased only
    /// by burn.
    pub total_supply: Amount,

    // =========================================================================
    // Event Log
    // =========================================================================
    /// Ordered, observable record of every state change
    pub events: Vec<EventRecord>,
    /// Sequence number assigned to the next event
    pub next_sequence: u64,
}

impl Ledger {
    /// Create the ledger at initialization time.
    ///
    /// Supply starts at zero, the initializer becomes owner, and all
    /// balances and allowances are absent.
    pub fn new(initializer: Address) -> Self {
        Self {
            owner: initializer,
            minters: HashSet::new(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
            events: Vec::new(),
            next_sequence: 0,
        }
    }

    // =========================================================================
    // Metadata Queries
    // =========================================================================

    /// Human-readable token name
    pub fn name(&self) -> &'static str {
        MUSD_TOKEN_NAME
    }

    /// Token symbol
    pub fn symbol(&self) -> &'static str {
        MUSD_TOKEN_SYMBOL
    }

    /// Number of decimal places
    pub fn decimals(&self) -> u8 {
        MUSD_TOKEN_DECIMALS
    }

    /// Total supply in circulation
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    // =========================================================================
    // State Queries
    // =========================================================================

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Get remaining allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Current owner account
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Literal minter-set membership. The owner's implicit mint authority
    /// is not reflected here.
    pub fn is_minter(&self, account: &Address) -> bool {
        self.minters.contains(account)
    }

    // =========================================================================
    // Event Log
    // =========================================================================

    /// Events recorded so far, in order
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Drain the event log. Hosts call this after each operation to feed
    /// their subscription layer; sequence numbers keep increasing across
    /// drains.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    /// Append one event to the log
    pub(crate) fn record(&mut self, event: LedgerEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(EventRecord { sequence, event });
    }

    // =========================================================================
    // Invariant Audit
    // =========================================================================

    /// Verify the global accounting invariants hold.
    ///
    /// Returns Ok(()) if all invariants pass, or Err with a description of
    /// the failure. Hosts can run this as a corruption check after
    /// restoring persisted state.
    pub fn verify_invariants(&self) -> Result<(), String> {
        // total_supply == Σ balances[*], computed without wrapping
        let mut sum_balances: u128 = 0;
        for balance in self.balances.values() {
            sum_balances += *balance as u128;
        }
        if sum_balances != self.total_supply as u128 {
            return Err(format!(
                "Invariant violated: sum(balances) {} != total_supply {}",
                sum_balances, self.total_supply
            ));
        }

        // Event sequence numbers are strictly increasing
        let mut previous: Option<u64> = None;
        for record in &self.events {
            if let Some(prev) = previous {
                if record.sequence <= prev {
                    return Err(format!(
                        "Invariant violated: event sequence {} after {}",
                        record.sequence, prev
                    ));
                }
            }
            previous = Some(record.sequence);
        }

        Ok(())
    }
}
