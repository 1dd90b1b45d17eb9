//! Batch Transfer Protocol
//!
//! Applies an ordered list of payments under the host's computation
//! budget. The protocol is self-calibrating and gracefully degrading: it
//! estimates the cost of the next payment from measured costs of the
//! previous ones, stops before a step that might not fit, and reports the
//! shortfall through the summary record instead of failing the call.
//!
//! Leftover payments are the caller's to resubmit; nothing here retries.

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount, Gas};

use crate::constants::{
    DEFAULT_MIN_GAS_REMAINING, INITIAL_TRANSFER_GAS_COST, MAX_BATCH_PAYMENTS,
};
use crate::events::LedgerEvent;
use crate::gas::GasMeter;
use crate::ledger::Ledger;

/// One payment in a batch: receiver and amount. Ephemeral, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Credited account; the zero address ends the batch early
    pub receiver: Address,
    /// Amount in base units
    pub amount: Amount,
}

impl Ledger {
    /// Apply `payments` in order, greedily, within the remaining budget.
    ///
    /// The caller's balance is debited against a working snapshot and
    /// committed back in a single write once the batch is resolved, so the
    /// storage-mutation cost stays flat in the number of payments.
    ///
    /// Iteration stops at the first of:
    /// - the budget floor: remaining gas under
    ///   `min_gas_remaining + per_transfer_cost` (reported as exhausted)
    /// - a zero-address receiver (end-of-batch sentinel, not an error)
    /// - a payment larger than the working balance
    /// - [`MAX_BATCH_PAYMENTS`] processed payments
    ///
    /// A payment to the caller itself moves nothing but still counts as
    /// processed and emits its Transfer record.
    ///
    /// The per-payment cost estimate starts at
    /// [`INITIAL_TRANSFER_GAS_COST`] and rises to the costliest step
    /// measured so far; it never decreases within a call. Checking the
    /// budget *before* each step keeps the call from dying mid-payment in
    /// hosts that abort on exhaustion.
    ///
    /// Returns the number of payments applied. The summary record carries
    /// the rest: final balance, total value, final cost estimate, and the
    /// exhausted flag.
    pub fn batch_transfer(
        &mut self,
        caller: &Address,
        payments: &[Payment],
        min_gas_remaining: Option<Gas>,
        meter: &dyn GasMeter,
    ) -> u32 {
        let min_gas = min_gas_remaining.unwrap_or(DEFAULT_MIN_GAS_REMAINING);

        // Working copy of the caller's balance; stored state is untouched
        // until the single commit below.
        let mut working = self.balance_of(caller);
        let mut processed: u32 = 0;
        let mut value_moved: Amount = 0;
        let mut per_transfer_cost: Gas = INITIAL_TRANSFER_GAS_COST;
        let mut gas_exhausted = false;

        let mut gas_before = meter.remaining();

        for payment in payments.iter().take(MAX_BATCH_PAYMENTS) {
            // Budget floor check happens before the step is attempted
            if gas_before < min_gas.saturating_add(per_transfer_cost) {
                gas_exhausted = true;
                break;
            }

            // Explicit end-of-batch sentinel
            if payment.receiver.is_zero() {
                break;
            }

            if working < payment.amount {
                break;
            }

            if payment.receiver != *caller {
                working -= payment.amount;
                *self.balances.entry(payment.receiver).or_insert(0) += payment.amount;
            }

            self.record(LedgerEvent::Transfer {
                sender: *caller,
                receiver: payment.receiver,
                amount: payment.amount,
            });

            processed += 1;
            value_moved = value_moved.saturating_add(payment.amount);

            // Calibrate the estimate against the measured cost of this step
            let gas_after = meter.remaining();
            let consumed = gas_before.saturating_sub(gas_after);
            if consumed > per_transfer_cost {
                per_transfer_cost = consumed;
            }
            gas_before = gas_after;
        }

        // Single write-back of the working balance
        if value_moved > 0 {
            self.balances.insert(*caller, working);
        }

        let sender_balance_after = self.balance_of(caller);

        tracing::info!(
            "batch_transfer: {:?} applied {} payments, value {}, cost/tx {}, exhausted {}",
            caller,
            processed,
            value_moved,
            per_transfer_cost,
            gas_exhausted
        );

        self.record(LedgerEvent::BatchTransfer {
            sender: *caller,
            sender_balance_after,
            tx_count: processed,
            tx_value: value_moved,
            gas_per_tx: per_transfer_cost,
            gas_exhausted,
        });

        processed
    }
}
