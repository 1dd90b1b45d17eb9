//! Transfer Engine
//!
//! Invariant-preserving mutation primitives: single transfer, delegated
//! transfer, allowance management, mint, and burn. Every operation either
//! applies all of its state transitions and appends its events, or fails
//! with a typed error and touches nothing.

use lib_types::{Address, Amount};

use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::ledger::Ledger;

impl Ledger {
    /// Move `amount` from the caller to `receiver`.
    ///
    /// Burning through transfer is rejected; destroying supply goes through
    /// the dedicated [`burn`](Self::burn) operation.
    ///
    /// # Errors
    /// - `InvalidReceiver` if `receiver` is the zero address
    /// - `InsufficientBalance` if the caller holds less than `amount`
    pub fn transfer(
        &mut self,
        caller: &Address,
        receiver: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        if receiver.is_zero() {
            return Err(LedgerError::InvalidReceiver);
        }

        let caller_balance = self.balance_of(caller);
        if caller_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: caller_balance,
                need: amount,
            });
        }

        // Debit then credit. The supply invariant bounds the credit, so the
        // addition cannot overflow.
        self.balances.insert(*caller, caller_balance - amount);
        *self.balances.entry(*receiver).or_insert(0) += amount;

        tracing::debug!("transfer: {:?} -> {:?} amount {}", caller, receiver, amount);

        self.record(LedgerEvent::Transfer {
            sender: *caller,
            receiver: *receiver,
            amount,
        });

        Ok(())
    }

    /// Move `amount` from `owner` to `receiver` on the strength of an
    /// allowance granted to the caller.
    ///
    /// # Errors
    /// - `InvalidReceiver` if `receiver` is the zero address
    /// - `InsufficientAllowance` if allowance(owner, caller) < `amount`
    /// - `InsufficientBalance` if `owner` holds less than `amount`
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        owner: &Address,
        receiver: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        if receiver.is_zero() {
            return Err(LedgerError::InvalidReceiver);
        }

        let allowance = self.allowance(owner, caller);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: allowance,
                need: amount,
            });
        }

        let owner_balance = self.balance_of(owner);
        if owner_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: owner_balance,
                need: amount,
            });
        }

        self.allowances.insert((*owner, *caller), allowance - amount);
        self.balances.insert(*owner, owner_balance - amount);
        *self.balances.entry(*receiver).or_insert(0) += amount;

        tracing::debug!(
            "transfer_from: {:?} spends {} of {:?} -> {:?}",
            caller,
            amount,
            owner,
            receiver
        );

        self.record(LedgerEvent::Transfer {
            sender: *owner,
            receiver: *receiver,
            amount,
        });

        Ok(())
    }

    /// Set the allowance granted by the caller to `spender`.
    ///
    /// This is an unconditional overwrite, not an increment. Clients that
    /// adjust a live allowance should first set it to zero and verify no
    /// spend raced the update; a spender can otherwise front-run the change
    /// and use both the old and the new authority.
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) {
        self.allowances.insert((*caller, *spender), amount);

        tracing::debug!("approve: {:?} grants {:?} allowance {}", caller, spender, amount);

        self.record(LedgerEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
    }

    /// Destroy `amount` of the caller's balance and shrink supply.
    ///
    /// # Errors
    /// - `InsufficientBalance` if the caller holds less than `amount`
    pub fn burn(&mut self, caller: &Address, amount: Amount) -> LedgerResult<()> {
        let caller_balance = self.balance_of(caller);
        if caller_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: caller_balance,
                need: amount,
            });
        }

        self.balances.insert(*caller, caller_balance - amount);
        self.total_supply = self.total_supply.saturating_sub(amount);

        tracing::debug!("burn: {:?} destroys {}", caller, amount);

        self.record(LedgerEvent::Transfer {
            sender: *caller,
            receiver: Address::zero(),
            amount,
        });

        Ok(())
    }

    /// Create `amount` new tokens for `receiver`.
    ///
    /// The owner is always authorized; other callers must be in the minter
    /// set. Minting to the zero address is not rejected here; the host
    /// surface decides whether to expose that.
    ///
    /// # Errors
    /// - `AccessDenied` if the caller is neither owner nor minter
    /// - `Overflow` if supply would exceed the amount type's range
    pub fn mint(
        &mut self,
        caller: &Address,
        receiver: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        if *caller != self.owner && !self.minters.contains(caller) {
            return Err(LedgerError::AccessDenied);
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        *self.balances.entry(*receiver).or_insert(0) += amount;
        self.total_supply = new_supply;

        tracing::debug!("mint: {:?} credits {:?} with {}", caller, receiver, amount);

        self.record(LedgerEvent::Transfer {
            sender: Address::zero(),
            receiver: *receiver,
            amount,
        });

        Ok(())
    }
}
