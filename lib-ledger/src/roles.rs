//! Role Management
//!
//! Owner and minter-set administration. The owner is the single privileged
//! account; minters extend mint authority without extending administrative
//! authority. Role checks here are not delegable.

use lib_types::Address;

use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::ledger::Ledger;

impl Ledger {
    /// Authority enforcement helper. Every role mutation checks this.
    fn ensure_owner(&self, caller: &Address) -> LedgerResult<()> {
        if *caller != self.owner {
            return Err(LedgerError::AccessDenied);
        }
        Ok(())
    }

    /// Grant mint authority to `target`.
    ///
    /// # Errors
    /// - `AccessDenied` if the caller is not the owner
    /// - `InvalidTarget` if `target` is the zero address
    pub fn add_minter(&mut self, caller: &Address, target: &Address) -> LedgerResult<()> {
        self.ensure_owner(caller)?;
        if target.is_zero() {
            return Err(LedgerError::InvalidTarget);
        }

        self.minters.insert(*target);
        tracing::info!("minter added: {:?}", target);
        Ok(())
    }

    /// Revoke mint authority from `target`.
    ///
    /// # Errors
    /// - `AccessDenied` if the caller is not the owner
    /// - `NotAMinter` if `target` is not currently in the minter set
    pub fn remove_minter(&mut self, caller: &Address, target: &Address) -> LedgerResult<()> {
        self.ensure_owner(caller)?;
        if !self.minters.remove(target) {
            return Err(LedgerError::NotAMinter(*target));
        }

        tracing::info!("minter removed: {:?}", target);
        Ok(())
    }

    /// Reassign ownership to `target`.
    ///
    /// The outgoing owner loses its minter flag as part of the handover.
    /// The removal is idempotent: it succeeds whether or not the outgoing
    /// owner was ever explicitly added as a minter.
    ///
    /// # Errors
    /// - `AccessDenied` if the caller is not the owner
    /// - `InvalidTarget` if `target` is the zero address
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        target: &Address,
    ) -> LedgerResult<()> {
        self.ensure_owner(caller)?;
        if target.is_zero() {
            return Err(LedgerError::InvalidTarget);
        }

        let previous_owner = self.owner;
        self.minters.remove(&previous_owner);
        self.owner = *target;

        tracing::info!("ownership transferred: {:?} -> {:?}", previous_owner, target);

        self.record(LedgerEvent::OwnershipTransfer {
            previous_owner,
            new_owner: *target,
        });

        Ok(())
    }
}
