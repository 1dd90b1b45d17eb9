//! Meridian Stablecoin Ledger Core
//!
//! This crate defines the deterministic accounting engine behind the
//! Meridian USD token: balances, delegated allowances, supply, owner and
//! minter roles, and the gas-bounded batch-payment protocol.
//!
//! The hosting execution environment authenticates callers, serializes
//! calls, supplies the consumable gas budget, and persists the [`Ledger`]
//! between calls. Everything here is synchronous, in-memory arithmetic and
//! map mutation.
//!
//! # Key Types
//!
//! - [`Ledger`]: the single stateful component
//! - [`LedgerEvent`]: ordered records appended to the observable log
//! - [`Payment`]: one receiver/amount pair in a batch call
//! - [`GasMeter`]: the injected view of the host's budget counter
//!
//! # Execution
//!
//! Mutations go through the operation methods on [`Ledger`]; the batch
//! protocol lives in [`batch`] and self-limits against the budget instead
//! of relying on the host aborting mid-call.

pub mod batch;
pub mod constants;
pub mod errors;
pub mod events;
pub mod gas;
pub mod ledger;
pub mod roles;
pub mod transfer;

pub use batch::Payment;
pub use errors::{LedgerError, LedgerResult};
pub use events::{EventRecord, LedgerEvent};
pub use gas::{BudgetContext, GasMeter, ScriptedMeter};
pub use ledger::Ledger;
