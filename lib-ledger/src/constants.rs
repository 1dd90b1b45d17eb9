//! Canonical Meridian Ledger Constants — Single Source of Truth
//!
//! ALL ledger-related constants MUST be defined here. No other file should
//! define ledger constants — only re-export from this module.
//!
//! # Persistence Compatibility
//!
//! The batch protocol constants shape observable behavior (stop points,
//! reported cost estimates). Hosts that replay event logs rely on these
//! values staying fixed across builds.

use lib_types::Gas;

/// Token name
pub const MUSD_TOKEN_NAME: &str = "Meridian USD";

/// Token symbol
pub const MUSD_TOKEN_SYMBOL: &str = "MUSD";

/// Number of decimal places (1 MUSD = 10^8 base units)
pub const MUSD_TOKEN_DECIMALS: u8 = 8;

/// Budget floor left untouched by the batch protocol when the caller does
/// not supply one. The hosting environment still needs headroom after the
/// batch returns (summary write-back, call epilogue).
pub const DEFAULT_MIN_GAS_REMAINING: Gas = 30_000;

/// Hard bound on payments applied in a single batch call. Reaching the
/// bound stops iteration; it is not an error.
pub const MAX_BATCH_PAYMENTS: usize = 256;

/// Seed for the per-payment cost estimate before the first real
/// measurement inside a batch call. Deliberately low: the estimate only
/// ever rises, and the first measured step corrects it.
pub const INITIAL_TRANSFER_GAS_COST: Gas = 2_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_constants_are_consistent() {
        assert!(INITIAL_TRANSFER_GAS_COST > 0, "cost seed must be positive");
        assert!(
            DEFAULT_MIN_GAS_REMAINING > INITIAL_TRANSFER_GAS_COST,
            "reserved floor must exceed a single estimated step"
        );
        assert!(MAX_BATCH_PAYMENTS > 0, "batch bound must allow progress");
    }

    #[test]
    fn test_token_metadata_constants() {
        assert!(!MUSD_TOKEN_NAME.is_empty());
        assert!(!MUSD_TOKEN_SYMBOL.is_empty());
        assert_eq!(MUSD_TOKEN_DECIMALS, 8);
    }
}
