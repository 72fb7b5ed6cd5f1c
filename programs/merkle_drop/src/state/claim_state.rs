use anchor_lang::prelude::*;

use crate::constants::MAX_TRANCHES;

/// Number of 64-bit words in the per-account claim bitmap.
pub const CLAIM_BITMAP_WORDS: usize = (MAX_TRANCHES as usize) / 64;

/**
 * Per-account claim record
 *
 * This struct tracks which tranches of a drop an account has already
 * claimed, as a bitmap indexed by tranche index. Bits only ever flip
 * from unset to set; a record is never reset.
 *
 * Derivation: ["claim", merkle_drop_key, account_key]
 *
 * Design Notes:
 * - One ClaimRecord per (merkle_drop, account) pair, created on first claim
 * - A single record serves batch claims across many tranches
 * - Capacity matches MAX_TRANCHES, which seeding enforces
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimRecord {
    /// Claimed bitmap over tranche indexes
    pub claimed: [u64; CLAIM_BITMAP_WORDS],
}

impl ClaimRecord {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + struct size
    pub const LEN: usize = 8 + std::mem::size_of::<ClaimRecord>();

    /// Whether the given tranche has been claimed by this account.
    ///
    /// Callers guarantee `tranche_index < MAX_TRANCHES` (the registry
    /// never seeds beyond the bitmap capacity).
    pub fn is_claimed(&self, tranche_index: u64) -> bool {
        let word = (tranche_index / 64) as usize;
        let bit = tranche_index % 64;
        self.claimed[word] & (1u64 << bit) != 0
    }

    /// Mark the given tranche as claimed.
    pub fn set_claimed(&mut self, tranche_index: u64) {
        let word = (tranche_index / 64) as usize;
        let bit = tranche_index % 64;
        self.claimed[word] |= 1u64 << bit;
    }
}
