use anchor_lang::prelude::*;

use crate::constants::MAX_URI_LEN;
use crate::utils::{hash_leaf, verify};

/**
 * Tranche state account
 *
 * One account per committed tranche. The merkle root and total allocation
 * are immutable after creation; only the expiry flag (one-way) and the
 * allocation URI may change afterwards.
 *
 * Derivation: ["tranche", merkle_drop_key, tranche_index_le]
 */
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct Tranche {
    /// Bump seed for PDA derivation
    pub bump: u8,

    /// The merkle drop this tranche belongs to
    /// - Checked when tranche accounts are supplied for batch claims
    pub merkle_drop: Pubkey,

    /// Dense index of this tranche within its drop
    pub index: u64,

    /// Merkle root committing to the tranche's allocation table
    /// - Each leaf: hash(account_pubkey + balance)
    /// - Immutable once seeded
    pub merkle_root: [u8; 32],

    /// Sum of all allocated balances in the tranche
    /// - Auditing field only, never enforced against claims
    pub total_allocation: u64,

    /// Whether this tranche has been expired
    /// - One-way false -> true transition
    /// - Expired tranches never verify a proof
    pub expired: bool,

    /// Unix timestamp of tranche creation
    pub added_at: i64,

    /// Pointer to the full allocation table (e.g. ipfs://...)
    /// - Overwritable via set_tranche_uri
    #[max_len(MAX_URI_LEN)]
    pub uri: String,
}

impl Tranche {
    /// Check whether (account, balance) is committed in this tranche.
    ///
    /// Expired tranches verify nothing, regardless of proof validity.
    pub fn verify_claim(&self, account: &Pubkey, balance: u64, proof: &[[u8; 32]]) -> bool {
        !self.expired && verify(proof, self.merkle_root, hash_leaf(account, balance))
    }
}
