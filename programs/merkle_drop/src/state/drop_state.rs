use anchor_lang::prelude::*;

use crate::constants::MAX_FUNDERS;
use crate::error::MerkleDropError;

/**
 * Main merkle drop state account
 *
 * This struct represents one merkle drop instance: a series of tranches,
 * each committed as a single merkle root, distributed out of one token vault.
 *
 * Derivation: ["merkle_drop", token_mint, owner, nonce]
 *
 * Lifecycle:
 * 1. Created during create_merkle_drop instruction
 * 2. Funder set mutated by the owner (add_funder / remove_funder)
 * 3. tranche_count incremented with each seeded tranche
 * 4. total_claimed incremented with each successful claim
 */
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct MerkleDrop {
    /// Bump seed for PDA derivation
    /// - Saved to avoid recomputation during claim operations
    pub bump: u8,

    /// Nonce number for this merkle drop
    /// - Allows multiple drops for the same token/owner pair
    pub nonce: u32,

    /// Owner of the merkle drop
    /// - Sole authority over the funder set
    /// - Not implicitly a funder
    pub owner: Pubkey,

    /// Token mint address
    /// - Specifies which token is being distributed
    pub token_mint: Pubkey,

    /// Token vault account address
    /// - PDA that holds the tokens backing all tranches
    /// - Controlled by the merkle drop PDA
    /// - Derived from: ["vault", merkle_drop_key]
    pub token_vault: Pubkey,

    /// Number of tranches seeded so far
    /// - Tranche indexes are dense: 0..tranche_count
    /// - A claim against an index >= tranche_count is "in the future"
    pub tranche_count: u64,

    /// Total amount of tokens claimed across all tranches
    /// - Bookkeeping for auditing and indexers, never enforced
    pub total_claimed: u64,

    /// Addresses authorized to seed and expire tranches
    /// - Mutated only by the owner
    /// - The zero address is never a member
    #[max_len(MAX_FUNDERS)]
    pub funders: Vec<Pubkey>,
}

impl MerkleDrop {
    pub fn is_funder(&self, address: &Pubkey) -> bool {
        self.funders.contains(address)
    }

    /// Add an address to the funder set.
    ///
    /// Rejects the zero address, existing members and additions beyond
    /// the space reserved at creation.
    pub fn add_funder(&mut self, funder: Pubkey) -> Result<()> {
        require!(funder != Pubkey::default(), MerkleDropError::ZeroAddress);
        require!(!self.is_funder(&funder), MerkleDropError::AlreadyFunder);
        require!(
            self.funders.len() < MAX_FUNDERS,
            MerkleDropError::FunderSetFull
        );

        self.funders.push(funder);
        Ok(())
    }

    /// Remove an address from the funder set.
    ///
    /// Rejects the zero address and non-members.
    pub fn remove_funder(&mut self, funder: Pubkey) -> Result<()> {
        require!(funder != Pubkey::default(), MerkleDropError::ZeroAddress);

        let position = self
            .funders
            .iter()
            .position(|f| f == &funder)
            .ok_or(MerkleDropError::NotFunder)?;

        self.funders.remove(position);
        Ok(())
    }
}
