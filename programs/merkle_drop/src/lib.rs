use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;

/**
 * Merkle Drop Program
 *
 * A Solana program for distributing token allocations to large recipient sets
 * in batches ("tranches") committed as merkle roots. Instead of storing every
 * recipient on chain, each tranche stores a single 32-byte root; recipients
 * prove membership with an inclusion proof to claim their balance exactly once.
 *
 * Key Features:
 * - Merkle tree-based claim verification (sorted pair hashing, position-free proofs)
 * - Unlimited sequential tranches per drop, each funded at seed time
 * - Per-account claim bitmap preventing double claims across all tranches
 * - One-way tranche expiry invalidating all remaining proofs of a tranche
 * - Relayed claims: any payer can claim on behalf of any recipient
 * - Owner-managed funder set gating tranche seeding and expiry
 * - Support for both SPL Token and Token 2022
 *
 * Architecture:
 * - Nonce State PDA: Tracks nonce counter for each owner (automatic nonce management)
 * - MerkleDrop PDA: Stores owner, funder set and tranche counter
 * - Token Vault PDA: Holds tokens backing all tranches of a drop
 * - Tranche PDAs: One per committed tranche (root, total, expiry flag, URI)
 * - Claim Record PDAs: Per-account claimed bitmap over tranche indexes
 *
 * Workflow:
 * 1. Owner creates a drop and authorizes funders
 * 2. A funder seeds a tranche: commits a merkle root and deposits the total allocation
 * 3. Recipients (or relayers) claim with merkle proofs, once per (account, tranche)
 * 4. A funder eventually expires the tranche, ending its claim window
 */
#[program]
pub mod merkle_drop {
    use super::*;

    /**
     * Creates a new merkle drop
     *
     * Initializes the drop state and its token vault with automatic nonce
     * management. The creator becomes the owner; the funder set starts empty.
     *
     * @param ctx - Account context containing drop, vault, nonce and owner accounts
     */
    pub fn create_merkle_drop(ctx: Context<CreateMerkleDrop>) -> Result<()> {
        handle_create_merkle_drop(ctx)
    }

    /**
     * Adds an address to the funder set
     *
     * Funders may seed and expire tranches. Rejects the zero address and
     * current members.
     *
     * @param ctx - Account context containing drop and owner accounts
     * @param funder - Address to add
     *
     * Access Control: Owner only
     */
    pub fn add_funder(ctx: Context<AddFunder>, funder: Pubkey) -> Result<()> {
        handle_add_funder(ctx, funder)
    }

    /**
     * Removes an address from the funder set
     *
     * Rejects the zero address and addresses that are not members.
     *
     * @param ctx - Account context containing drop and owner accounts
     * @param funder - Address to remove
     *
     * Access Control: Owner only
     */
    pub fn remove_funder(ctx: Context<RemoveFunder>, funder: Pubkey) -> Result<()> {
        handle_remove_funder(ctx, funder)
    }

    /**
     * Transfers drop ownership
     *
     * @param ctx - Account context containing drop and owner accounts
     * @param new_owner - Address that becomes the owner
     *
     * Access Control: Owner only
     */
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        handle_transfer_ownership(ctx, new_owner)
    }

    /**
     * Seeds a new tranche of allocations
     *
     * Commits a merkle root over an (account, balance) allocation table at
     * the next contiguous tranche index and deposits the total allocation
     * from the funder into the drop vault.
     *
     * @param ctx - Account context containing drop, tranche, vault and funder accounts
     * @param total_allocation - Sum of all balances in the allocation table
     * @param merkle_root - 32-byte hash representing the merkle tree root
     * @param uri - Pointer to the full allocation table (may be empty)
     *
     * Access Control: Funders only
     */
    pub fn seed_new_allocations(
        ctx: Context<SeedNewAllocations>,
        total_allocation: u64,
        merkle_root: [u8; 32],
        uri: String,
    ) -> Result<()> {
        handle_seed_new_allocations(ctx, total_allocation, merkle_root, uri)
    }

    /**
     * Expires a tranche
     *
     * Terminal, one-way transition: proofs against an expired tranche never
     * verify again. Re-expiring is rejected as an error.
     *
     * @param ctx - Account context containing drop, tranche and funder accounts
     * @param tranche_index - Index of the tranche to expire
     *
     * Access Control: Funders only
     */
    pub fn expire_tranche(ctx: Context<ExpireTranche>, tranche_index: u64) -> Result<()> {
        handle_expire_tranche(ctx, tranche_index)
    }

    /**
     * Overwrites a tranche's allocation URI
     *
     * @param ctx - Account context containing drop, tranche and funder accounts
     * @param tranche_index - Index of the tranche to update
     * @param uri - The new allocation table pointer
     *
     * Access Control: Funders only
     * Note: The URI can be rewritten any number of times
     */
    pub fn set_tranche_uri(
        ctx: Context<SetTrancheUri>,
        tranche_index: u64,
        uri: String,
    ) -> Result<()> {
        handle_set_tranche_uri(ctx, tranche_index, uri)
    }

    /**
     * Claims a balance from one tranche
     *
     * Releases the proven balance to the recipient's token account and marks
     * the (account, tranche) pair as claimed. The recipient is a parameter;
     * claims can be relayed by any payer.
     *
     * @param ctx - Account context containing drop, tranche, claim record and token accounts
     * @param tranche_index - Index of the tranche being claimed against
     * @param balance - Balance allocated to the account in that tranche
     * @param proof - Array of 32-byte hashes forming the merkle proof
     *
     * Access Control: Any payer with a valid merkle proof
     */
    pub fn claim_tranche(
        ctx: Context<ClaimTranche>,
        tranche_index: u64,
        balance: u64,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        handle_claim_tranche(ctx, tranche_index, balance, proof)
    }

    /**
     * Claims balances from several tranches in one transaction
     *
     * The tranche accounts are passed as remaining accounts in argument
     * order. All input vectors must have matching lengths; a mismatch fails
     * the whole call before any claim is evaluated, and any failing claim
     * aborts the entire batch.
     *
     * @param ctx - Account context; remaining accounts carry the tranches
     * @param tranche_indexes - Indexes of the tranches being claimed against
     * @param balances - Balance allocated to the account in each tranche
     * @param proofs - Merkle proof for each (account, balance) entry
     *
     * Access Control: Any payer with valid merkle proofs
     */
    pub fn claim_tranches<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimTranches<'info>>,
        tranche_indexes: Vec<u64>,
        balances: Vec<u64>,
        proofs: Vec<Vec<[u8; 32]>>,
    ) -> Result<()> {
        handle_claim_tranches(ctx, tranche_indexes, balances, proofs)
    }
}
