use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for overwriting a tranche's allocation URI
 *
 * The URI is a denormalized pointer to the full allocation table for
 * indexers and claim tooling; it carries no on-chain semantics and may
 * be rewritten any number of times.
 *
 * Access Control: Funders only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(tranche_index: u64)]
pub struct SetTrancheUri<'info> {
    /// The merkle drop the tranche belongs to
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The tranche to update
    /// - Derived from: ["tranche", merkle_drop_key, tranche_index_le]
    #[account(
        mut,
        seeds = [
            TRANCHE_SEED.as_bytes(),
            merkle_drop.key().as_ref(),
            tranche_index.to_le_bytes().as_ref()
        ],
        bump = tranche.bump
    )]
    pub tranche: Account<'info, Tranche>,

    /// The funder updating the URI
    /// - Must be a member of the drop's funder set
    #[account(constraint = merkle_drop.is_funder(&funder.key()) @ MerkleDropError::MustBeFunder)]
    pub funder: Signer<'info>,
}

/**
 * Overwrites a tranche's allocation URI
 *
 * @param ctx - The account context containing drop, tranche and funder accounts
 * @param tranche_index - Index of the tranche to update
 * @param uri - The new allocation table pointer
 */
pub fn handle_set_tranche_uri(
    ctx: Context<SetTrancheUri>,
    tranche_index: u64,
    uri: String,
) -> Result<()> {
    require!(
        tranche_index < ctx.accounts.merkle_drop.tranche_count,
        MerkleDropError::TrancheInFuture
    );
    require!(uri.len() <= MAX_URI_LEN, MerkleDropError::UriTooLong);

    let tranche = &mut ctx.accounts.tranche;
    tranche.uri = uri.clone();

    emit_cpi!(TrancheUriSet {
        merkle_drop: ctx.accounts.merkle_drop.key(),
        tranche: tranche_index,
        uri,
    });

    Ok(())
}
