use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for expiring a tranche
 *
 * Expiry is terminal: once set, the tranche's proofs never verify again
 * and its unclaimed balances are unreachable through the claim path.
 * Re-expiring an expired tranche is rejected so caller mistakes surface.
 *
 * Access Control: Funders only
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(tranche_index: u64)]
pub struct ExpireTranche<'info> {
    /// The merkle drop the tranche belongs to
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The tranche to expire
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

    /// The funder expiring the tranche
    /// - Must be a member of the drop's funder set
    #[account(constraint = merkle_drop.is_funder(&funder.key()) @ MerkleDropError::MustBeFunder)]
    pub funder: Signer<'info>,
}

/**
 * Expires a tranche
 *
 * @param ctx - The account context containing drop, tranche and funder accounts
 * @param tranche_index - Index of the tranche to expire
 */
pub fn handle_expire_tranche(ctx: Context<ExpireTranche>, tranche_index: u64) -> Result<()> {
    require!(
        tranche_index < ctx.accounts.merkle_drop.tranche_count,
        MerkleDropError::TrancheInFuture
    );

    let tranche = &mut ctx.accounts.tranche;

    // One-way transition; repeating it is a caller error, not a no-op
    require!(!tranche.expired, MerkleDropError::TrancheExpired);

    tranche.expired = true;

    emit_cpi!(TrancheExpired {
        merkle_drop: ctx.accounts.merkle_drop.key(),
        tranche: tranche_index,
    });

    Ok(())
}
