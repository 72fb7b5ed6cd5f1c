use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for removing a funder
 *
 * Access Control: Owner only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct RemoveFunder<'info> {
    /// The merkle drop whose funder set is mutated
    #[account(mut)]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The drop owner
    /// - Must match the owner stored in the drop state
    #[account(constraint = owner.key() == merkle_drop.owner @ MerkleDropError::OnlyOwner)]
    pub owner: Signer<'info>,
}

/**
 * Removes an address from the funder set
 *
 * @param ctx - The account context containing drop and owner accounts
 * @param funder - Address to revoke
 *
 * Rejects the zero address and addresses not currently in the set.
 */
pub fn handle_remove_funder(ctx: Context<RemoveFunder>, funder: Pubkey) -> Result<()> {
    let merkle_drop = &mut ctx.accounts.merkle_drop;

    merkle_drop.remove_funder(funder)?;

    emit_cpi!(FunderRemoved {
        merkle_drop: merkle_drop.key(),
        funder,
    });

    Ok(())
}
