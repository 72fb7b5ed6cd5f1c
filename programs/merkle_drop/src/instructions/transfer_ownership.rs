use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for transferring drop ownership
 *
 * Standard single-step ownership transfer. The new owner gains exclusive
 * rights over the funder set; funder membership itself is unaffected.
 *
 * Access Control: Owner only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    /// The merkle drop whose ownership is transferred
    #[account(mut)]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The current drop owner
    /// - Must match the owner stored in the drop state
    #[account(constraint = owner.key() == merkle_drop.owner @ MerkleDropError::OnlyOwner)]
    pub owner: Signer<'info>,
}

/**
 * Transfers ownership of the merkle drop
 *
 * @param ctx - The account context containing drop and owner accounts
 * @param new_owner - Address that becomes the drop owner
 */
pub fn handle_transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
    require!(new_owner != Pubkey::default(), MerkleDropError::ZeroAddress);

    let merkle_drop = &mut ctx.accounts.merkle_drop;
    let previous_owner = merkle_drop.owner;

    merkle_drop.owner = new_owner;

    emit_cpi!(OwnershipTransferred {
        merkle_drop: merkle_drop.key(),
        previous_owner,
        new_owner,
    });

    Ok(())
}
