use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;

/**
 * Account context for adding a funder
 *
 * Funders are the addresses allowed to seed and expire tranches. Only the
 * drop owner may mutate the funder set; the owner itself is not implicitly
 * a funder.
 *
 * Access Control: Owner only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct AddFunder<'info> {
    /// The merkle drop whose funder set is mutated
    #[account(mut)]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The drop owner
    /// - Must match the owner stored in the drop state
    #[account(constraint = owner.key() == merkle_drop.owner @ MerkleDropError::OnlyOwner)]
    pub owner: Signer<'info>,
}

/**
 * Adds an address to the funder set
 *
 * @param ctx - The account context containing drop and owner accounts
 * @param funder - Address to authorize for tranche seeding and expiry
 *
 * Rejects the zero address and addresses already in the set.
 */
pub fn handle_add_funder(ctx: Context<AddFunder>, funder: Pubkey) -> Result<()> {
    let merkle_drop = &mut ctx.accounts.merkle_drop;

    merkle_drop.add_funder(funder)?;

    emit_cpi!(FunderAdded {
        merkle_drop: merkle_drop.key(),
        funder,
    });

    Ok(())
}
