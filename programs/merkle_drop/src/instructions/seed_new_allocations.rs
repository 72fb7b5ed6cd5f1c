use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for seeding a new tranche of allocations
 *
 * A funder commits a merkle root over an (account, balance) allocation
 * table and deposits the tranche's total allocation into the drop vault.
 * The tranche is appended at the next contiguous index.
 *
 * Access Control: Funders only
 */
#[event_cpi]
#[derive(Accounts)]
pub struct SeedNewAllocations<'info> {
    /// The merkle drop receiving the new tranche
    /// - tranche_count is incremented
    #[account(mut)]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The new tranche account (PDA)
    /// - Created at index merkle_drop.tranche_count
    /// - Derived from: ["tranche", merkle_drop_key, tranche_index_le]
    #[account(
        init,
        payer = funder,
        space = 8 + Tranche::INIT_SPACE,
        seeds = [
            TRANCHE_SEED.as_bytes(),
            merkle_drop.key().as_ref(),
            merkle_drop.tranche_count.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub tranche: Account<'info, Tranche>,

    /// Token vault backing the drop's tranches
    /// - Receives the tranche's total allocation
    /// - Derived from: ["vault", merkle_drop_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), merkle_drop.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// Funder's token account the allocation is drawn from
    /// - Must be owned by the funder signer
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = funder,
        token::token_program = token_program,
    )]
    pub funder_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for verification
    /// - Must match the drop's token mint
    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == merkle_drop.token_mint @ MerkleDropError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// The funder seeding the tranche
    /// - Must be a member of the drop's funder set
    #[account(
        mut,
        constraint = merkle_drop.is_funder(&funder.key()) @ MerkleDropError::MustBeFunder
    )]
    pub funder: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Seeds a new tranche of allocations
 *
 * @param ctx - The account context containing all required accounts
 * @param total_allocation - Sum of all balances in the allocation table
 * @param merkle_root - 32-byte root committing to the allocation table
 * @param uri - Pointer to the full allocation table (may be empty)
 *
 * Validation Rules:
 * - Merkle root cannot be all zeros
 * - The drop must have room for another tranche
 * - The URI must fit the space reserved per tranche
 */
pub fn handle_seed_new_allocations(
    ctx: Context<SeedNewAllocations>,
    total_allocation: u64,
    merkle_root: [u8; 32],
    uri: String,
) -> Result<()> {
    // ===== VALIDATION PHASE =====

    // An all-zero root would allow no valid claims
    require!(merkle_root != [0; 32], MerkleDropError::InvalidMerkleRoot);

    require!(
        ctx.accounts.merkle_drop.tranche_count < MAX_TRANCHES,
        MerkleDropError::TrancheLimitReached
    );

    require!(uri.len() <= MAX_URI_LEN, MerkleDropError::UriTooLong);

    let added_at = Clock::get()?.unix_timestamp;
    let tranche_index = ctx.accounts.merkle_drop.tranche_count;

    // ===== EFFECTS PHASE (State Updates) =====

    let tranche = &mut ctx.accounts.tranche;
    tranche.bump = ctx.bumps.tranche;
    tranche.merkle_drop = ctx.accounts.merkle_drop.key();
    tranche.index = tranche_index;
    tranche.merkle_root = merkle_root;
    tranche.total_allocation = total_allocation;
    tranche.expired = false;
    tranche.added_at = added_at;
    tranche.uri = uri.clone();

    let merkle_drop = &mut ctx.accounts.merkle_drop;
    merkle_drop.tranche_count = tranche_index
        .checked_add(1)
        .ok_or(MerkleDropError::ArithmeticOverflow)?;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    // Fund the tranche: the funder deposits the full allocation up front
    transfer_token(
        ctx.accounts.funder.to_account_info(),
        ctx.accounts.funder_token_account.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        total_allocation,
        ctx.accounts.token_mint.decimals,
        None, // No signer seeds needed for funder-signed transfer
    )?;

    // Emit event for off-chain indexing and monitoring
    emit_cpi!(TrancheAdded {
        merkle_drop: ctx.accounts.merkle_drop.key(),
        tranche: tranche_index,
        merkle_root,
        total_allocation,
        uri,
    });

    Ok(())
}
