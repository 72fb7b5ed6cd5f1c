use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for creating a new merkle drop
 *
 * This instruction initializes a new merkle drop with automatic nonce management:
 * - Creates or updates a nonce state PDA to track nonce numbers
 * - Creates a merkle drop PDA with auto-incremented nonce number
 * - Creates a token vault PDA that backs all future tranches
 *
 * The drop starts with zero tranches and an empty funder set; tokens enter
 * the vault when a funder seeds a tranche.
 *
 * Access Control: Anyone may create a drop; the creator becomes its owner
 */
#[event_cpi]
#[derive(Accounts)]
pub struct CreateMerkleDrop<'info> {
    /// Nonce state account (PDA) that tracks nonce numbers for this owner
    /// - Stores the current nonce counter for automatic nonce assignment
    /// - Derived from: ["owner_nonce", owner]
    #[account(
        init_if_needed,
        payer = owner,
        space = NonceState::LEN,
        seeds = [OWNER_NONCE_SEED.as_bytes(), owner.key().as_ref()],
        bump
    )]
    pub owner_nonce: Account<'info, NonceState>,

    /// The main merkle drop account (PDA)
    /// - Stores the funder set, tranche counter and vault pointers
    /// - Derived from: ["merkle_drop", token_mint, owner, current_nonce]
    /// - Nonce is automatically determined from owner_nonce.nonce + 1
    #[account(
        init,
        payer = owner,
        space = 8 + MerkleDrop::INIT_SPACE,
        seeds = [
            MERKLE_DROP_SEED.as_bytes(),
            token_mint.key().as_ref(),
            owner.key().as_ref(),
            (owner_nonce.nonce + 1).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// Token vault account (PDA) that holds the tokens backing the tranches
    /// - Controlled by the merkle drop PDA as token authority
    /// - Derived from: ["vault", merkle_drop_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = merkle_drop,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), merkle_drop.key().as_ref()],
        bump,
        payer = owner,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for the tokens being distributed
    /// - Supports both SPL Token and Token 2022 programs
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// The owner of the merkle drop
    /// - Sole authority over the funder set
    /// - Not implicitly a funder
    #[account(mut)]
    pub owner: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,

    /// Rent sysvar for rent exemption calculations
    pub rent: Sysvar<'info, Rent>,
}

/**
 * Creates a new merkle drop with automatic nonce management
 *
 * @param ctx - The account context containing all required accounts
 */
pub fn handle_create_merkle_drop(ctx: Context<CreateMerkleDrop>) -> Result<()> {
    let owner_nonce = &mut ctx.accounts.owner_nonce;
    let merkle_drop = &mut ctx.accounts.merkle_drop;

    // Calculate nonce number with overflow protection
    let current_nonce = owner_nonce
        .nonce
        .checked_add(1)
        .ok_or(MerkleDropError::ArithmeticOverflow)?;

    // Update nonce state with current nonce
    owner_nonce.nonce = current_nonce;

    // Initialize drop state with auto-assigned nonce
    merkle_drop.bump = ctx.bumps.merkle_drop;
    merkle_drop.nonce = current_nonce;
    merkle_drop.owner = ctx.accounts.owner.key();
    merkle_drop.token_mint = ctx.accounts.token_mint.key();
    merkle_drop.token_vault = ctx.accounts.token_vault.key();
    merkle_drop.funders = Vec::new();
    // Note: tranche_count and total_claimed use default values (0)

    // Emit event for off-chain indexing and monitoring
    // Uses emit_cpi! for cross-program call compatibility
    emit_cpi!(MerkleDropCreated {
        merkle_drop: merkle_drop.key(),
        nonce: current_nonce,
        owner: ctx.accounts.owner.key(),
        token_mint: ctx.accounts.token_mint.key(),
        token_vault: ctx.accounts.token_vault.key(),
    });

    Ok(())
}
