use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

/**
 * Account context for claiming a balance from one tranche
 *
 * The recipient `account` is an instruction account, not the transaction
 * signer: anyone may pay to execute a claim on behalf of any account, and
 * the balance is always released to the recipient's token account.
 *
 * Access Control: Any payer with a valid merkle proof for `account`
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(tranche_index: u64)]
pub struct ClaimTranche<'info> {
    /// The merkle drop being claimed from
    /// - total_claimed is updated
    #[account(mut)]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// The tranche being claimed against
    /// - Derived from: ["tranche", merkle_drop_key, tranche_index_le]
    #[account(
        seeds = [
            TRANCHE_SEED.as_bytes(),
            merkle_drop.key().as_ref(),
            tranche_index.to_le_bytes().as_ref()
        ],
        bump = tranche.bump
    )]
    pub tranche: Account<'info, Tranche>,

    /// Claim record for this (drop, account) pair
    /// - Tracks which tranches the account has already claimed
    /// - Derived from: ["claim", merkle_drop_key, account_key]
    #[account(
        init_if_needed,
        payer = payer,
        space = ClaimRecord::LEN,
        seeds = [CLAIM_SEED.as_bytes(), merkle_drop.key().as_ref(), account.key().as_ref()],
        bump
    )]
    pub claim_record: Account<'info, ClaimRecord>,

    /// Token vault holding the tokens backing the tranches
    /// - Controlled by the merkle drop PDA
    /// - Derived from: ["vault", merkle_drop_key]
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), merkle_drop.key().as_ref()],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The recipient whose allocation is claimed
    /// - Does not need to sign; claims can be relayed
    /// CHECK: Validated against the merkle proof, which commits to this key
    pub account: UncheckedAccount<'info>,

    /// Recipient's token account to receive the balance
    /// - Must be owned by the recipient
    /// - Must be for the correct token mint
    #[account(
        mut,
        token::mint = merkle_drop.token_mint,
        token::authority = account,
        token::token_program = token_program,
    )]
    pub account_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint for verification
    /// - Must match the drop's token mint
    #[account(
        token::token_program = token_program,
        constraint = token_mint.key() == merkle_drop.token_mint @ MerkleDropError::TokenMintMismatch
    )]
    pub token_mint: InterfaceAccount<'info, anchor_spl::token_interface::Mint>,

    /// The transaction payer
    /// - Funds claim record creation; need not be the recipient
    #[account(mut)]
    pub payer: Signer<'info>,

    /// System program for account creation
    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/// Run the per-claim precondition checks, in order; the first failing
/// check determines the error. Shared by the single and batch claim paths.
pub(crate) fn check_claim(
    merkle_drop: &MerkleDrop,
    tranche: &Tranche,
    claim_record: &ClaimRecord,
    account: &Pubkey,
    tranche_index: u64,
    balance: u64,
    proof: &[[u8; 32]],
) -> Result<()> {
    require!(
        tranche_index < merkle_drop.tranche_count,
        MerkleDropError::TrancheInFuture
    );
    require!(!tranche.expired, MerkleDropError::TrancheExpired);
    require!(
        !claim_record.is_claimed(tranche_index),
        MerkleDropError::AlreadyClaimed
    );
    require!(balance > 0, MerkleDropError::ZeroBalance);
    require!(
        tranche.verify_claim(account, balance, proof),
        MerkleDropError::IncorrectProof
    );
    Ok(())
}

/**
 * Processes a claim against one tranche
 *
 * @param ctx - The account context containing all required accounts
 * @param tranche_index - Index of the tranche being claimed against
 * @param balance - Balance allocated to the account in that tranche
 * @param proof - Array of 32-byte sibling hashes forming the merkle proof
 *
 * Validation Process:
 * 1. Tranche must exist (not be in the future)
 * 2. Tranche must not be expired
 * 3. Account must not have already claimed this tranche
 * 4. Balance must be nonzero
 * 5. Merkle proof must verify for (account, balance)
 */
pub fn handle_claim_tranche(
    ctx: Context<ClaimTranche>,
    tranche_index: u64,
    balance: u64,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let account_key = ctx.accounts.account.key();

    // ===== VALIDATION PHASE =====

    check_claim(
        &ctx.accounts.merkle_drop,
        &ctx.accounts.tranche,
        &ctx.accounts.claim_record,
        &account_key,
        tranche_index,
        balance,
        &proof,
    )?;

    // Check vault has sufficient balance before proceeding
    require!(
        ctx.accounts.token_vault.amount >= balance,
        MerkleDropError::InsufficientVaultBalance
    );

    // ===== EFFECTS PHASE (State Updates) =====

    // Flip the claimed bit before the transfer (CEI pattern)
    ctx.accounts.claim_record.set_claimed(tranche_index);

    let new_total_claimed = ctx
        .accounts
        .merkle_drop
        .total_claimed
        .checked_add(balance)
        .ok_or(MerkleDropError::ArithmeticOverflow)?;
    ctx.accounts.merkle_drop.total_claimed = new_total_claimed;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    let merkle_drop = &ctx.accounts.merkle_drop;
    let merkle_drop_key = merkle_drop.key();
    let token_mint_key = merkle_drop.token_mint;
    let owner_key = merkle_drop.owner;
    let nonce_bytes = merkle_drop.nonce.to_le_bytes();
    let drop_bump = merkle_drop.bump;

    // Prepare PDA signing seeds for the vault transfer
    let seeds = &[
        MERKLE_DROP_SEED.as_bytes(),
        token_mint_key.as_ref(),
        owner_key.as_ref(),
        nonce_bytes.as_ref(),
        &[drop_bump],
    ];
    let signer = &[&seeds[..]];

    // Release the balance from the vault to the recipient
    transfer_token(
        ctx.accounts.merkle_drop.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.account_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        balance,
        ctx.accounts.token_mint.decimals,
        Some(signer),
    )?;

    // Emit event for off-chain indexing and monitoring
    emit_cpi!(Claimed {
        merkle_drop: merkle_drop_key,
        claimant: account_key,
        tranche: tranche_index,
        balance,
    });

    Ok(())
}
