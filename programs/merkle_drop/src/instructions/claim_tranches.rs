use crate::constants::*;
use crate::error::*;
use crate::event::*;
use crate::instructions::claim_tranche::check_claim;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{TokenAccount, TokenInterface};

/**
 * Account context for claiming balances from several tranches at once
 *
 * The tranche accounts are supplied as remaining accounts, one per claimed
 * index and in the same order as the argument vectors. All claims target
 * the same recipient and are settled with a single vault transfer; if any
 * constituent claim fails its checks, the whole batch fails and none take
 * effect.
 *
 * Access Control: Any payer with valid merkle proofs for `account`
 */
#[event_cpi]
#[derive(Accounts)]
pub struct ClaimTranches<'info> {
    /// The merkle drop being claimed from
    /// - total_claimed is updated
    #[account(mut)]
    pub merkle_drop: Account<'info, MerkleDrop>,

    /// Claim record for this (drop, account) pair
    /// - One record covers every tranche in the batch
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

    /// The recipient whose allocations are claimed
    /// - Does not need to sign; claims can be relayed
    /// CHECK: Validated against the merkle proofs, which commit to this key
    pub account: UncheckedAccount<'info>,

    /// Recipient's token account to receive the combined balance
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

/// All-or-nothing input shape check: the argument vectors and the supplied
/// tranche accounts must line up one-to-one before any claim is evaluated.
pub(crate) fn check_batch_shape(
    tranche_indexes: usize,
    balances: usize,
    proofs: usize,
    tranche_accounts: usize,
) -> Result<()> {
    require!(
        tranche_indexes == balances && balances == proofs && proofs == tranche_accounts,
        MerkleDropError::MismatchingInputs
    );
    Ok(())
}

/**
 * Processes a batch of claims against several tranches
 *
 * @param ctx - The account context; remaining accounts carry the tranches
 * @param tranche_indexes - Indexes of the tranches being claimed against
 * @param balances - Balance allocated to the account in each tranche
 * @param proofs - Merkle proof for each (account, balance) entry
 *
 * The argument vectors and the remaining tranche accounts must all have
 * the same length; the arity check runs before any per-claim evaluation.
 * Each triple then goes through the exact checks of the single claim path.
 */
pub fn handle_claim_tranches<'info>(
    ctx: Context<'_, '_, 'info, 'info, ClaimTranches<'info>>,
    tranche_indexes: Vec<u64>,
    balances: Vec<u64>,
    proofs: Vec<Vec<[u8; 32]>>,
) -> Result<()> {
    // ===== INPUT SHAPE CHECK (all-or-nothing, before any claim) =====

    check_batch_shape(
        tranche_indexes.len(),
        balances.len(),
        proofs.len(),
        ctx.remaining_accounts.len(),
    )?;

    let account_key = ctx.accounts.account.key();
    let merkle_drop_key = ctx.accounts.merkle_drop.key();

    // ===== VALIDATION + EFFECTS PHASE (per claim) =====

    let mut total_balance: u64 = 0;

    for (i, (&tranche_index, &balance)) in
        tranche_indexes.iter().zip(balances.iter()).enumerate()
    {
        // Existence first, so a future index fails before account decoding
        require!(
            tranche_index < ctx.accounts.merkle_drop.tranche_count,
            MerkleDropError::TrancheInFuture
        );

        let tranche: Account<Tranche> = Account::try_from(&ctx.remaining_accounts[i])?;
        require!(
            tranche.merkle_drop == merkle_drop_key && tranche.index == tranche_index,
            MerkleDropError::TrancheAccountMismatch
        );

        check_claim(
            &ctx.accounts.merkle_drop,
            &tranche,
            &ctx.accounts.claim_record,
            &account_key,
            tranche_index,
            balance,
            &proofs[i],
        )?;

        // Mark immediately so a duplicated index within the batch is
        // rejected as already claimed
        ctx.accounts.claim_record.set_claimed(tranche_index);

        total_balance = total_balance
            .checked_add(balance)
            .ok_or(MerkleDropError::ArithmeticOverflow)?;
    }

    // An empty batch releases nothing
    require!(total_balance > 0, MerkleDropError::ZeroBalance);

    // Check vault has sufficient balance for the combined release
    require!(
        ctx.accounts.token_vault.amount >= total_balance,
        MerkleDropError::InsufficientVaultBalance
    );

    let new_total_claimed = ctx
        .accounts
        .merkle_drop
        .total_claimed
        .checked_add(total_balance)
        .ok_or(MerkleDropError::ArithmeticOverflow)?;
    ctx.accounts.merkle_drop.total_claimed = new_total_claimed;

    // ===== INTERACTIONS PHASE (single combined transfer) =====

    let merkle_drop = &ctx.accounts.merkle_drop;
    let token_mint_key = merkle_drop.token_mint;
    let owner_key = merkle_drop.owner;
    let nonce_bytes = merkle_drop.nonce.to_le_bytes();
    let drop_bump = merkle_drop.bump;

    let seeds = &[
        MERKLE_DROP_SEED.as_bytes(),
        token_mint_key.as_ref(),
        owner_key.as_ref(),
        nonce_bytes.as_ref(),
        &[drop_bump],
    ];
    let signer = &[&seeds[..]];

    transfer_token(
        ctx.accounts.merkle_drop.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.account_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        total_balance,
        ctx.accounts.token_mint.decimals,
        Some(signer),
    )?;

    // One event per constituent claim, matching the single claim path
    for (&tranche_index, &balance) in tranche_indexes.iter().zip(balances.iter()) {
        emit_cpi!(Claimed {
            merkle_drop: merkle_drop_key,
            claimant: account_key,
            tranche: tranche_index,
            balance,
        });
    }

    Ok(())
}
