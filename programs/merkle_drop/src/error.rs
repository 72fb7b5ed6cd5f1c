use anchor_lang::prelude::*;

#[error_code]
pub enum MerkleDropError {
    // Access control errors
    #[msg("Only owner can perform this action")]
    OnlyOwner,
    #[msg("Must be a funder")]
    MustBeFunder,

    // Funder set errors
    #[msg("Address is zero")]
    ZeroAddress,
    #[msg("Already a funder")]
    AlreadyFunder,
    #[msg("Address is not a funder")]
    NotFunder,
    #[msg("Funder set is full")]
    FunderSetFull,

    // Tranche state errors
    #[msg("Invalid merkle root")]
    InvalidMerkleRoot,
    #[msg("Tranche limit reached")]
    TrancheLimitReached,
    #[msg("Tranche cannot be in the future")]
    TrancheInFuture,
    #[msg("Tranche has already expired")]
    TrancheExpired,
    #[msg("URI exceeds maximum length")]
    UriTooLong,

    // Claim errors
    #[msg("Address has already claimed")]
    AlreadyClaimed,
    #[msg("No balance would be transferred")]
    ZeroBalance,
    #[msg("Incorrect merkle proof")]
    IncorrectProof,
    #[msg("Mismatching inputs")]
    MismatchingInputs,
    #[msg("Tranche account does not match requested index")]
    TrancheAccountMismatch,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Insufficient vault balance for this claim")]
    InsufficientVaultBalance,
    #[msg("Token mint does not match merkle drop's token mint")]
    TokenMintMismatch,
}
