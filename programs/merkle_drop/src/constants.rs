use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * This module defines all the constant values used throughout the merkle drop program.
 * These constants control PDA derivation and the fixed capacity limits of the
 * on-chain state accounts.
 */

#[constant]
/// ===== CAPACITY CONSTANTS =====

/// Maximum number of tranches a single merkle drop can hold
/// - Tranche indexes are dense and contiguous starting at 0
/// - Bounds the per-account claim bitmap (MAX_TRANCHES / 64 words)
pub const MAX_TRANCHES: u64 = 256;

/// Maximum number of funders in a merkle drop's funder set
/// - Funders are stored inline in the drop account
/// - Bounds the space reserved for the funder vector at creation
pub const MAX_FUNDERS: usize = 16;

/// Maximum byte length of a tranche's allocation URI
/// - The URI points at the full allocation table (e.g. ipfs://...)
/// - Bounds the space reserved in each tranche account
pub const MAX_URI_LEN: usize = 200;

/// ===== PDA SEED CONSTANTS =====

/// Seed for owner nonce PDA derivation
/// - Used in: ["owner_nonce", owner]
/// - Creates unique nonce tracking accounts for each owner
/// - Enables automatic nonce assignment for merkle drops
pub const OWNER_NONCE_SEED: &str = "owner_nonce";

/// Seed for merkle drop PDA derivation
/// - Used in: ["merkle_drop", token_mint, owner, nonce]
/// - Creates unique drop accounts for each (token, owner, nonce) combination
/// - Ensures deterministic and collision-free PDA generation
pub const MERKLE_DROP_SEED: &str = "merkle_drop";

/// Seed for token vault PDA derivation
/// - Used in: ["vault", merkle_drop_key]
/// - Creates a unique vault for each merkle drop
/// - Ensures the vault is controlled by the merkle drop PDA
pub const VAULT_SEED: &str = "vault";

/// Seed for tranche PDA derivation
/// - Used in: ["tranche", merkle_drop_key, tranche_index_le]
/// - One account per committed tranche, addressed by its dense index
pub const TRANCHE_SEED: &str = "tranche";

/// Seed for claim record PDA derivation
/// - Used in: ["claim", merkle_drop_key, account_key]
/// - One claim bitmap per (merkle drop, account) pair
/// - Prevents double-claiming across all tranches of the drop
pub const CLAIM_SEED: &str = "claim";
