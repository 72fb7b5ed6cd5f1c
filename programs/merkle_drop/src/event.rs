use anchor_lang::prelude::*;

/// Event emitted when a new merkle drop is created
#[event]
pub struct MerkleDropCreated {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// Nonce of the merkle drop
    pub nonce: u32,
    /// Owner of the merkle drop
    pub owner: Pubkey,
    /// Token mint address
    pub token_mint: Pubkey,
    /// Token vault address
    pub token_vault: Pubkey,
}

/// Event emitted when a new tranche is seeded
#[event]
pub struct TrancheAdded {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// Dense index assigned to the new tranche
    pub tranche: u64,
    /// Merkle root committing to the tranche's allocation table
    pub merkle_root: [u8; 32],
    /// Sum of all allocated balances in the tranche
    pub total_allocation: u64,
    /// Pointer to the full allocation table
    pub uri: String,
}

/// Event emitted when a tranche is expired
#[event]
pub struct TrancheExpired {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// Index of the expired tranche
    pub tranche: u64,
}

/// Event emitted when a tranche's allocation URI is overwritten
#[event]
pub struct TrancheUriSet {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// Index of the updated tranche
    pub tranche: u64,
    /// The new allocation URI
    pub uri: String,
}

/// Event emitted when a balance is claimed from a tranche
#[event]
pub struct Claimed {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// Account the balance was released to
    pub claimant: Pubkey,
    /// Index of the tranche claimed against
    pub tranche: u64,
    /// Balance released by this claim
    pub balance: u64,
}

/// Event emitted when a funder is added to the funder set
#[event]
pub struct FunderAdded {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// The added funder
    pub funder: Pubkey,
}

/// Event emitted when a funder is removed from the funder set
#[event]
pub struct FunderRemoved {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// The removed funder
    pub funder: Pubkey,
}

/// Event emitted when drop ownership is transferred
#[event]
pub struct OwnershipTransferred {
    /// The merkle drop account public key
    pub merkle_drop: Pubkey,
    /// Owner before the transfer
    pub previous_owner: Pubkey,
    /// Owner after the transfer
    pub new_owner: Pubkey,
}
