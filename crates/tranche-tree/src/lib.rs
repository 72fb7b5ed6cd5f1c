//! Offline half of the merkle drop pipeline.
//!
//! Parses an allocation table (account -> balance), builds the merkle tree
//! a funder commits on chain via `seed_new_allocations`, and produces the
//! inclusion proofs recipients submit with `claim_tranche`.
//!
//! The hashing scheme is shared with the on-chain program: both sides call
//! `solana_program::hash::hashv` (SHA-256) over identical byte layouts, so
//! roots and proofs generated here verify on chain bit for bit.

pub mod allocations;
pub mod tree;

pub use allocations::{AllocationError, AllocationTable};
pub use tree::{hash_leaf, hash_pair, verify, AllocationTree};
