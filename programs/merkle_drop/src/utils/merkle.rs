use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

/**
 * Merkle proof verification
 *
 * The hashing scheme shared by the on-chain verifier and the offline tree
 * builder. Any divergence in field widths, byte order or hash function here
 * makes every future claim unverifiable, so this module is the single
 * definition both sides test against.
 *
 * Scheme:
 * - Leaf: hash(account_pubkey(32) + balance_le(8))
 * - Intermediate: hash(left + right) with the pair sorted lexicographically
 *   before concatenation, so verification never tracks sibling position
 */

/// Compute the leaf hash for an (account, balance) allocation entry.
pub fn hash_leaf(account: &Pubkey, balance: u64) -> [u8; 32] {
    hashv(&[&account.to_bytes(), &balance.to_le_bytes()]).to_bytes()
}

/// Combine two child hashes into their parent.
///
/// The pair is sorted byte-lexicographically before hashing, making the
/// combination commutative: hash_pair(a, b) == hash_pair(b, a).
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).to_bytes()
    } else {
        hashv(&[b, a]).to_bytes()
    }
}

/// Verify a merkle proof against a root.
///
/// Folds the proof over the leaf bottom-up and compares the result to the
/// root. A single-leaf tree has root == leaf and an empty proof.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let mut computed = leaf;
    for sibling in proof {
        computed = hash_pair(&computed, sibling);
    }
    computed == root
}
