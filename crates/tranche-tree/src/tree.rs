//! Binary merkle tree over tranche allocation entries.
//!
//! Leaf formula: `SHA256(account(32) || balance_le(8))`.
//! Internal nodes: `SHA256(left || right)` with the pair sorted
//! byte-lexicographically before concatenation, so a proof never needs to
//! track sibling position. A level with an odd node count pairs its last
//! node with itself instead of promoting it unpaired, which closes the
//! tree-shape ambiguity a phantom duplicate leaf could otherwise exploit.
//!
//! These formulas MUST match the on-chain verifier in the `merkle_drop`
//! program. Both sides call `solana_program::hash::hashv` (SHA-256) over
//! identical input bytes, and the conformance test in
//! `tests/proof_roundtrip.rs` checks them against each other.

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::hash::hashv;
use tracing::debug;

use crate::allocations::AllocationTable;

/// Compute the leaf hash for an (account, balance) allocation entry.
pub fn hash_leaf(account: &Pubkey, balance: u64) -> [u8; 32] {
    hashv(&[&account.to_bytes(), &balance.to_le_bytes()]).to_bytes()
}

/// Combine two child hashes into their parent, sorting the pair first.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[a, b]).to_bytes()
    } else {
        hashv(&[b, a]).to_bytes()
    }
}

/// Verify a merkle proof against a root.
///
/// The offline mirror of the program's verifier: fold the proof over the
/// leaf bottom-up and compare with the root.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let mut computed = leaf;
    for sibling in proof {
        computed = hash_pair(&computed, sibling);
    }
    computed == root
}

/// The merkle tree committed by one tranche.
///
/// Construction is deterministic: leaves are ordered by ascending account
/// bytes (the `AllocationTable` iteration order), so the same table always
/// produces the same root regardless of input order. The tree is ephemeral;
/// once the root is committed on chain only the allocation table is needed
/// to regenerate proofs.
#[derive(Debug, Clone)]
pub struct AllocationTree {
    /// The (account, balance) entries in leaf order.
    entries: Vec<(Pubkey, u64)>,
    /// All node hashes stored level by level, bottom-up. `nodes[..leaf_count]`
    /// are the leaves; the last node is the root.
    nodes: Vec<[u8; 32]>,
    leaf_count: usize,
}

impl AllocationTree {
    /// Build the tree for an allocation table.
    ///
    /// The table guarantees non-emptiness and account uniqueness, so
    /// construction cannot fail.
    pub fn new(table: &AllocationTable) -> Self {
        let entries: Vec<(Pubkey, u64)> = table
            .entries()
            .map(|(account, balance)| (*account, *balance))
            .collect();

        let leaf_count = entries.len();
        let mut nodes: Vec<[u8; 32]> = entries
            .iter()
            .map(|(account, balance)| hash_leaf(account, *balance))
            .collect();

        // Build parent levels bottom-up over the flat node vector
        let mut level_start = 0;
        let mut level_len = leaf_count;
        while level_len > 1 {
            let next_len = level_len.div_ceil(2);
            for i in 0..next_len {
                let left = nodes[level_start + 2 * i];
                let right = if 2 * i + 1 < level_len {
                    nodes[level_start + 2 * i + 1]
                } else {
                    // Duplicate the last node if the level is odd
                    left
                };
                nodes.push(hash_pair(&left, &right));
            }
            level_start += level_len;
            level_len = next_len;
        }

        let tree = Self {
            entries,
            nodes,
            leaf_count,
        };
        debug!(
            leaves = tree.leaf_count,
            root = %hex::encode(tree.root()),
            "built allocation tree"
        );
        tree
    }

    /// The merkle root committing to every entry.
    pub fn root(&self) -> [u8; 32] {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Generate the inclusion proof for the leaf at the given index.
    ///
    /// Returns the sibling hashes from leaf level to root, bottom-up.
    /// `None` if the index is out of range.
    pub fn proof_at(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.leaf_count {
            return None;
        }

        let mut proof = Vec::new();
        let mut idx = index;
        let mut level_start = 0;
        let mut level_len = self.leaf_count;

        while level_len > 1 {
            let sibling_idx = if idx % 2 == 0 {
                // The last node of an odd level is its own sibling
                if idx + 1 < level_len {
                    idx + 1
                } else {
                    idx
                }
            } else {
                idx - 1
            };
            proof.push(self.nodes[level_start + sibling_idx]);

            idx /= 2;
            level_start += level_len;
            level_len = level_len.div_ceil(2);
        }

        Some(proof)
    }

    /// Generate the inclusion proof for an account's entry.
    pub fn proof(&self, account: &Pubkey) -> Option<Vec<[u8; 32]>> {
        let index = self
            .entries
            .binary_search_by(|(entry_account, _)| entry_account.cmp(account))
            .ok()?;
        self.proof_at(index)
    }

    /// The balance committed for an account, if present.
    pub fn balance(&self, account: &Pubkey) -> Option<u64> {
        let index = self
            .entries
            .binary_search_by(|(entry_account, _)| entry_account.cmp(account))
            .ok()?;
        Some(self.entries[index].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(count: u64) -> AllocationTable {
        AllocationTable::from_entries((0..count).map(|i| (Pubkey::new_unique(), (i + 1) * 100)))
            .unwrap()
    }

    #[test]
    fn single_leaf_root_equals_leaf() {
        let account = Pubkey::new_unique();
        let table = AllocationTable::from_entries([(account, 1000)]).unwrap();
        let tree = AllocationTree::new(&table);

        assert_eq!(tree.root(), hash_leaf(&account, 1000));
        assert_eq!(tree.proof(&account).unwrap(), Vec::<[u8; 32]>::new());
        assert!(verify(&[], tree.root(), hash_leaf(&account, 1000)));
    }

    #[test]
    fn three_leaf_tree_matches_hand_computed_root() {
        let table = table_of(3);
        let entries: Vec<(Pubkey, u64)> = table.entries().map(|(a, b)| (*a, *b)).collect();
        let tree = AllocationTree::new(&table);

        let l0 = hash_leaf(&entries[0].0, entries[0].1);
        let l1 = hash_leaf(&entries[1].0, entries[1].1);
        let l2 = hash_leaf(&entries[2].0, entries[2].1);

        // The unpaired third leaf is hashed with itself
        let expected = hash_pair(&hash_pair(&l0, &l1), &hash_pair(&l2, &l2));
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn all_proofs_verify() {
        for count in [1u64, 2, 3, 4, 5, 8, 17] {
            let table = table_of(count);
            let tree = AllocationTree::new(&table);
            let root = tree.root();

            for (account, balance) in table.entries() {
                let proof = tree.proof(account).expect("proof should exist");
                assert!(
                    verify(&proof, root, hash_leaf(account, *balance)),
                    "proof should verify for table of {count}"
                );
            }
        }
    }

    #[test]
    fn proof_length_is_log2_ceiling() {
        for (count, expected_len) in [(1u64, 0usize), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4)]
        {
            let table = table_of(count);
            let tree = AllocationTree::new(&table);
            let (account, _) = table.entries().next().unwrap();
            assert_eq!(
                tree.proof(account).unwrap().len(),
                expected_len,
                "proof length for {count} leaves"
            );
        }
    }

    #[test]
    fn tampered_proof_fails() {
        let table = table_of(4);
        let tree = AllocationTree::new(&table);
        let root = tree.root();
        let (account, balance) = table.entries().next().unwrap();
        let leaf = hash_leaf(account, *balance);

        let mut tampered = tree.proof(account).unwrap();
        tampered[0][0] ^= 0x01;
        assert!(!verify(&tampered, root, leaf));
    }

    #[test]
    fn another_leafs_proof_fails() {
        let table = table_of(4);
        let tree = AllocationTree::new(&table);
        let root = tree.root();

        let entries: Vec<(Pubkey, u64)> = table.entries().map(|(a, b)| (*a, *b)).collect();
        let leaf0 = hash_leaf(&entries[0].0, entries[0].1);
        let proof3 = tree.proof_at(3).unwrap();
        assert!(!verify(&proof3, root, leaf0));
    }

    #[test]
    fn construction_is_insertion_order_independent() {
        let entries: Vec<(Pubkey, u64)> =
            (0..7u64).map(|i| (Pubkey::new_unique(), i * 10 + 1)).collect();

        let mut reversed = entries.clone();
        reversed.reverse();

        let tree_a = AllocationTree::new(&AllocationTable::from_entries(entries).unwrap());
        let tree_b = AllocationTree::new(&AllocationTable::from_entries(reversed).unwrap());
        assert_eq!(tree_a.root(), tree_b.root());
    }

    #[test]
    fn unknown_account_has_no_proof() {
        let table = table_of(3);
        let tree = AllocationTree::new(&table);

        assert!(tree.proof(&Pubkey::new_unique()).is_none());
        assert!(tree.proof_at(3).is_none());
    }
}
