use anchor_lang::prelude::*;

use crate::constants::{MAX_FUNDERS, MAX_TRANCHES};
use crate::error::MerkleDropError;
use crate::instructions::claim_tranche::check_claim;
use crate::instructions::claim_tranches::check_batch_shape;
use crate::state::{ClaimRecord, MerkleDrop, Tranche};
use crate::utils::{hash_leaf, hash_pair};

fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: MerkleDropError) {
    assert_eq!(result.unwrap_err(), expected.into());
}

/// A drop with one seeded tranche holding a single (account, balance) leaf.
fn drop_with_single_leaf_tranche(account: Pubkey, balance: u64) -> (MerkleDrop, Tranche) {
    let merkle_drop = MerkleDrop {
        tranche_count: 1,
        ..Default::default()
    };
    let tranche = Tranche {
        merkle_root: hash_leaf(&account, balance),
        total_allocation: balance,
        ..Default::default()
    };
    (merkle_drop, tranche)
}

mod funders {
    use super::*;

    #[test]
    fn add_and_remove() {
        let mut merkle_drop = MerkleDrop::default();
        let funder = Pubkey::new_unique();

        assert!(!merkle_drop.is_funder(&funder));
        merkle_drop.add_funder(funder).unwrap();
        assert!(merkle_drop.is_funder(&funder));

        merkle_drop.remove_funder(funder).unwrap();
        assert!(!merkle_drop.is_funder(&funder));
    }

    #[test]
    fn rejects_zero_address() {
        let mut merkle_drop = MerkleDrop::default();

        assert_err(
            merkle_drop.add_funder(Pubkey::default()),
            MerkleDropError::ZeroAddress,
        );
        assert_err(
            merkle_drop.remove_funder(Pubkey::default()),
            MerkleDropError::ZeroAddress,
        );
    }

    #[test]
    fn does_not_re_add_current_funder() {
        let mut merkle_drop = MerkleDrop::default();
        let funder = Pubkey::new_unique();

        merkle_drop.add_funder(funder).unwrap();
        assert_err(merkle_drop.add_funder(funder), MerkleDropError::AlreadyFunder);
    }

    #[test]
    fn does_not_remove_non_funder() {
        let mut merkle_drop = MerkleDrop::default();

        assert_err(
            merkle_drop.remove_funder(Pubkey::new_unique()),
            MerkleDropError::NotFunder,
        );
    }

    #[test]
    fn rejects_additions_beyond_capacity() {
        let mut merkle_drop = MerkleDrop::default();
        for _ in 0..MAX_FUNDERS {
            merkle_drop.add_funder(Pubkey::new_unique()).unwrap();
        }

        assert_err(
            merkle_drop.add_funder(Pubkey::new_unique()),
            MerkleDropError::FunderSetFull,
        );
    }
}

mod claim_record {
    use super::*;

    #[test]
    fn starts_unclaimed() {
        let record = ClaimRecord::default();
        for tranche_index in [0, 1, 63, 64, MAX_TRANCHES - 1] {
            assert!(!record.is_claimed(tranche_index));
        }
    }

    #[test]
    fn set_claimed_is_per_tranche() {
        let mut record = ClaimRecord::default();

        // Indexes around the bitmap word boundaries
        for tranche_index in [0, 63, 64, 127, 128, MAX_TRANCHES - 1] {
            record.set_claimed(tranche_index);
            assert!(record.is_claimed(tranche_index));
        }
        assert!(!record.is_claimed(1));
        assert!(!record.is_claimed(65));
    }

    #[test]
    fn set_claimed_is_idempotent_on_the_bit() {
        let mut record = ClaimRecord::default();
        record.set_claimed(7);
        record.set_claimed(7);
        assert!(record.is_claimed(7));
        assert!(!record.is_claimed(6));
        assert!(!record.is_claimed(8));
    }
}

mod verify_claim {
    use super::*;

    #[test]
    fn valid_proof_verifies_until_expiry() {
        let account = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let leaf_a = hash_leaf(&account, 100);
        let leaf_b = hash_leaf(&other, 25);
        let root = hash_pair(&leaf_a, &leaf_b);

        let mut tranche = Tranche {
            merkle_root: root,
            total_allocation: 125,
            ..Default::default()
        };

        assert!(tranche.verify_claim(&account, 100, &[leaf_b]));

        // Expiry gates verification regardless of proof validity
        tranche.expired = true;
        assert!(!tranche.verify_claim(&account, 100, &[leaf_b]));
    }

    #[test]
    fn wrong_balance_does_not_verify() {
        let account = Pubkey::new_unique();
        let (_, tranche) = drop_with_single_leaf_tranche(account, 100);

        assert!(tranche.verify_claim(&account, 100, &[]));
        assert!(!tranche.verify_claim(&account, 99, &[]));
    }

    #[test]
    fn wrong_account_does_not_verify() {
        let account = Pubkey::new_unique();
        let (_, tranche) = drop_with_single_leaf_tranche(account, 100);

        assert!(!tranche.verify_claim(&Pubkey::new_unique(), 100, &[]));
    }
}

mod batch_shape {
    use super::*;

    #[test]
    fn matching_inputs_pass() {
        check_batch_shape(3, 3, 3, 3).unwrap();
        check_batch_shape(0, 0, 0, 0).unwrap();
    }

    #[test]
    fn any_mismatch_is_rejected_wholesale() {
        // Three tranche indexes but two balances, and every other skew
        assert_err(check_batch_shape(3, 2, 3, 3), MerkleDropError::MismatchingInputs);
        assert_err(check_batch_shape(2, 3, 2, 2), MerkleDropError::MismatchingInputs);
        assert_err(check_batch_shape(2, 2, 0, 2), MerkleDropError::MismatchingInputs);
        assert_err(check_batch_shape(2, 2, 3, 2), MerkleDropError::MismatchingInputs);
        assert_err(check_batch_shape(2, 2, 2, 1), MerkleDropError::MismatchingInputs);
    }
}

mod claim_checks {
    use super::*;

    #[test]
    fn valid_claim_passes() {
        let account = Pubkey::new_unique();
        let (merkle_drop, tranche) = drop_with_single_leaf_tranche(account, 100);
        let record = ClaimRecord::default();

        check_claim(&merkle_drop, &tranche, &record, &account, 0, 100, &[]).unwrap();
    }

    #[test]
    fn future_tranche_fails_before_proof_logic() {
        let account = Pubkey::new_unique();
        let (merkle_drop, tranche) = drop_with_single_leaf_tranche(account, 100);
        let record = ClaimRecord::default();

        // Index equal to tranche_count does not exist yet; the proof is
        // not even looked at
        assert_err(
            check_claim(&merkle_drop, &tranche, &record, &account, 1, 100, &[]),
            MerkleDropError::TrancheInFuture,
        );
    }

    #[test]
    fn expired_tranche_fails_before_claim_state() {
        let account = Pubkey::new_unique();
        let (merkle_drop, mut tranche) = drop_with_single_leaf_tranche(account, 100);
        tranche.expired = true;

        // Even an already-claimed record reports expiry first
        let mut record = ClaimRecord::default();
        record.set_claimed(0);

        assert_err(
            check_claim(&merkle_drop, &tranche, &record, &account, 0, 100, &[]),
            MerkleDropError::TrancheExpired,
        );
    }

    #[test]
    fn double_claim_fails() {
        let account = Pubkey::new_unique();
        let (merkle_drop, tranche) = drop_with_single_leaf_tranche(account, 100);

        let mut record = ClaimRecord::default();
        check_claim(&merkle_drop, &tranche, &record, &account, 0, 100, &[]).unwrap();
        record.set_claimed(0);

        assert_err(
            check_claim(&merkle_drop, &tranche, &record, &account, 0, 100, &[]),
            MerkleDropError::AlreadyClaimed,
        );
    }

    #[test]
    fn zero_balance_fails_before_proof_check() {
        let account = Pubkey::new_unique();
        let (merkle_drop, mut tranche) = drop_with_single_leaf_tranche(account, 0);
        // Root commits to a zero balance, so the proof itself would verify
        tranche.merkle_root = hash_leaf(&account, 0);
        let record = ClaimRecord::default();

        assert_err(
            check_claim(&merkle_drop, &tranche, &record, &account, 0, 0, &[]),
            MerkleDropError::ZeroBalance,
        );
    }

    #[test]
    fn incorrect_proof_fails() {
        let account = Pubkey::new_unique();
        let (merkle_drop, tranche) = drop_with_single_leaf_tranche(account, 100);
        let record = ClaimRecord::default();

        // Balance not matching the committed leaf
        assert_err(
            check_claim(&merkle_drop, &tranche, &record, &account, 0, 99, &[]),
            MerkleDropError::IncorrectProof,
        );

        // Different account against the same root
        assert_err(
            check_claim(
                &merkle_drop,
                &tranche,
                &record,
                &Pubkey::new_unique(),
                0,
                100,
                &[],
            ),
            MerkleDropError::IncorrectProof,
        );
    }
}
