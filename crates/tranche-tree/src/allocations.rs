//! Allocation table parsing.
//!
//! External input format: a JSON object mapping base58 account addresses to
//! balances in the token's smallest unit, e.g.
//!
//! ```json
//! { "3gmBN8LBomg3sZEjTgp2YsECMYgJpjcT7xUfpnDB4gSs": "1000000000" }
//! ```
//!
//! Balances may be decimal strings or plain JSON integers. Malformed input
//! fails here, at parse time, never later during tree construction.

use std::collections::BTreeMap;
use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("invalid account address `{0}`")]
    InvalidAddress(String),

    #[error("invalid balance for `{account}`: {reason}")]
    InvalidBalance { account: String, reason: String },

    #[error("duplicate account `{0}`")]
    DuplicateAccount(String),

    #[error("allocation table is empty")]
    Empty,

    #[error("total allocation overflows u64")]
    TotalOverflow,

    #[error("allocation input is not a JSON object")]
    NotAnObject,

    #[error("malformed allocation JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A validated account -> balance mapping.
///
/// Invariants: non-empty, accounts unique, stored in ascending account byte
/// order (the canonical leaf order for tree construction). Zero balances are
/// legal here — such entries simply can never be claimed.
#[derive(Debug, Clone)]
pub struct AllocationTable {
    entries: BTreeMap<Pubkey, u64>,
}

impl AllocationTable {
    /// Parse the external JSON allocation format.
    ///
    /// Duplicate keys inside the JSON text collapse to the last occurrence
    /// before parsing ever sees them (JSON object semantics); base58 decoding
    /// is injective, so no further duplicates can arise here.
    pub fn from_json_str(json: &str) -> Result<Self, AllocationError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(AllocationError::NotAnObject)?;

        let mut entries = BTreeMap::new();
        for (key, balance) in object {
            let account =
                Pubkey::from_str(key).map_err(|_| AllocationError::InvalidAddress(key.clone()))?;
            let balance = parse_balance(key, balance)?;
            entries.insert(account, balance);
        }

        if entries.is_empty() {
            return Err(AllocationError::Empty);
        }

        debug!(accounts = entries.len(), "parsed allocation table");
        Ok(Self { entries })
    }

    /// Build a table from (account, balance) pairs.
    ///
    /// Unlike the JSON path, callers can hand in the same account twice;
    /// that is rejected rather than silently overwritten.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Pubkey, u64)>,
    ) -> Result<Self, AllocationError> {
        let mut table = BTreeMap::new();
        for (account, balance) in entries {
            if table.insert(account, balance).is_some() {
                return Err(AllocationError::DuplicateAccount(account.to_string()));
            }
        }

        if table.is_empty() {
            return Err(AllocationError::Empty);
        }
        Ok(Self { entries: table })
    }

    /// Sum of all balances, the value passed to `seed_new_allocations`.
    pub fn total_allocation(&self) -> Result<u64, AllocationError> {
        self.entries
            .values()
            .try_fold(0u64, |total, balance| total.checked_add(*balance))
            .ok_or(AllocationError::TotalOverflow)
    }

    pub fn balance(&self, account: &Pubkey) -> Option<u64> {
        self.entries.get(account).copied()
    }

    /// Entries in ascending account byte order.
    pub fn entries(&self) -> impl Iterator<Item = (&Pubkey, &u64)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_balance(account: &str, value: &serde_json::Value) -> Result<u64, AllocationError> {
    match value {
        serde_json::Value::String(s) => {
            s.trim()
                .parse::<u64>()
                .map_err(|e| AllocationError::InvalidBalance {
                    account: account.to_string(),
                    reason: e.to_string(),
                })
        }
        serde_json::Value::Number(n) => n.as_u64().ok_or(AllocationError::InvalidBalance {
            account: account.to_string(),
            reason: "not an unsigned integer".to_string(),
        }),
        other => Err(AllocationError::InvalidBalance {
            account: account.to_string(),
            reason: format!("expected a string or integer, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_number_balances() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let json = format!(r#"{{ "{a}": "1000000000000", "{b}": 250 }}"#);

        let table = AllocationTable::from_json_str(&json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.balance(&a), Some(1_000_000_000_000));
        assert_eq!(table.balance(&b), Some(250));
        assert_eq!(table.total_allocation().unwrap(), 1_000_000_000_250);
    }

    #[test]
    fn accepts_zero_balances() {
        let a = Pubkey::new_unique();
        let json = format!(r#"{{ "{a}": "0" }}"#);

        let table = AllocationTable::from_json_str(&json).unwrap();
        assert_eq!(table.balance(&a), Some(0));
    }

    #[test]
    fn rejects_invalid_address() {
        let err = AllocationTable::from_json_str(r#"{ "not-an-address": "100" }"#).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidAddress(_)));
    }

    #[test]
    fn rejects_malformed_balances() {
        let a = Pubkey::new_unique();
        for balance in [r#""12.5""#, r#""lots""#, r#""-3""#, "-3", "1.5", "null", "[1]"] {
            let json = format!(r#"{{ "{a}": {balance} }}"#);
            let err = AllocationTable::from_json_str(&json).unwrap_err();
            assert!(
                matches!(err, AllocationError::InvalidBalance { .. }),
                "balance {balance} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_and_non_object_input() {
        assert!(matches!(
            AllocationTable::from_json_str("{}").unwrap_err(),
            AllocationError::Empty
        ));
        assert!(matches!(
            AllocationTable::from_json_str("[]").unwrap_err(),
            AllocationError::NotAnObject
        ));
        assert!(matches!(
            AllocationTable::from_json_str("{").unwrap_err(),
            AllocationError::Json(_)
        ));
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let a = Pubkey::new_unique();
        let err = AllocationTable::from_entries([(a, 1), (a, 2)]).unwrap_err();
        assert!(matches!(err, AllocationError::DuplicateAccount(_)));
    }

    #[test]
    fn total_allocation_overflow_is_detected() {
        let table =
            AllocationTable::from_entries([(Pubkey::new_unique(), u64::MAX), (Pubkey::new_unique(), 1)])
                .unwrap();
        assert!(matches!(
            table.total_allocation().unwrap_err(),
            AllocationError::TotalOverflow
        ));
    }
}
