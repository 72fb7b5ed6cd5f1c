pub mod add_funder;
pub mod claim_tranche;
pub mod claim_tranches;
pub mod create_merkle_drop;
pub mod expire_tranche;
pub mod remove_funder;
pub mod seed_new_allocations;
pub mod set_tranche_uri;
pub mod transfer_ownership;

pub use add_funder::*;
pub use claim_tranche::*;
pub use claim_tranches::*;
pub use create_merkle_drop::*;
pub use expire_tranche::*;
pub use remove_funder::*;
pub use seed_new_allocations::*;
pub use set_tranche_uri::*;
pub use transfer_ownership::*;
