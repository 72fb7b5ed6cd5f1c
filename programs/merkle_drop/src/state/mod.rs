pub mod claim_state;
pub mod drop_state;
pub mod nonce_state;
pub mod tranche_state;

pub use claim_state::*;
pub use drop_state::*;
pub use nonce_state::*;
pub use tranche_state::*;
