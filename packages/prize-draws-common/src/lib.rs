pub mod fingerprint;
pub mod types;

pub use fingerprint::snapshot_fingerprint;
pub use types::{BalanceUpdate, ChainSnapshot, Draw, DrawWatermarks, Fetched, VaultKey};
