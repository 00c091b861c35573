use prize_draws_common::{ChainSnapshot, Fetched, VaultKey};

/// Ensure every vault named in `vaults` is tracked by the snapshot of its
/// chain, creating pending chains and pending vault entries where no
/// collaborator has reported yet.
///
/// After this, downstream code can iterate a snapshot's vault map without
/// special-casing vaults that were requested but never answered for: those
/// show up explicitly as pending instead of being silently absent.
pub fn track_vaults(snapshots: &mut Vec<ChainSnapshot>, vaults: &[VaultKey]) {
    for key in vaults {
        let idx = match snapshots.iter().position(|s| s.chain_id == key.chain_id) {
            Some(idx) => idx,
            None => {
                snapshots.push(ChainSnapshot::new(key.chain_id));
                snapshots.len() - 1
            }
        };
        snapshots[idx]
            .vaults
            .entry(key.vault.clone())
            .or_insert(Fetched::Pending);
    }
}
