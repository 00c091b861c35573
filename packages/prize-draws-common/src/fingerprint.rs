use sha2::{Digest, Sha256};

use crate::types::{BalanceUpdate, ChainSnapshot, Draw, Fetched};

// Domain-separation prefixes: a pending scope, a delivered-but-empty scope,
// and real content must never hash alike.
const TAG_CHAIN: u8 = 0x00;
const TAG_PENDING: u8 = 0x01;
const TAG_READY: u8 = 0x02;
const TAG_DRAW: u8 = 0x03;
const TAG_UPDATE: u8 = 0x04;
const TAG_VAULT: u8 = 0x05;

/// Hex-encoded sha256 identity of a snapshot's content.
///
/// Deterministic over the chain id, the draw sequence, and every per-vault
/// balance history, so equal fingerprints mean equal inputs. Callers that
/// recompute on a refresh timer can key a memo cache on it instead of
/// re-running the engine over unchanged data.
pub fn snapshot_fingerprint(snapshot: &ChainSnapshot) -> String {
    let mut hasher = Sha256::new();
    hasher.update([TAG_CHAIN]);
    hasher.update(snapshot.chain_id.to_be_bytes());

    hash_draws(&mut hasher, &snapshot.draws);
    for (vault, history) in &snapshot.vaults {
        hasher.update([TAG_VAULT]);
        hasher.update((vault.len() as u64).to_be_bytes());
        hasher.update(vault.as_bytes());
        hash_history(&mut hasher, history);
    }

    hex::encode(hasher.finalize())
}

fn hash_draws(hasher: &mut Sha256, draws: &Fetched<Vec<Draw>>) {
    match draws {
        Fetched::Pending => hasher.update([TAG_PENDING]),
        Fetched::Ready(draws) => {
            hasher.update([TAG_READY]);
            hasher.update((draws.len() as u64).to_be_bytes());
            for draw in draws {
                hasher.update([TAG_DRAW]);
                hasher.update(draw.id.to_be_bytes());
                hasher.update(draw.closed_at.nanos().to_be_bytes());
            }
        }
    }
}

fn hash_history(hasher: &mut Sha256, history: &Fetched<Vec<BalanceUpdate>>) {
    match history {
        Fetched::Pending => hasher.update([TAG_PENDING]),
        Fetched::Ready(updates) => {
            hasher.update([TAG_READY]);
            hasher.update((updates.len() as u64).to_be_bytes());
            for update in updates {
                hasher.update([TAG_UPDATE]);
                hasher.update(update.balance.u128().to_be_bytes());
                hasher.update(update.delegate_balance.u128().to_be_bytes());
                hasher.update(update.observed_at.nanos().to_be_bytes());
            }
        }
    }
}
