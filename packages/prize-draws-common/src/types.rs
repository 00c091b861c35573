use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};

/// One award period of a chain's prize pool.
///
/// Ids are unique within a chain and increase with time. `closed_at` is the
/// moment the period closed and winners became determinable.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct Draw {
    pub id: u64,
    pub closed_at: Timestamp,
}

/// A step-change in a user's balances within one vault.
///
/// The amounts hold from `observed_at` until the next chronologically later
/// update for the same (chain, vault, user).
#[cw_serde]
#[derive(Copy, Eq)]
pub struct BalanceUpdate {
    pub balance: Uint128,
    /// Chance-weighted balance; differs from `balance` when the user has
    /// delegated their chance to or from another address.
    pub delegate_balance: Uint128,
    pub observed_at: Timestamp,
}

impl BalanceUpdate {
    /// True when neither the held nor the delegated amount counts toward draws.
    pub fn is_zero(&self) -> bool {
        self.balance.is_zero() && self.delegate_balance.is_zero()
    }
}

/// Fetch state of an externally retrieved scope.
///
/// `Ready` of an empty list is a confirmed empty answer; `Pending` is a
/// non-answer and must never be read as zero.
#[cw_serde]
pub enum Fetched<T> {
    Pending,
    Ready(T),
}

impl<T> Fetched<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Fetched::Pending)
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Fetched::Pending => None,
            Fetched::Ready(value) => Some(value),
        }
    }
}

/// Composite key naming one vault on one chain.
#[cw_serde]
#[derive(Eq, PartialOrd, Ord)]
pub struct VaultKey {
    pub chain_id: u64,
    pub vault: String,
}

impl VaultKey {
    pub fn new(chain_id: u64, vault: &str) -> Self {
        Self {
            chain_id,
            vault: vault.to_string(),
        }
    }
}

/// Everything the engine consumes for one chain, as delivered by upstream
/// fetchers: the chain's draw history plus one balance history per vault.
///
/// Both sequences must arrive ascending by time; nothing here re-sorts them.
#[cw_serde]
pub struct ChainSnapshot {
    pub chain_id: u64,
    pub draws: Fetched<Vec<Draw>>,
    /// Vault address -> that vault's balance-update history.
    pub vaults: BTreeMap<String, Fetched<Vec<BalanceUpdate>>>,
}

impl ChainSnapshot {
    /// A snapshot with no data delivered yet.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            draws: Fetched::Pending,
            vaults: BTreeMap::new(),
        }
    }

    pub fn with_draws(mut self, draws: Vec<Draw>) -> Self {
        self.draws = Fetched::Ready(draws);
        self
    }

    pub fn with_vault(mut self, vault: &str, history: Vec<BalanceUpdate>) -> Self {
        self.vaults
            .insert(vault.to_string(), Fetched::Ready(history));
        self
    }

    pub fn with_pending_vault(mut self, vault: &str) -> Self {
        self.vaults.insert(vault.to_string(), Fetched::Pending);
        self
    }

    /// Balance history for `vault`. An untracked or event-less vault reads
    /// as an empty slice; `None` only while the fetch is still pending.
    pub fn vault_history(&self, vault: &str) -> Option<&[BalanceUpdate]> {
        match self.vaults.get(vault) {
            None => Some(&[]),
            Some(Fetched::Pending) => None,
            Some(Fetched::Ready(history)) => Some(history.as_slice()),
        }
    }

    /// True once the draw list and every tracked vault history have arrived.
    pub fn is_complete(&self) -> bool {
        !self.draws.is_pending() && self.vaults.values().all(|h| !h.is_pending())
    }

    /// Vaults whose balance history has not arrived yet.
    pub fn pending_vaults(&self) -> Vec<VaultKey> {
        self.vaults
            .iter()
            .filter(|(_, history)| history.is_pending())
            .map(|(vault, _)| VaultKey::new(self.chain_id, vault))
            .collect()
    }
}

/// One user's last-checked draw ids, keyed by chain.
///
/// Read-only to the engine; owned and persisted by the caller (typically
/// device-local storage). An absent chain means nothing checked yet.
#[cw_serde]
pub struct DrawWatermarks {
    pub user: String,
    pub by_chain: BTreeMap<u64, u64>,
}

impl DrawWatermarks {
    pub fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
            by_chain: BTreeMap::new(),
        }
    }

    pub fn with_checked(mut self, chain_id: u64, draw_id: u64) -> Self {
        self.by_chain.insert(chain_id, draw_id);
        self
    }

    /// Highest draw id already checked on `chain_id`, 0 when none.
    pub fn last_checked(&self, chain_id: u64) -> u64 {
        self.by_chain.get(&chain_id).copied().unwrap_or(0)
    }
}
