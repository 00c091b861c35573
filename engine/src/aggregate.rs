use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;
use prize_draws_common::{ChainSnapshot, Draw, DrawWatermarks, Fetched};
use tracing::debug;

use crate::error::EngineError;
use crate::resolver::vault_eligible_draws;

/// Per-chain eligibility: the union across vaults plus the per-vault detail
/// for callers that need it.
#[cw_serde]
pub struct ChainEligibility {
    pub chain_id: u64,
    /// Vault address -> draws eligible through that vault.
    pub per_vault: BTreeMap<String, Vec<Draw>>,
    /// Draws eligible through at least one vault, one entry per draw id,
    /// ascending by timestamp.
    pub union: Vec<Draw>,
}

/// Eligibility across every requested chain.
#[cw_serde]
pub struct NetworkEligibility {
    pub chains: BTreeMap<u64, ChainEligibility>,
    /// Chains whose inputs had not all arrived. They contribute nothing to
    /// the totals and must not be read as "confirmed zero".
    pub pending_chains: Vec<u64>,
    pub total_eligible: u32,
}

impl NetworkEligibility {
    pub fn is_complete(&self) -> bool {
        self.pending_chains.is_empty()
    }
}

/// Closing-time range of a set of draws.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct DrawTimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Eligible draws the user has not yet checked for a prize, with summary
/// statistics for display.
#[cw_serde]
pub struct UncheckedDrawsReport {
    pub user: String,
    pub per_chain: BTreeMap<u64, Vec<Draw>>,
    pub pending_chains: Vec<u64>,
    pub total_count: u32,
    /// Unset when nothing is left to check.
    pub timestamps: Option<DrawTimeRange>,
}

/// Resolve one chain strictly: every input scope must have arrived.
///
/// Runs the resolver once per vault with balance events and unions the
/// results by draw id, so a draw eligible through several vaults counts
/// once for the chain.
pub fn chain_eligibility(snapshot: &ChainSnapshot) -> Result<ChainEligibility, EngineError> {
    let draws = match &snapshot.draws {
        Fetched::Pending => {
            return Err(EngineError::DrawsPending {
                chain_id: snapshot.chain_id,
            })
        }
        Fetched::Ready(draws) => draws,
    };

    let mut per_vault = BTreeMap::new();
    let mut by_id: BTreeMap<u64, Draw> = BTreeMap::new();

    for (vault, history) in &snapshot.vaults {
        let updates = history
            .as_ready()
            .ok_or_else(|| EngineError::BalancesPending {
                chain_id: snapshot.chain_id,
                vault: vault.clone(),
            })?;
        if updates.is_empty() {
            continue;
        }

        let eligible = vault_eligible_draws(draws, updates);
        for draw in &eligible {
            by_id.entry(draw.id).or_insert(*draw);
        }
        per_vault.insert(vault.clone(), eligible);
    }

    let mut union: Vec<Draw> = by_id.into_values().collect();
    union.sort_by_key(|d| (d.closed_at, d.id));

    debug!(
        chain_id = snapshot.chain_id,
        vaults = per_vault.len(),
        eligible = union.len(),
        "resolved chain eligibility"
    );

    Ok(ChainEligibility {
        chain_id: snapshot.chain_id,
        per_vault,
        union,
    })
}

/// Resolve every chain, folding still-pending chains into `pending_chains`
/// instead of failing the whole view. `total_eligible` sums the per-chain
/// union counts; draw ids are chain-scoped, so nothing deduplicates across
/// chains.
pub fn network_eligibility(snapshots: &[ChainSnapshot]) -> NetworkEligibility {
    let mut chains = BTreeMap::new();
    let mut pending_chains = Vec::new();

    for snapshot in snapshots {
        match chain_eligibility(snapshot) {
            Ok(eligibility) => {
                chains.insert(snapshot.chain_id, eligibility);
            }
            Err(err) => {
                debug!(chain_id = snapshot.chain_id, %err, "chain inputs still pending");
                pending_chains.push(snapshot.chain_id);
            }
        }
    }

    let total_eligible = chains.values().map(|c| c.union.len() as u32).sum();

    NetworkEligibility {
        chains,
        pending_chains,
        total_eligible,
    }
}

/// Filter eligibility down to draws newer than the user's last-checked
/// watermark on each chain and summarize what remains.
///
/// Chains that were pending in `eligibility` stay listed as pending here;
/// a consumer seeing `total_count == 0` with pending chains should show a
/// loading state, not an empty one.
pub fn unchecked_draws(
    eligibility: &NetworkEligibility,
    watermarks: &DrawWatermarks,
) -> UncheckedDrawsReport {
    let mut per_chain = BTreeMap::new();
    let mut total_count = 0u32;
    let mut range: Option<DrawTimeRange> = None;

    for (chain_id, chain) in &eligibility.chains {
        let watermark = watermarks.last_checked(*chain_id);
        let remaining: Vec<Draw> = chain
            .union
            .iter()
            .filter(|draw| draw.id > watermark)
            .copied()
            .collect();

        total_count += remaining.len() as u32;
        for draw in &remaining {
            range = Some(match range {
                None => DrawTimeRange {
                    start: draw.closed_at,
                    end: draw.closed_at,
                },
                Some(range) => DrawTimeRange {
                    start: range.start.min(draw.closed_at),
                    end: range.end.max(draw.closed_at),
                },
            });
        }
        per_chain.insert(*chain_id, remaining);
    }

    debug!(
        user = watermarks.user.as_str(),
        total_count,
        pending = eligibility.pending_chains.len(),
        "built unchecked-draws report"
    );

    UncheckedDrawsReport {
        user: watermarks.user.clone(),
        per_chain,
        pending_chains: eligibility.pending_chains.clone(),
        total_count,
        timestamps: range,
    }
}
