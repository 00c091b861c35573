//! Integration tests for the prize-draws eligibility engine.
//!
//! These tests exercise the public API end to end: shape per-chain
//! snapshots the way upstream fetchers deliver them, resolve per-vault and
//! per-chain eligibility, and build the unchecked-draws report a UI or
//! claim trigger would consume.
//!
//! Run:
//! ```bash
//! cargo test -p prize-draws-integration-tests
//! ```

use cosmwasm_std::{Timestamp, Uint128};
use prize_draws_common::{
    snapshot_fingerprint, BalanceUpdate, ChainSnapshot, Draw, DrawWatermarks, VaultKey,
};
use prize_draws_engine::{network_eligibility, track_vaults, unchecked_draws};

// ─── Builders ───

fn draw(id: u64, seconds: u64) -> Draw {
    Draw {
        id,
        closed_at: Timestamp::from_seconds(seconds),
    }
}

fn update(balance: u128, delegate_balance: u128, seconds: u64) -> BalanceUpdate {
    BalanceUpdate {
        balance: Uint128::new(balance),
        delegate_balance: Uint128::new(delegate_balance),
        observed_at: Timestamp::from_seconds(seconds),
    }
}

fn ids(draws: &[Draw]) -> Vec<u64> {
    draws.iter().map(|d| d.id).collect()
}

/// A chain with a weekly draw cadence and two vaults with distinct
/// deposit/withdraw histories.
fn optimism_snapshot() -> ChainSnapshot {
    ChainSnapshot::new(10)
        .with_draws(vec![
            draw(1, 1_000),
            draw(2, 2_000),
            draw(3, 3_000),
            draw(4, 4_000),
        ])
        // Deposited before draw 1, withdrew everything before draw 3.
        .with_vault(
            "0xusdc-vault",
            vec![update(500, 500, 100), update(0, 0, 2_500)],
        )
        // Delegated-only position opened between draws 2 and 3.
        .with_vault("0xweth-vault", vec![update(0, 250, 2_200)])
}

fn base_snapshot() -> ChainSnapshot {
    ChainSnapshot::new(8453)
        .with_draws(vec![draw(1, 1_500), draw(2, 5_000)])
        .with_vault("0xdai-vault", vec![update(90, 90, 1_400)])
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_multi_chain_eligibility_and_report() {
    let snapshots = vec![optimism_snapshot(), base_snapshot()];
    let network = network_eligibility(&snapshots);

    assert!(network.is_complete());

    // Chain 10: usdc vault covers draws 1-2, weth vault covers draws 3-4.
    let optimism = &network.chains[&10];
    assert_eq!(ids(&optimism.union), vec![1, 2, 3, 4]);
    assert_eq!(ids(&optimism.per_vault["0xusdc-vault"]), vec![1, 2]);
    assert_eq!(ids(&optimism.per_vault["0xweth-vault"]), vec![3, 4]);

    // Chain 8453: deposit precedes both draws.
    let base = &network.chains[&8453];
    assert_eq!(ids(&base.union), vec![1, 2]);

    assert_eq!(network.total_eligible, 6);

    // Nothing checked yet: the report returns everything, spanning both
    // chains' closing times.
    let report = unchecked_draws(&network, &DrawWatermarks::new("0xuser"));
    assert_eq!(report.total_count, 6);
    let range = report.timestamps.unwrap();
    assert_eq!(range.start, Timestamp::from_seconds(1_000));
    assert_eq!(range.end, Timestamp::from_seconds(5_000));

    // Per-chain watermarks trim independently.
    let watermarks = DrawWatermarks::new("0xuser")
        .with_checked(10, 3)
        .with_checked(8453, 2);
    let report = unchecked_draws(&network, &watermarks);
    assert_eq!(report.total_count, 1);
    assert_eq!(ids(&report.per_chain[&10]), vec![4]);
    assert!(report.per_chain[&8453].is_empty());
    let range = report.timestamps.unwrap();
    assert_eq!(range.start, Timestamp::from_seconds(4_000));
    assert_eq!(range.end, Timestamp::from_seconds(4_000));
}

#[test]
fn test_shared_draw_counted_once_per_chain() {
    // Both vaults held a balance over draw 2; the chain union still lists
    // it once.
    let snapshot = ChainSnapshot::new(10)
        .with_draws(vec![draw(1, 1_000), draw(2, 2_000)])
        .with_vault("0xa", vec![update(10, 10, 100)])
        .with_vault("0xb", vec![update(0, 0, 100), update(7, 7, 1_500)]);

    let network = network_eligibility(&[snapshot]);
    assert_eq!(ids(&network.chains[&10].union), vec![1, 2]);
    assert_eq!(network.total_eligible, 2);
}

#[test]
fn test_pending_chain_is_loading_not_zero() {
    let mut snapshots = vec![optimism_snapshot()];
    // The caller tracks a vault on a chain whose fetches have not landed.
    track_vaults(&mut snapshots, &[VaultKey::new(42_161, "0xusdc-vault")]);

    let network = network_eligibility(&snapshots);
    assert_eq!(network.pending_chains, vec![42_161]);
    assert!(!network.is_complete());
    assert_eq!(network.total_eligible, 4);

    let report = unchecked_draws(&network, &DrawWatermarks::new("0xuser"));
    assert_eq!(report.pending_chains, vec![42_161]);
    // The pending chain has no per-chain entry: a consumer must render a
    // loading state for it rather than "0 draws to check".
    assert!(!report.per_chain.contains_key(&42_161));
}

#[test]
fn test_fresh_account_has_nothing_to_check() {
    // Vault tracked, fetch confirmed empty: a real zero, not a pending one.
    let snapshot = ChainSnapshot::new(10)
        .with_draws(vec![draw(1, 1_000)])
        .with_vault("0xusdc-vault", vec![]);

    let network = network_eligibility(&[snapshot]);
    assert!(network.is_complete());
    assert_eq!(network.total_eligible, 0);

    let report = unchecked_draws(&network, &DrawWatermarks::new("0xuser"));
    assert_eq!(report.total_count, 0);
    assert_eq!(report.timestamps, None);
    assert!(report.pending_chains.is_empty());
}

#[test]
fn test_report_serializes_for_caching() {
    let network = network_eligibility(&[base_snapshot()]);
    let report = unchecked_draws(&network, &DrawWatermarks::new("0xuser").with_checked(8453, 1));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["user"], "0xuser");
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["per_chain"]["8453"][0]["id"], 2);
    assert!(json["timestamps"].is_object());

    // And back: the cached form rehydrates without loss.
    let back: prize_draws_engine::UncheckedDrawsReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_fingerprint_keys_a_memo_cache() {
    let snapshot = optimism_snapshot();
    let key = snapshot_fingerprint(&snapshot);

    // Unchanged inputs -> same key -> a caller may reuse its cached result.
    assert_eq!(snapshot_fingerprint(&optimism_snapshot()), key);

    // A new balance event arrives: the key moves, forcing a recompute.
    let refreshed = optimism_snapshot().with_vault(
        "0xusdc-vault",
        vec![
            update(500, 500, 100),
            update(0, 0, 2_500),
            update(40, 40, 3_500),
        ],
    );
    assert_ne!(snapshot_fingerprint(&refreshed), key);
}
