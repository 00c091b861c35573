use prize_draws_common::{BalanceUpdate, Draw};
use tracing::trace;

/// Draws during which this vault's balance step-function was non-zero in
/// either the held or the delegated amount.
///
/// Both inputs must already be ascending by time; the walk relies on that
/// order and does not re-sort. Each draw is attributed to the most recent
/// update at or before its close, so a draw closing exactly at an update's
/// instant counts for that update. Draws closing before the first update
/// predate the account and are never eligible.
///
/// Runs in O(draws + updates): both sequences are consumed once, newest
/// entry backward, instead of searching the update list per draw.
pub fn vault_eligible_draws(draws: &[Draw], updates: &[BalanceUpdate]) -> Vec<Draw> {
    let mut eligible = Vec::new();
    // One past the newest draw not yet attributed to an update era.
    let mut end = draws.len();

    for update in updates.iter().rev() {
        let qualifies = !update.is_zero();
        while end > 0 && draws[end - 1].closed_at >= update.observed_at {
            end -= 1;
            if qualifies {
                eligible.push(draws[end]);
            }
        }
        if end == 0 {
            break;
        }
    }

    // Collected newest-first; callers get them ascending.
    eligible.reverse();

    trace!(
        draws = draws.len(),
        updates = updates.len(),
        eligible = eligible.len(),
        "resolved vault eligibility"
    );

    eligible
}
