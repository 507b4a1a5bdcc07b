//! Target-ordering solvers over a metagraph.
//! This module exists to keep combinatorial ordering separate from
//! shortest-path machinery. It does not own plan consumption.

use std::collections::BTreeSet;

use crate::metagraph::Metagraph;
use crate::types::{Move, PlanError, Vertex};

/// Beyond this many targets the exact solver's `2^n` state table stops
/// being affordable within a preprocessing budget; callers fall back to
/// [`greedy_order`].
pub const HELD_KARP_MAX_TARGETS: usize = 16;

/// Minimum-cost open path starting at the metagraph's start vertex and
/// visiting every target exactly once (Held-Karp dynamic programming over
/// target subsets). Returns the full visiting order, start included.
///
/// A single target short-circuits to the direct shortest path. Among
/// equal-cost orders, the first minimum found in ascending
/// (subset-mask, last-target-index) enumeration wins, so the result is
/// deterministic.
pub fn solve_tour(metagraph: &Metagraph) -> Result<Vec<Vertex>, PlanError> {
    let points = metagraph.points();
    let n = metagraph.target_count();
    if n == 0 {
        return Err(PlanError::NoTargets);
    }
    if n == 1 {
        return Ok(vec![points[0], points[1]]);
    }
    debug_assert!(n <= HELD_KARP_MAX_TARGETS, "state table would exceed the practical bound");

    // best[mask][last] = cheapest way to start at points[0] and visit
    // exactly the targets in `mask`, ending on target `last`, paired with
    // the previous target (usize::MAX for singleton subsets).
    let full = (1_usize << n) - 1;
    let mut best: Vec<Vec<Option<(u32, usize)>>> = vec![vec![None; n]; full + 1];
    for k in 0..n {
        best[1 << k][k] = Some((metagraph.distance(points[0], points[k + 1]), usize::MAX));
    }

    for mask in 1..=full {
        for last in 0..n {
            if mask & (1 << last) == 0 {
                continue;
            }
            let Some((cost, _)) = best[mask][last] else {
                continue;
            };
            for next in 0..n {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let extended = mask | (1 << next);
                let candidate = cost + metagraph.distance(points[last + 1], points[next + 1]);
                let improves = match best[extended][next] {
                    None => true,
                    Some((existing, _)) => candidate < existing,
                };
                if improves {
                    best[extended][next] = Some((candidate, last));
                }
            }
        }
    }

    let mut closing: Option<(u32, usize)> = None;
    for last in 0..n {
        if let Some((cost, _)) = best[full][last] {
            let improves = match closing {
                None => true,
                Some((best_cost, _)) => cost < best_cost,
            };
            if improves {
                closing = Some((cost, last));
            }
        }
    }

    let (_, mut last) = closing.expect("complete metagraph always yields a full tour");
    let mut order = vec![last];
    let mut mask = full;
    loop {
        let (_, previous) = best[mask][last].expect("dp chain is well formed");
        if previous == usize::MAX {
            break;
        }
        mask &= !(1 << last);
        last = previous;
        order.push(last);
    }
    order.reverse();

    let mut tour = Vec::with_capacity(n + 1);
    tour.push(points[0]);
    tour.extend(order.into_iter().map(|k| points[k + 1]));
    Ok(tour)
}

/// Nearest-neighbor ordering: from each stop, continue to the closest
/// unvisited target. Not optimal, but linear in metagraph edges; the
/// fallback when the target count exceeds [`HELD_KARP_MAX_TARGETS`].
/// Distance ties resolve to the lower vertex id.
pub fn greedy_order(metagraph: &Metagraph) -> Vec<Vertex> {
    let mut remaining: BTreeSet<Vertex> = metagraph.points()[1..].iter().copied().collect();
    let mut order = vec![metagraph.start()];
    let mut current = metagraph.start();
    while !remaining.is_empty() {
        let next = remaining
            .iter()
            .copied()
            .min_by_key(|&t| (metagraph.distance(current, t), t))
            .expect("remaining set is non-empty");
        remaining.remove(&next);
        order.push(next);
        current = next;
    }
    order
}

/// Total metagraph cost of a visiting order.
pub fn order_cost(metagraph: &Metagraph, order: &[Vertex]) -> u32 {
    order.windows(2).map(|pair| metagraph.distance(pair[0], pair[1])).sum()
}

/// Concatenates the stored per-edge move sequences along a visiting order
/// into one executable plan.
pub fn order_moves(metagraph: &Metagraph, order: &[Vertex]) -> Vec<Move> {
    let mut moves = Vec::new();
    for pair in order.windows(2) {
        moves.extend_from_slice(metagraph.moves_between(pair[0], pair[1]));
    }
    moves
}
