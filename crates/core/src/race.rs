//! Adversarial target allocation for a two-agent race.
//! This module exists to decide which target is worth committing to when a
//! rival is closer to some of them. It does not own plan consumption or
//! per-turn execution.
//!
//! The rival is modeled as a greedy agent that always pursues its nearest
//! remaining target. That is a heuristic, not a guarantee about the real
//! rival; only the allocator's own termination and output validity are
//! asserted.

use std::collections::BTreeSet;

use crate::maze::Maze;
use crate::route::{find_route, route_moves};
use crate::search::{NearestTarget, nearest_target};
use crate::types::{Move, PlanError, Vertex};

/// A target the planning agent commits to, with the route realizing it.
#[derive(Clone, Debug)]
pub struct Commitment {
    pub target: Vertex,
    pub route: Vec<Vertex>,
    pub moves: Vec<Move>,
    pub distance: u32,
}

/// Picks the target the agent should commit to, pessimistically ceding to
/// the rival every target the rival is estimated to reach first.
///
/// With no rival, a co-located rival, or a rival cut off from every
/// target, this reduces to plain nearest-target planning. Otherwise:
/// while the rival's cumulative greedy distance is at most ours and more
/// than one candidate remains, the rival's nearest target is removed from
/// the candidate set and the rival continues from it; our own commitment
/// is recomputed only when the rival claimed the very target we wanted.
pub fn allocate(
    maze: &Maze,
    my_position: Vertex,
    rival_position: Option<Vertex>,
    targets: &BTreeSet<Vertex>,
) -> Result<Commitment, PlanError> {
    if targets.is_empty() {
        return Err(PlanError::NoTargets);
    }

    let mut candidates = targets.clone();
    let mut mine =
        nearest_target(maze, my_position, &candidates).ok_or(PlanError::NoReachableTarget)?;

    let rival_position = match rival_position {
        Some(position) if position != my_position => position,
        _ => return commit(maze, my_position, &mine),
    };
    let Some(mut rival) = nearest_target(maze, rival_position, &candidates) else {
        return commit(maze, my_position, &mine);
    };
    let mut rival_total = rival.distance;

    while rival_total <= mine.distance && candidates.len() > 1 {
        let claimed = rival.target;
        candidates = without(&candidates, claimed);
        if mine.target == claimed {
            mine = nearest_target(maze, my_position, &candidates)
                .ok_or(PlanError::NoReachableTarget)?;
        }
        match nearest_target(maze, claimed, &candidates) {
            Some(next) => {
                rival_total += next.distance;
                rival = next;
            }
            // The rival cannot continue; whatever remains is ours.
            None => break,
        }
    }

    commit(maze, my_position, &mine)
}

fn commit(maze: &Maze, position: Vertex, found: &NearestTarget) -> Result<Commitment, PlanError> {
    let route = find_route(&found.traversal.routing, position, found.target)?;
    let moves = route_moves(maze, &route)?;
    Ok(Commitment { target: found.target, route, moves, distance: found.distance })
}

fn without(set: &BTreeSet<Vertex>, removed: Vertex) -> BTreeSet<Vertex> {
    set.iter().copied().filter(|&v| v != removed).collect()
}
