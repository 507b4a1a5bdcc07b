//! Route reconstruction from a traversal routing table.
//! This module exists to keep predecessor-walking and move translation out
//! of the search loop. It does not own exploration order.

use std::collections::BTreeMap;

use crate::maze::Maze;
use crate::types::{Move, PlanError, Vertex};

/// Walks predecessors from `target` back to `source` and returns the
/// ordered vertex sequence, both endpoints included. Fails with
/// [`PlanError::UnreachableVertex`] when the traversal never reached
/// `target`. The routing table's acyclicity guarantees termination.
pub fn find_route(
    routing: &BTreeMap<Vertex, Option<Vertex>>,
    source: Vertex,
    target: Vertex,
) -> Result<Vec<Vertex>, PlanError> {
    let mut route = vec![target];
    let mut current = target;
    while current != source {
        match routing.get(&current) {
            Some(Some(predecessor)) => {
                current = *predecessor;
                route.push(current);
            }
            // A `None` predecessor marks the traversal source, which is not
            // the requested one; either way the target is unreachable.
            Some(None) | None => return Err(PlanError::UnreachableVertex(target)),
        }
    }
    route.reverse();
    Ok(route)
}

/// Translates a vertex route into the move labels an agent executes.
pub fn route_moves(maze: &Maze, route: &[Vertex]) -> Result<Vec<Move>, PlanError> {
    route.windows(2).map(|pair| maze.move_between(pair[0], pair[1])).collect()
}

/// The move sequence realizing the same path in the opposite direction:
/// reversed order, each label inverted.
pub fn reversed_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.opposite()).collect()
}
