//! Reduction of the maze to a complete graph over points of interest.
//! This module exists so tour solvers work on a handful of vertices with
//! true shortest-path edge weights instead of the full grid.
//! It does not own the ordering policy applied on top.

use std::collections::{BTreeMap, BTreeSet};

use crate::maze::Maze;
use crate::route::{find_route, reversed_moves, route_moves};
use crate::search::dijkstra;
use crate::types::{Move, PlanError, Vertex};

/// Complete graph over the agent's start vertex and every target. Each
/// ordered pair carries the shortest-path distance in the maze and the
/// full move sequence realizing it. Symmetric: `distance(a, b) ==
/// distance(b, a)` and the reverse move sequence is the inverted forward
/// one.
#[derive(Clone, Debug)]
pub struct Metagraph {
    points: Vec<Vertex>,
    distance: BTreeMap<(Vertex, Vertex), u32>,
    moves: BTreeMap<(Vertex, Vertex), Vec<Move>>,
}

impl Metagraph {
    /// Runs one weighted traversal per point of interest and records every
    /// pairwise distance and move sequence. `points[0]` is `start`, the
    /// remainder the targets in ascending vertex order. Fails fast with
    /// [`PlanError::DisconnectedTargets`] when any pair has no connecting
    /// path, so a built metagraph is always complete.
    pub fn build(maze: &Maze, start: Vertex, targets: &BTreeSet<Vertex>) -> Result<Self, PlanError> {
        if targets.is_empty() {
            return Err(PlanError::NoTargets);
        }
        let mut points = vec![start];
        points.extend(targets.iter().copied().filter(|t| *t != start));

        let mut distance = BTreeMap::new();
        let mut moves = BTreeMap::new();
        for (i, &from) in points.iter().enumerate() {
            let traversal = dijkstra(maze, from);
            for &to in &points[i + 1..] {
                let d = *traversal
                    .distance
                    .get(&to)
                    .ok_or(PlanError::DisconnectedTargets(from, to))?;
                let route = find_route(&traversal.routing, from, to)?;
                let forward = route_moves(maze, &route)?;
                distance.insert((to, from), d);
                distance.insert((from, to), d);
                moves.insert((to, from), reversed_moves(&forward));
                moves.insert((from, to), forward);
            }
        }
        Ok(Self { points, distance, moves })
    }

    /// The points of interest; index 0 is the start vertex.
    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    pub fn start(&self) -> Vertex {
        self.points[0]
    }

    pub fn target_count(&self) -> usize {
        self.points.len() - 1
    }

    pub fn distance(&self, a: Vertex, b: Vertex) -> u32 {
        if a == b {
            return 0;
        }
        *self.distance.get(&(a, b)).expect("metagraph is complete by construction")
    }

    pub fn moves_between(&self, a: Vertex, b: Vertex) -> &[Move] {
        self.moves.get(&(a, b)).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
impl Metagraph {
    /// Test-only constructor from explicit pairwise distances, for ordering
    /// tests that need edge weights no grid maze realizes.
    pub(crate) fn from_distances(points: Vec<Vertex>, pairs: &[(Vertex, Vertex, u32)]) -> Self {
        let mut distance = BTreeMap::new();
        for &(a, b, d) in pairs {
            distance.insert((a, b), d);
            distance.insert((b, a), d);
        }
        Self { points, distance, moves: BTreeMap::new() }
    }
}
