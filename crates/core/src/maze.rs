//! Weighted grid-graph representation of a maze.
//! This module exists so every planning routine reads adjacency through one
//! owner with deterministic iteration order.
//! It does not own traversal or planning policy.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::types::{Move, PlanError, Vertex};

/// Undirected weighted adjacency over the cells of a `width * height` grid.
/// Weights are positive; the absence of an entry means a wall between two
/// otherwise adjacent cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    adjacency: Vec<BTreeMap<Vertex, u32>>,
}

impl Maze {
    /// A maze with every passage walled off. Edges are added afterwards.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "maze dimensions must be positive");
        Self { width, height, adjacency: vec![BTreeMap::new(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn vertex_at(&self, x: usize, y: usize) -> Vertex {
        debug_assert!(x < self.width && y < self.height);
        Vertex((y * self.width + x) as u32)
    }

    pub fn coords(&self, v: Vertex) -> (usize, usize) {
        let index = v.0 as usize;
        (index % self.width, index / self.width)
    }

    pub fn contains(&self, v: Vertex) -> bool {
        (v.0 as usize) < self.adjacency.len()
    }

    /// Opens the passage between two adjacent cells, overwriting any
    /// previous weight. Symmetric by construction.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex, weight: u32) {
        debug_assert!(weight > 0, "edge weights must be positive");
        debug_assert!(self.move_between(u, v).is_ok(), "edges connect adjacent cells only");
        self.adjacency[u.0 as usize].insert(v, weight);
        self.adjacency[v.0 as usize].insert(u, weight);
    }

    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        self.adjacency[u.0 as usize].remove(&v);
        self.adjacency[v.0 as usize].remove(&u);
    }

    pub fn weight(&self, u: Vertex, v: Vertex) -> Option<u32> {
        self.adjacency[u.0 as usize].get(&v).copied()
    }

    pub fn neighbors(&self, v: Vertex) -> impl Iterator<Item = (Vertex, u32)> + '_ {
        self.adjacency[v.0 as usize].iter().map(|(&n, &w)| (n, w))
    }

    pub fn degree(&self, v: Vertex) -> usize {
        self.adjacency[v.0 as usize].len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.adjacency.len()).map(|i| Vertex(i as u32))
    }

    /// The in-bounds grid cells bordering `v`, whether or not a passage is
    /// open. Order: north, west, east, south (ascending vertex id).
    pub fn adjacent_cells(&self, v: Vertex) -> Vec<Vertex> {
        let (x, y) = self.coords(v);
        let mut cells = Vec::with_capacity(4);
        if y > 0 {
            cells.push(self.vertex_at(x, y - 1));
        }
        if x > 0 {
            cells.push(self.vertex_at(x - 1, y));
        }
        if x + 1 < self.width {
            cells.push(self.vertex_at(x + 1, y));
        }
        if y + 1 < self.height {
            cells.push(self.vertex_at(x, y + 1));
        }
        cells
    }

    /// Translates a pair of adjacent cells into the move taking an agent
    /// from `u` to `v`. North points towards row zero.
    pub fn move_between(&self, u: Vertex, v: Vertex) -> Result<Move, PlanError> {
        let (ux, uy) = self.coords(u);
        let (vx, vy) = self.coords(v);
        if ux == vx && vy + 1 == uy {
            Ok(Move::North)
        } else if ux == vx && uy + 1 == vy {
            Ok(Move::South)
        } else if uy == vy && ux + 1 == vx {
            Ok(Move::East)
        } else if uy == vy && vx + 1 == ux {
            Ok(Move::West)
        } else {
            Err(PlanError::NotAdjacent(u, v))
        }
    }

    /// The cell an agent lands on when executing `m` from `v`, or `None`
    /// when a wall or the maze boundary blocks the move.
    pub fn step(&self, v: Vertex, m: Move) -> Option<Vertex> {
        let (x, y) = self.coords(v);
        let destination = match m {
            Move::North if y > 0 => self.vertex_at(x, y - 1),
            Move::South if y + 1 < self.height => self.vertex_at(x, y + 1),
            Move::East if x + 1 < self.width => self.vertex_at(x + 1, y),
            Move::West if x > 0 => self.vertex_at(x - 1, y),
            _ => return None,
        };
        self.weight(v, destination).map(|_| destination)
    }

    /// Stable hash over dimensions and edges, for match records and
    /// determinism checks.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.width as u64);
        hasher.write_u64(self.height as u64);
        for v in self.vertices() {
            for (n, w) in self.neighbors(v) {
                if n > v {
                    hasher.write_u32(v.0);
                    hasher.write_u32(n.0);
                    hasher.write_u32(w);
                }
            }
        }
        hasher.finish()
    }

    /// A copy of the maze with dead-end cells walled off, repeated until no
    /// dead end remains. Cells in `keep` (targets, agent positions) are
    /// never removed, so shortest paths between kept cells are preserved.
    pub fn pruned(&self, keep: &BTreeSet<Vertex>) -> Maze {
        let mut maze = self.clone();
        loop {
            let dead_ends: Vec<Vertex> = maze
                .vertices()
                .filter(|v| maze.degree(*v) == 1 && !keep.contains(v))
                .collect();
            if dead_ends.is_empty() {
                return maze;
            }
            for dead_end in dead_ends {
                let exit = maze.neighbors(dead_end).next().map(|(exit, _)| exit);
                if let Some(exit) = exit {
                    maze.remove_edge(dead_end, exit);
                }
            }
        }
    }
}
