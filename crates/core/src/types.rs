use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one maze cell. Cells of a `width * height` grid are
/// numbered row-major, so the cell at `(x, y)` is `y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vertex(pub u32);

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One step between two adjacent maze cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Move {
    North,
    South,
    East,
    West,
}

impl Move {
    /// The move that undoes this one. Walking a move sequence backwards
    /// requires both reversing the order and inverting each label.
    pub fn opposite(self) -> Move {
        match self {
            Move::North => Move::South,
            Move::South => Move::North,
            Move::East => Move::West,
            Move::West => Move::East,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// A planning call received an empty target set.
    NoTargets,
    /// No candidate target is reachable from the agent's position.
    NoReachableTarget,
    /// Route reconstruction was asked for a vertex the traversal never
    /// explored, meaning it is disconnected from the source.
    UnreachableVertex(Vertex),
    /// A pair of points of interest has no connecting path, so no full
    /// tour over the metagraph exists.
    DisconnectedTargets(Vertex, Vertex),
    /// Move translation was asked for a vertex pair that is not adjacent
    /// in the grid.
    NotAdjacent(Vertex, Vertex),
    /// Replanning produced an empty move list; the caller asked for a move
    /// while already standing on its only destination.
    ExhaustedPlan,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::NoTargets => write!(f, "planning requires at least one target"),
            PlanError::NoReachableTarget => {
                write!(f, "no target is reachable from the agent position")
            }
            PlanError::UnreachableVertex(v) => {
                write!(f, "{v} was not reached by the traversal")
            }
            PlanError::DisconnectedTargets(a, b) => {
                write!(f, "no path connects points of interest {a} and {b}")
            }
            PlanError::NotAdjacent(a, b) => {
                write!(f, "{a} and {b} are not adjacent grid cells")
            }
            PlanError::ExhaustedPlan => write!(f, "replanning produced an empty plan"),
        }
    }
}

impl std::error::Error for PlanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for m in [Move::North, Move::South, Move::East, Move::West] {
            assert_eq!(m.opposite().opposite(), m);
            assert_ne!(m.opposite(), m);
        }
    }
}
