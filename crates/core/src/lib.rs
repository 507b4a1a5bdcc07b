pub mod maze;
pub mod mazegen;
pub mod metagraph;
pub mod planner;
pub mod race;
pub mod route;
pub mod search;
pub mod tour;
pub mod types;

#[cfg(test)]
mod test_support;

pub use maze::Maze;
pub use mazegen::{MazeConfig, generate};
pub use metagraph::Metagraph;
pub use planner::{MatchView, Planner, Strategy};
pub use race::{Commitment, allocate};
pub use types::{Move, PlanError, Vertex};
