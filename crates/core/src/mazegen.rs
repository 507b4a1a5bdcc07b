//! Deterministic random maze generation.
//! This module exists so tests and the duel simulator get realistic,
//! reproducible mazes from a seed. It does not own planning logic.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::maze::Maze;
use crate::types::Vertex;

/// Shape and texture of a generated maze. Percentages are integers in
/// `0..=100`; mud weights are drawn uniformly from `mud_range`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    /// Chance that a wall not needed for connectivity stays closed.
    pub wall_percentage: u8,
    /// Chance that an open passage is muddy (weight drawn from
    /// `mud_range` instead of 1).
    pub mud_percentage: u8,
    pub mud_range: (u32, u32),
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self { width: 15, height: 11, wall_percentage: 60, mud_percentage: 20, mud_range: (2, 9) }
    }
}

/// Generates a connected maze: a randomized depth-first spanning tree
/// guarantees every cell is reachable, then extra passages open and mud is
/// laid according to the config. Equal seed and config reproduce the maze
/// exactly.
pub fn generate(seed: u64, config: &MazeConfig) -> Maze {
    debug_assert!(config.wall_percentage <= 100 && config.mud_percentage <= 100);
    debug_assert!(0 < config.mud_range.0 && config.mud_range.0 <= config.mud_range.1);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut maze = Maze::new(config.width, config.height);

    carve_spanning_tree(&mut maze, &mut rng);
    open_extra_passages(&mut maze, &mut rng, config.wall_percentage);
    lay_mud(&mut maze, &mut rng, config.mud_percentage, config.mud_range);
    maze
}

fn carve_spanning_tree(maze: &mut Maze, rng: &mut ChaCha8Rng) {
    let mut visited = vec![false; maze.vertex_count()];
    let start = maze.vertex_at(0, 0);
    visited[start.0 as usize] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited: Vec<Vertex> = maze
            .adjacent_cells(current)
            .into_iter()
            .filter(|cell| !visited[cell.0 as usize])
            .collect();
        match unvisited.len() {
            0 => {
                stack.pop();
            }
            count => {
                let next = unvisited[pick_index(rng, count)];
                visited[next.0 as usize] = true;
                maze.add_edge(current, next, 1);
                stack.push(next);
            }
        }
    }
}

fn open_extra_passages(maze: &mut Maze, rng: &mut ChaCha8Rng, wall_percentage: u8) {
    for (u, v) in closed_walls(maze) {
        if percent_roll(rng) >= wall_percentage {
            maze.add_edge(u, v, 1);
        }
    }
}

fn lay_mud(maze: &mut Maze, rng: &mut ChaCha8Rng, mud_percentage: u8, mud_range: (u32, u32)) {
    for (u, v) in open_passages(maze) {
        if percent_roll(rng) < mud_percentage {
            let span = mud_range.1 - mud_range.0 + 1;
            let weight = mud_range.0 + (rng.next_u64() % span as u64) as u32;
            maze.add_edge(u, v, weight);
        }
    }
}

/// Adjacent cell pairs with no passage between them, each pair once, in
/// ascending order so the rng stream is consumed deterministically.
fn closed_walls(maze: &Maze) -> Vec<(Vertex, Vertex)> {
    maze.vertices()
        .flat_map(|v| {
            maze.adjacent_cells(v)
                .into_iter()
                .filter(move |&c| c > v)
                .map(move |c| (v, c))
                .collect::<Vec<_>>()
        })
        .filter(|&(u, v)| maze.weight(u, v).is_none())
        .collect()
}

fn open_passages(maze: &Maze) -> Vec<(Vertex, Vertex)> {
    maze.vertices()
        .flat_map(|v| maze.neighbors(v).filter(move |&(n, _)| n > v).map(move |(n, _)| (v, n)).collect::<Vec<_>>())
        .collect()
}

fn pick_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    (rng.next_u64() % len as u64) as usize
}

fn percent_roll(rng: &mut ChaCha8Rng) -> u8 {
    (rng.next_u64() % 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::bfs;

    #[test]
    fn equal_seeds_reproduce_the_maze_exactly() {
        let config = MazeConfig::default();
        let first = generate(77, &config);
        let second = generate(77, &config);
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_ne!(first.fingerprint(), generate(78, &config).fingerprint());
    }

    #[test]
    fn every_cell_is_reachable_regardless_of_wall_density() {
        for wall_percentage in [0, 60, 100] {
            let config = MazeConfig { wall_percentage, ..MazeConfig::default() };
            let maze = generate(5, &config);
            let traversal = bfs(&maze, maze.vertex_at(0, 0));
            assert_eq!(
                traversal.distance.len(),
                maze.vertex_count(),
                "spanning tree must keep the maze connected at wall density {wall_percentage}"
            );
        }
    }

    #[test]
    fn full_wall_density_leaves_only_the_spanning_tree() {
        let config =
            MazeConfig { wall_percentage: 100, mud_percentage: 0, ..MazeConfig::default() };
        let maze = generate(11, &config);
        let edge_count: usize = maze.vertices().map(|v| maze.degree(v)).sum::<usize>() / 2;
        assert_eq!(edge_count, maze.vertex_count() - 1);
    }

    #[test]
    fn zero_wall_density_opens_every_passage() {
        let config =
            MazeConfig { width: 4, height: 3, wall_percentage: 0, mud_percentage: 0, mud_range: (2, 2) };
        let maze = generate(3, &config);
        let edge_count: usize = maze.vertices().map(|v| maze.degree(v)).sum::<usize>() / 2;
        // A w*h grid has w*(h-1) + (w-1)*h adjacent pairs.
        assert_eq!(edge_count, 4 * 2 + 3 * 3);
    }

    #[test]
    fn mud_weights_stay_inside_the_configured_range() {
        let config = MazeConfig { mud_percentage: 100, mud_range: (3, 5), ..MazeConfig::default() };
        let maze = generate(9, &config);
        let mut saw_mud = false;
        for v in maze.vertices() {
            for (_, weight) in maze.neighbors(v) {
                assert!((3..=5).contains(&weight));
                saw_mud = true;
            }
        }
        assert!(saw_mud);
    }
}
