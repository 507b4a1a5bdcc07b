//! Shared maze fixtures for the unit-test suites.
//! This module exists to avoid repeating grid setup across many tests.
//! It does not own production planning logic.

use crate::maze::Maze;
use crate::types::Vertex;

/// A fully open `width * height` grid, every passage weight 1.
pub(crate) fn open_grid(width: usize, height: usize) -> Maze {
    let mut maze = Maze::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = maze.vertex_at(x, y);
            if x + 1 < width {
                maze.add_edge(v, maze.vertex_at(x + 1, y), 1);
            }
            if y + 1 < height {
                maze.add_edge(v, maze.vertex_at(x, y + 1), 1);
            }
        }
    }
    maze
}

/// A `length * 1` corridor of unit passages.
pub(crate) fn corridor(length: usize) -> Maze {
    let mut maze = Maze::new(length, 1);
    for x in 0..length - 1 {
        maze.add_edge(maze.vertex_at(x, 0), maze.vertex_at(x + 1, 0), 1);
    }
    maze
}

/// A 4x2 maze where the straight top lane crosses mud (weight 9) while a
/// clean detour runs through the bottom row:
///
/// ```text
/// (0,0) -1- (1,0) -9- (2,0) -1- (3,0)
///   |1                            |1
/// (0,1) -1- (1,1) -1- (2,1) -1- (3,1)
/// ```
///
/// Weighted search from (0,0) must reach (3,0) at cost 5 via the detour;
/// breadth-first settles it at cost 11 along the lane.
pub(crate) fn mud_lane() -> Maze {
    let mut maze = Maze::new(4, 2);
    maze.add_edge(maze.vertex_at(0, 0), maze.vertex_at(1, 0), 1);
    maze.add_edge(maze.vertex_at(1, 0), maze.vertex_at(2, 0), 9);
    maze.add_edge(maze.vertex_at(2, 0), maze.vertex_at(3, 0), 1);
    maze.add_edge(maze.vertex_at(0, 1), maze.vertex_at(1, 1), 1);
    maze.add_edge(maze.vertex_at(1, 1), maze.vertex_at(2, 1), 1);
    maze.add_edge(maze.vertex_at(2, 1), maze.vertex_at(3, 1), 1);
    maze.add_edge(maze.vertex_at(0, 0), maze.vertex_at(0, 1), 1);
    maze.add_edge(maze.vertex_at(3, 0), maze.vertex_at(3, 1), 1);
    maze
}

/// A 5x1 corridor whose last passage is muddy, with a target at each end
/// of the corridor from the center: the west target costs 2, the east one
/// 6. Returns `(maze, source, near_target, far_target)`.
pub(crate) fn split_corridors() -> (Maze, Vertex, Vertex, Vertex) {
    let mut maze = corridor(5);
    maze.add_edge(maze.vertex_at(3, 0), maze.vertex_at(4, 0), 5);
    let (source, near, far) = (maze.vertex_at(2, 0), maze.vertex_at(0, 0), maze.vertex_at(4, 0));
    (maze, source, near, far)
}
