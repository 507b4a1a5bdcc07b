//! Generic single-source traversal over the maze graph.
//! This module exists so breadth-first and weighted exploration share one
//! loop, parameterized by the frontier discipline.
//! It does not own route reconstruction or target-ordering policy.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque, btree_map::Entry};

use crate::maze::Maze;
use crate::types::Vertex;

/// Exploration order for [`traverse`]. `RELAXING` disciplines may revisit
/// an explored vertex when a shorter path to it is found; non-relaxing
/// disciplines settle every vertex on first contact.
pub trait Frontier: Default {
    const RELAXING: bool;

    fn push(&mut self, vertex: Vertex, priority: u32);
    fn pop(&mut self) -> Option<(Vertex, u32)>;
}

/// First-in first-out discipline: breadth-first search. Correct for
/// uniform edge weights only.
#[derive(Default)]
pub struct FifoFrontier {
    queue: VecDeque<(Vertex, u32)>,
}

impl Frontier for FifoFrontier {
    const RELAXING: bool = false;

    fn push(&mut self, vertex: Vertex, priority: u32) {
        self.queue.push_back((vertex, priority));
    }

    fn pop(&mut self) -> Option<(Vertex, u32)> {
        self.queue.pop_front()
    }
}

/// Ascending-distance discipline: Dijkstra's algorithm. Ties break on the
/// lower vertex id, keeping exploration order deterministic.
#[derive(Default)]
pub struct MinHeapFrontier {
    heap: BinaryHeap<Reverse<(u32, Vertex)>>,
}

impl Frontier for MinHeapFrontier {
    const RELAXING: bool = true;

    fn push(&mut self, vertex: Vertex, priority: u32) {
        self.heap.push(Reverse((priority, vertex)));
    }

    fn pop(&mut self) -> Option<(Vertex, u32)> {
        self.heap.pop().map(|Reverse((priority, vertex))| (vertex, priority))
    }
}

/// Output of a traversal: accumulated path cost and predecessor for every
/// vertex reachable from the source. Unreachable vertices appear in
/// neither map; the source maps to cost zero and predecessor `None`.
/// Following `routing` from any explored vertex reaches the source.
#[derive(Clone, Debug)]
pub struct Traversal {
    pub distance: BTreeMap<Vertex, u32>,
    pub routing: BTreeMap<Vertex, Option<Vertex>>,
}

pub fn traverse<F: Frontier>(maze: &Maze, source: Vertex) -> Traversal {
    let mut distance = BTreeMap::new();
    let mut routing = BTreeMap::new();
    distance.insert(source, 0_u32);
    routing.insert(source, None);

    let mut frontier = F::default();
    frontier.push(source, 0);

    while let Some((current, priority)) = frontier.pop() {
        let current_distance =
            *distance.get(&current).expect("popped vertex has a recorded distance");
        if F::RELAXING && priority > current_distance {
            // Stale entry superseded by a later relaxation.
            continue;
        }
        explore_neighbors::<F>(maze, current, current_distance, &mut distance, &mut routing, &mut frontier);
    }

    Traversal { distance, routing }
}

fn explore_neighbors<F: Frontier>(
    maze: &Maze,
    current: Vertex,
    current_distance: u32,
    distance: &mut BTreeMap<Vertex, u32>,
    routing: &mut BTreeMap<Vertex, Option<Vertex>>,
    frontier: &mut F,
) {
    for (neighbor, weight) in maze.neighbors(current) {
        let candidate = current_distance + weight;
        match distance.entry(neighbor) {
            Entry::Vacant(entry) => {
                entry.insert(candidate);
                routing.insert(neighbor, Some(current));
                frontier.push(neighbor, candidate);
            }
            Entry::Occupied(mut entry) => {
                if F::RELAXING && candidate < *entry.get() {
                    entry.insert(candidate);
                    routing.insert(neighbor, Some(current));
                    frontier.push(neighbor, candidate);
                }
            }
        }
    }
}

/// Unweighted exploration. Distances count edges.
pub fn bfs(maze: &Maze, source: Vertex) -> Traversal {
    traverse::<FifoFrontier>(maze, source)
}

/// Weighted exploration. Distances accumulate edge weights.
pub fn dijkstra(maze: &Maze, source: Vertex) -> Traversal {
    traverse::<MinHeapFrontier>(maze, source)
}

/// The closest member of `targets`, found by weighted exploration.
#[derive(Clone, Debug)]
pub struct NearestTarget {
    pub target: Vertex,
    pub distance: u32,
    /// Partial traversal, sufficient to reconstruct the route to `target`.
    pub traversal: Traversal,
}

/// Dijkstra with an early exit: stops at the first target leaving the
/// frontier, which the heap invariant guarantees is the nearest one.
/// Equidistant targets resolve to the lower vertex id. Returns `None`
/// when no target is reachable from `source`.
pub fn nearest_target(
    maze: &Maze,
    source: Vertex,
    targets: &BTreeSet<Vertex>,
) -> Option<NearestTarget> {
    let mut distance = BTreeMap::new();
    let mut routing = BTreeMap::new();
    distance.insert(source, 0_u32);
    routing.insert(source, None);

    let mut frontier = MinHeapFrontier::default();
    frontier.push(source, 0);

    while let Some((current, priority)) = frontier.pop() {
        let current_distance =
            *distance.get(&current).expect("popped vertex has a recorded distance");
        if priority > current_distance {
            continue;
        }
        if targets.contains(&current) {
            return Some(NearestTarget {
                target: current,
                distance: current_distance,
                traversal: Traversal { distance, routing },
            });
        }
        explore_neighbors::<MinHeapFrontier>(
            maze,
            current,
            current_distance,
            &mut distance,
            &mut routing,
            &mut frontier,
        );
    }

    None
}
