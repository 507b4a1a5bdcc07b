//! Per-agent planning context and plan consumption.
//! This module exists so a solved plan survives between decision steps in
//! an explicit context object instead of global state.
//! It does not own the match loop or turn timing.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::maze::Maze;
use crate::metagraph::Metagraph;
use crate::race::allocate;
use crate::route::{find_route, route_moves};
use crate::search::nearest_target;
use crate::tour::{HELD_KARP_MAX_TARGETS, greedy_order, order_moves, solve_tour};
use crate::types::{Move, PlanError, Vertex};

/// How an agent decides where to go next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Commit to the closest target, ignoring everything else.
    NearestTarget,
    /// Order all targets optimally up front (greedy ordering beyond
    /// [`HELD_KARP_MAX_TARGETS`]) and walk the whole tour.
    ExactTour,
    /// Commit to one target after ceding those a rival reaches first.
    Race,
}

/// Read-only snapshot of the match handed in by the match loop at each
/// planning or consumption call. The target set shrinks between calls as
/// agents collect targets; the maze never changes.
#[derive(Clone, Copy)]
pub struct MatchView<'a> {
    pub maze: &'a Maze,
    pub my_position: Vertex,
    pub rival_position: Option<Vertex>,
    pub targets: &'a BTreeSet<Vertex>,
}

/// One agent's private planning state: the strategy, the current plan
/// (consumed one move per decision step), and the target the plan is
/// heading for. Created once per agent and reused across the match.
#[derive(Clone, Debug)]
pub struct Planner {
    strategy: Strategy,
    plan: VecDeque<Move>,
    committed_target: Option<Vertex>,
}

impl Planner {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy, plan: VecDeque::new(), committed_target: None }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn plan_len(&self) -> usize {
        self.plan.len()
    }

    /// The first target the current plan is heading for, if any. The match
    /// loop compares this against collected targets to detect a rival
    /// invalidating the plan.
    pub fn committed_target(&self) -> Option<Vertex> {
        self.committed_target
    }

    /// Discards the current plan, forcing a replan on the next move.
    pub fn invalidate(&mut self) {
        self.plan.clear();
        self.committed_target = None;
    }

    /// Builds a fresh plan for the strategy from the current match state.
    pub fn replan(&mut self, view: &MatchView) -> Result<(), PlanError> {
        self.invalidate();
        match self.strategy {
            Strategy::NearestTarget => {
                if view.targets.is_empty() {
                    return Err(PlanError::NoTargets);
                }
                let found = nearest_target(view.maze, view.my_position, view.targets)
                    .ok_or(PlanError::NoReachableTarget)?;
                let route = find_route(&found.traversal.routing, view.my_position, found.target)?;
                self.plan = route_moves(view.maze, &route)?.into();
                self.committed_target = Some(found.target);
            }
            Strategy::ExactTour => {
                let metagraph = Metagraph::build(view.maze, view.my_position, view.targets)?;
                let order = if metagraph.target_count() <= HELD_KARP_MAX_TARGETS {
                    solve_tour(&metagraph)?
                } else {
                    greedy_order(&metagraph)
                };
                self.plan = order_moves(&metagraph, &order).into();
                self.committed_target = order.get(1).copied();
            }
            Strategy::Race => {
                let commitment =
                    allocate(view.maze, view.my_position, view.rival_position, view.targets)?;
                self.plan = commitment.moves.into();
                self.committed_target = Some(commitment.target);
            }
        }
        Ok(())
    }

    /// Pops the next move of the plan, replanning first when the plan is
    /// exhausted. A successful replan that still yields no move means the
    /// caller asked while standing on its own committed target.
    pub fn next_move(&mut self, view: &MatchView) -> Result<Move, PlanError> {
        if self.plan.is_empty() {
            self.replan(view)?;
        }
        self.plan.pop_front().ok_or(PlanError::ExhaustedPlan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{corridor, open_grid};

    fn walk_until_all_collected(
        maze: &Maze,
        planner: &mut Planner,
        mut position: Vertex,
        rival_position: Option<Vertex>,
        mut targets: BTreeSet<Vertex>,
        step_budget: usize,
    ) -> (Vertex, usize) {
        let mut steps = 0;
        while !targets.is_empty() {
            assert!(steps < step_budget, "agent failed to collect targets in budget");
            let view = MatchView { maze, my_position: position, rival_position, targets: &targets };
            let m = planner.next_move(&view).expect("plannable state");
            position = maze.step(position, m).expect("plan moves follow open passages");
            targets.remove(&position);
            steps += 1;
        }
        (position, steps)
    }

    #[test]
    fn nearest_strategy_walks_to_the_closest_target_first() {
        let maze = corridor(7);
        let targets: BTreeSet<Vertex> = [maze.vertex_at(2, 0), maze.vertex_at(6, 0)].into();
        let mut planner = Planner::new(Strategy::NearestTarget);

        let view = MatchView {
            maze: &maze,
            my_position: maze.vertex_at(0, 0),
            rival_position: None,
            targets: &targets,
        };
        let first = planner.next_move(&view).expect("plannable");
        assert_eq!(first, Move::East);
        assert_eq!(planner.committed_target(), Some(maze.vertex_at(2, 0)));
        assert_eq!(planner.plan_len(), 1);
    }

    #[test]
    fn plan_exhaustion_triggers_a_replan_towards_the_next_target() {
        let maze = corridor(5);
        let targets: BTreeSet<Vertex> = [maze.vertex_at(1, 0), maze.vertex_at(4, 0)].into();
        let mut planner = Planner::new(Strategy::NearestTarget);

        let (position, steps) = walk_until_all_collected(
            &maze,
            &mut planner,
            maze.vertex_at(0, 0),
            None,
            targets,
            16,
        );
        assert_eq!(position, maze.vertex_at(4, 0));
        assert_eq!(steps, 4);
    }

    #[test]
    fn exact_tour_collects_every_target_in_one_plan() {
        let maze = open_grid(5, 5);
        let targets: BTreeSet<Vertex> =
            [maze.vertex_at(4, 0), maze.vertex_at(0, 4), maze.vertex_at(4, 4), maze.vertex_at(2, 2)]
                .into();
        let mut planner = Planner::new(Strategy::ExactTour);

        let view = MatchView {
            maze: &maze,
            my_position: maze.vertex_at(0, 0),
            rival_position: None,
            targets: &targets,
        };
        planner.replan(&view).expect("connected grid");
        let planned_len = planner.plan_len();

        let (_, steps) = walk_until_all_collected(
            &maze,
            &mut planner,
            maze.vertex_at(0, 0),
            None,
            targets,
            64,
        );
        // An earlier tour leg may already pass through a later target, so
        // collection can finish before the plan is fully consumed.
        assert!(steps <= planned_len, "one preprocessing plan covers the whole tour");
    }

    #[test]
    fn race_strategy_replans_after_invalidation() {
        let maze = corridor(7);
        let mut targets: BTreeSet<Vertex> = [maze.vertex_at(4, 0), maze.vertex_at(6, 0)].into();
        let mut planner = Planner::new(Strategy::Race);

        let view = MatchView {
            maze: &maze,
            my_position: maze.vertex_at(0, 0),
            rival_position: Some(maze.vertex_at(5, 0)),
            targets: &targets,
        };
        planner.replan(&view).expect("plannable");
        // The rival is ceded the contested target at 4.
        assert_eq!(planner.committed_target(), Some(maze.vertex_at(6, 0)));

        // The rival then collects 6 instead; the match loop invalidates.
        targets.remove(&maze.vertex_at(6, 0));
        planner.invalidate();
        assert_eq!(planner.plan_len(), 0);
        assert_eq!(planner.committed_target(), None);

        let view = MatchView {
            maze: &maze,
            my_position: maze.vertex_at(0, 0),
            rival_position: Some(maze.vertex_at(6, 0)),
            targets: &targets,
        };
        let m = planner.next_move(&view).expect("replans towards the remaining target");
        assert_eq!(m, Move::East);
        assert_eq!(planner.committed_target(), Some(maze.vertex_at(4, 0)));
    }

    #[test]
    fn empty_target_set_surfaces_the_precondition_error() {
        let maze = corridor(3);
        let targets = BTreeSet::new();
        for strategy in [Strategy::NearestTarget, Strategy::ExactTour, Strategy::Race] {
            let mut planner = Planner::new(strategy);
            let view = MatchView {
                maze: &maze,
                my_position: maze.vertex_at(0, 0),
                rival_position: None,
                targets: &targets,
            };
            assert_eq!(planner.next_move(&view), Err(PlanError::NoTargets));
        }
    }
}
