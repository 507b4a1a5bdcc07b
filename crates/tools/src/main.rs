//! Duel simulator: the match loop the planning core is written against.
//! Generates a maze, scatters targets, and races two planning agents
//! against each other, printing a JSON match record.

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use serde::Serialize;

use mazerace_core::{MatchView, Maze, MazeConfig, Planner, Strategy, Vertex, generate};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for maze generation and target placement
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 15)]
    width: usize,

    #[arg(long, default_value_t = 11)]
    height: usize,

    /// Number of targets scattered over the maze
    #[arg(short, long, default_value_t = 8)]
    targets: usize,

    /// Chance (0-100) that a wall not needed for connectivity stays closed
    #[arg(long, default_value_t = 60)]
    wall_percentage: u8,

    /// Chance (0-100) that an open passage is muddy
    #[arg(long, default_value_t = 20)]
    mud_percentage: u8,

    /// Strategy of agent A: nearest | tour | race
    #[arg(long, default_value = "race")]
    agent_a: String,

    /// Strategy of agent B: nearest | tour | race
    #[arg(long, default_value = "nearest")]
    agent_b: String,

    /// Abort the match after this many turns
    #[arg(long, default_value_t = 100_000)]
    turn_cap: u64,

    /// Wall off dead-end corridors before handing the maze to the planners
    #[arg(long)]
    prune_dead_ends: bool,
}

#[derive(Serialize)]
struct MatchRecord {
    seed: u64,
    maze_fingerprint: u64,
    targets: usize,
    turns: u64,
    agent_a: AgentRecord,
    agent_b: AgentRecord,
    winner: String,
}

#[derive(Serialize)]
struct AgentRecord {
    strategy: Strategy,
    score: usize,
}

struct Agent {
    planner: Planner,
    position: Vertex,
    /// Turns left crossing a muddy passage; the agent is stuck meanwhile.
    mud_timer: u32,
    mud_exit: Option<Vertex>,
    score: usize,
}

impl Agent {
    fn new(strategy: Strategy, position: Vertex) -> Self {
        Self { planner: Planner::new(strategy), position, mud_timer: 0, mud_exit: None, score: 0 }
    }

    /// Advances the agent by one turn. Returns the cell it arrived on this
    /// turn, if any.
    fn take_turn(
        &mut self,
        maze: &Maze,
        rival_position: Vertex,
        targets: &BTreeSet<Vertex>,
    ) -> Result<Option<Vertex>> {
        if self.mud_timer > 0 {
            self.mud_timer -= 1;
            if self.mud_timer == 0 {
                self.position = self.mud_exit.take().context("mud crossing has a destination")?;
                return Ok(Some(self.position));
            }
            return Ok(None);
        }

        let view = MatchView {
            maze,
            my_position: self.position,
            rival_position: Some(rival_position),
            targets,
        };
        let chosen = self.planner.next_move(&view).context("planning failed mid-match")?;
        let destination = maze
            .step(self.position, chosen)
            .context("planner emitted a move into a wall")?;
        let weight = maze.weight(self.position, destination).context("open passage has a weight")?;
        if weight == 1 {
            self.position = destination;
            Ok(Some(destination))
        } else {
            self.mud_exit = Some(destination);
            self.mud_timer = weight - 1;
            Ok(None)
        }
    }
}

fn parse_strategy(name: &str) -> Result<Strategy> {
    match name {
        "nearest" => Ok(Strategy::NearestTarget),
        "tour" => Ok(Strategy::ExactTour),
        "race" => Ok(Strategy::Race),
        other => bail!("unknown strategy {other:?}; expected nearest, tour or race"),
    }
}

fn scatter_targets(
    rng: &mut ChaCha8Rng,
    maze: &Maze,
    count: usize,
    occupied: &[Vertex],
) -> Result<BTreeSet<Vertex>> {
    ensure!(
        count + occupied.len() <= maze.vertex_count(),
        "not enough cells for {count} targets on a {}x{} maze",
        maze.width(),
        maze.height()
    );
    let cells = maze.vertex_count() as u64;
    let mut targets = BTreeSet::new();
    while targets.len() < count {
        let cell = Vertex((rng.next_u64() % cells) as u32);
        if !occupied.contains(&cell) {
            targets.insert(cell);
        }
    }
    Ok(targets)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = MazeConfig {
        width: args.width,
        height: args.height,
        wall_percentage: args.wall_percentage,
        mud_percentage: args.mud_percentage,
        ..MazeConfig::default()
    };
    let mut maze = generate(args.seed, &config);

    let a_start = maze.vertex_at(0, 0);
    let b_start = maze.vertex_at(maze.width() - 1, maze.height() - 1);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut targets = scatter_targets(&mut rng, &maze, args.targets, &[a_start, b_start])?;
    let placed = targets.len();

    if args.prune_dead_ends {
        let mut keep = targets.clone();
        keep.insert(a_start);
        keep.insert(b_start);
        maze = maze.pruned(&keep);
    }

    let mut agent_a = Agent::new(parse_strategy(&args.agent_a)?, a_start);
    let mut agent_b = Agent::new(parse_strategy(&args.agent_b)?, b_start);

    let mut turns = 0;
    while !targets.is_empty() && turns < args.turn_cap {
        turns += 1;

        if let Some(arrived) = agent_a.take_turn(&maze, agent_b.position, &targets)? {
            collect(arrived, &mut targets, &mut agent_a, &mut agent_b);
        }
        if targets.is_empty() {
            break;
        }
        if let Some(arrived) = agent_b.take_turn(&maze, agent_a.position, &targets)? {
            collect(arrived, &mut targets, &mut agent_b, &mut agent_a);
        }
    }

    let winner = match agent_a.score.cmp(&agent_b.score) {
        std::cmp::Ordering::Greater => "a",
        std::cmp::Ordering::Less => "b",
        std::cmp::Ordering::Equal => "draw",
    };
    let record = MatchRecord {
        seed: args.seed,
        maze_fingerprint: maze.fingerprint(),
        targets: placed,
        turns,
        agent_a: AgentRecord { strategy: agent_a.planner.strategy(), score: agent_a.score },
        agent_b: AgentRecord { strategy: agent_b.planner.strategy(), score: agent_b.score },
        winner: winner.to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&record).context("serializing match record")?);
    Ok(())
}

fn collect(arrived: Vertex, targets: &mut BTreeSet<Vertex>, collector: &mut Agent, other: &mut Agent) {
    if targets.remove(&arrived) {
        collector.score += 1;
        collector.planner.invalidate();
        if other.planner.committed_target() == Some(arrived) {
            other.planner.invalidate();
        }
    }
}
