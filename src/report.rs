use chrono::{DateTime, Utc};
use serde::Serialize;

use curio_maze::{Maze, Vec2};

/// End-of-run summary, printed as JSON so downstream tooling can consume it
/// verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub maze: String,
    pub generations: usize,
    pub population_size: usize,
    pub archive_size: usize,
    pub best_goal_distance: f64,
    /// First generation whose most novel individual finished at the goal.
    pub goal_reached_generation: Option<usize>,
    /// Fraction of open cells the final population's trajectories touched.
    pub coverage: f64,
    pub best_controller_hex: String,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fraction of a maze's open cells visited by any of the trajectories.
#[must_use]
pub fn coverage(maze: &Maze, trajectories: &[Vec<Vec2>]) -> f64 {
    let open_cells = maze.width * maze.height - maze.walls.len();
    if open_cells == 0 {
        return 0.0;
    }

    let mut visited = std::collections::HashSet::new();
    for trajectory in trajectories {
        for p in trajectory {
            let cell = (p.x.round() as i64, p.y.round() as i64);
            if !maze.is_wall(cell) && maze.in_bounds(p.x, p.y) {
                visited.insert(cell);
            }
        }
    }
    visited.len() as f64 / open_cells as f64
}
