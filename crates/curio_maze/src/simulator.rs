//! Fixed-timestep robot simulation.
//!
//! Each step senses, asks the controller for two outputs in [0, 1], and
//! integrates. The output rescaling follows the original model exactly:
//! both signals are shifted by -0.5 into [-0.5, 0.5], then clamped to +/-3.0
//! (unreachable given the shift, but kept), and the angular signal is pushed
//! through a degrees->radians conversion even though it was never in
//! degrees. That yields small per-step heading changes; do not "correct" the
//! units without a reference behavior to validate against.
//!
//! There is no early exit: the episode always runs its full timestep count,
//! and the goal flag is judged only on the final position.

use std::f64::consts::{PI, TAU};
use std::sync::Arc;

use serde::Serialize;

use curio_core::behavior::{Behavior, BehaviorFn};

use crate::geometry::Vec2;
use crate::maze::Maze;
use crate::sensors::{self, NUM_INPUTS};

/// Clamp magnitude for the angular-velocity signal.
pub const MAX_ANGULAR_VEL: f64 = 3.0;
/// Clamp magnitude for the linear-velocity signal.
pub const MAX_LINEAR_VEL: f64 = 3.0;
/// A final position closer than this to the goal counts as reaching it.
pub const GOAL_RADIUS: f64 = 5.0;

/// Per-simulation options.
#[derive(Clone, Debug, Default)]
pub struct SimOptions {
    /// Episode length; defaults to the maze's `timesteps`.
    pub timesteps: Option<usize>,
    /// Starting heading in radians.
    pub initial_heading: f64,
}

/// Summary of one episode.
#[derive(Clone, Debug, Serialize)]
pub struct SimResult {
    pub final_position: Vec2,
    /// One entry per timestep plus the initial position.
    pub trajectory: Vec<Vec2>,
    /// Number of rejected moves.
    pub collisions: usize,
    pub goal_reached: bool,
    /// 1 / (1 + distance to goal). For fitness-based baselines only;
    /// novelty scoring never reads it.
    pub fitness: f64,
}

/// Runs `controller` through `maze` for a fixed number of timesteps.
///
/// The controller sees the 11-element sensor vector and must return
/// `[angular, linear]` signals in [0, 1].
pub fn simulate<C>(maze: &Maze, mut controller: C, opts: &SimOptions) -> SimResult
where
    C: FnMut(&[f64; NUM_INPUTS]) -> [f64; 2],
{
    let timesteps = opts.timesteps.unwrap_or(maze.timesteps);
    let mut position = Vec2::new(maze.start.0, maze.start.1);
    let mut heading = wrap_angle(opts.initial_heading);
    let mut trajectory = Vec::with_capacity(timesteps + 1);
    trajectory.push(position);
    let mut collisions = 0usize;

    for _ in 0..timesteps {
        let inputs = sensors::sense(maze, position, heading);
        let [angular_raw, linear_raw] = controller(&inputs);

        let angular = (angular_raw - 0.5).clamp(-MAX_ANGULAR_VEL, MAX_ANGULAR_VEL);
        let linear = (linear_raw - 0.5).clamp(-MAX_LINEAR_VEL, MAX_LINEAR_VEL);

        heading = wrap_angle(heading + angular.to_radians());

        let candidate = Vec2::new(
            position.x + heading.cos() * linear,
            position.y + heading.sin() * linear,
        );
        let cell = (candidate.x.round() as i64, candidate.y.round() as i64);
        if maze.is_wall(cell) || !maze.in_bounds(candidate.x, candidate.y) {
            // Move rejected; the turn sticks.
            collisions += 1;
        } else {
            position = candidate;
        }
        trajectory.push(position);
    }

    let goal = Vec2::new(maze.goal.0, maze.goal.1);
    let goal_distance = position.distance(goal);
    SimResult {
        final_position: position,
        trajectory,
        collisions,
        goal_reached: goal_distance < GOAL_RADIUS,
        fitness: 1.0 / (1.0 + goal_distance),
    }
}

/// Wraps an angle to (-pi, pi].
fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle % TAU;
    if wrapped <= -PI {
        wrapped += TAU;
    } else if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// The default maze behavior characterization: final (x, y) position.
#[must_use]
pub fn final_position_behavior() -> BehaviorFn<SimResult> {
    Arc::new(|result| vec![result.final_position.x, result.final_position.y])
}

/// Alternative characterization: `samples` evenly spaced trajectory points,
/// flattened to a 2*samples vector. Captures path shape instead of just the
/// endpoint.
#[must_use]
pub fn trajectory_sample_behavior(samples: usize) -> BehaviorFn<SimResult> {
    Arc::new(move |result| {
        let n = result.trajectory.len();
        let mut behavior: Behavior = Vec::with_capacity(samples * 2);
        for i in 0..samples {
            // Last sample lands on the final position.
            let idx = if samples > 1 {
                (i * (n - 1)) / (samples - 1)
            } else {
                n - 1
            };
            let p = result.trajectory[idx];
            behavior.push(p.x);
            behavior.push(p.y);
        }
        behavior
    })
}
