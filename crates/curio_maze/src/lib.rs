//! # Curio Maze
//!
//! The maze navigation domain: a continuous-space robot in a grid maze,
//! sensed through ray-cast rangefinders and a goal radar, driven by an
//! external controller function. This is the concrete evaluation function
//! behind the novelty-search pipeline in `curio_core`: one simulation turns
//! a controller into a trajectory, and the behavior extractor projects that
//! to a point in behavior space (final position by default).
//!
//! ## Example
//!
//! ```
//! use curio_maze::{simulate, Maze, SimOptions};
//!
//! let maze = Maze::medium();
//! // A controller that always drives straight ahead at full throttle.
//! let result = simulate(&maze, |_inputs| [0.5, 1.0], &SimOptions::default());
//! assert_eq!(result.trajectory.len(), maze.timesteps + 1);
//! ```

/// Maze parse errors
pub mod error;
/// 2D vector math, segment intersection, ray casting
pub mod geometry;
/// Grid maze model and text-layout parsing
pub mod maze;
/// Rangefinder and goal-radar sensor suite
pub mod sensors;
/// Fixed-timestep robot simulation
pub mod simulator;

pub use error::MazeError;
pub use geometry::Vec2;
pub use maze::Maze;
pub use sensors::{sense, MAX_RANGE, NUM_INPUTS};
pub use simulator::{
    final_position_behavior, simulate, trajectory_sample_behavior, SimOptions, SimResult,
};
