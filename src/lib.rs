//! # Curio
//!
//! Novelty search over a simulated maze: evolve robot controllers that are
//! rewarded for reaching *new places*, not for getting closer to the goal.
//!
//! The algorithmic core lives in two library crates:
//! - [`curio_core`]: the novelty archive, k-NN scoring, and the parallel
//!   population-evaluation pipeline
//! - [`curio_maze`]: the maze model, ray-cast sensors, and the robot
//!   simulator that turns a controller into a behavior
//!
//! This crate is the experiment harness around them: controller genomes,
//! mutation and tournament selection, the generation loop, configuration,
//! and run reporting.

/// Experiment configuration (TOML-backed, with defaults)
pub mod config;
/// Outer evolutionary loop: controllers, selection, generations
pub mod evolve;
/// End-of-run summary and maze coverage
pub mod report;

pub use curio_core;
pub use curio_maze;
