//! The outer evolutionary loop.
//!
//! Selection pressure here is novelty, not fitness: each generation is
//! simulated in the maze, characterized by final position, scored against
//! the archive, and bred by tournament on those scores. Distance to goal is
//! tracked for reporting only.

/// Fixed-topology controller genome
pub mod controller;
/// Tournament selection and breeding
pub mod selection;

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use curio_core::{evaluate_population, EvaluateOpts, NoveltyEngine};
use curio_maze::{final_position_behavior, simulate, Maze, SimOptions, SimResult};

use crate::config::ExperimentConfig;
use crate::report::{self, RunReport};
use controller::Controller;

/// Per-generation log line payload.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub generation: usize,
    pub archive_size: usize,
    pub best_novelty: f64,
    pub mean_novelty: f64,
    /// Goal distance of the most novel individual.
    pub best_goal_distance: f64,
    pub goal_reached: bool,
}

/// One novelty-search run: engine, population, and RNG state.
pub struct Experiment {
    config: ExperimentConfig,
    maze: Arc<Maze>,
    engine: NoveltyEngine,
    population: Vec<Controller>,
    rng: ChaCha8Rng,
    generation: usize,
    best_goal_distance: f64,
    goal_reached_generation: Option<usize>,
    best_controller: Option<Controller>,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        let mut maze = load_maze(&config.maze)?;
        if let Some(timesteps) = config.timesteps {
            maze.timesteps = timesteps;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = (0..config.population_size)
            .map(|_| Controller::new_random_with_rng(&mut rng))
            .collect();

        Ok(Self {
            engine: NoveltyEngine::new(config.novelty_config()),
            maze: Arc::new(maze),
            population,
            rng,
            generation: 0,
            best_goal_distance: f64::INFINITY,
            goal_reached_generation: None,
            config,
            best_controller: None,
        })
    }

    /// Evaluates and breeds one generation.
    pub fn step(&mut self) -> Result<GenerationSummary> {
        let maze = Arc::clone(&self.maze);
        let opts = SimOptions::default();
        let eval_fn = Arc::new(move |ctrl: &Controller| -> anyhow::Result<SimResult> {
            Ok(simulate(&maze, |inputs| ctrl.forward(inputs), &opts))
        });

        let (scores, engine) = evaluate_population(
            &self.engine,
            self.population.clone(),
            eval_fn,
            final_position_behavior(),
            &EvaluateOpts::default(),
        )
        .with_context(|| format!("generation {} evaluation", self.generation))?;
        self.engine = engine;

        let best = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let best_result = simulate(
            &self.maze,
            |inputs| self.population[best].forward(inputs),
            &SimOptions::default(),
        );
        let goal_distance = best_result
            .final_position
            .distance(curio_maze::Vec2::new(self.maze.goal.0, self.maze.goal.1));
        if goal_distance < self.best_goal_distance {
            self.best_goal_distance = goal_distance;
            self.best_controller = Some(self.population[best].clone());
        }
        if best_result.goal_reached && self.goal_reached_generation.is_none() {
            self.goal_reached_generation = Some(self.generation);
        }

        let summary = GenerationSummary {
            generation: self.generation,
            archive_size: self.engine.archive_stats().size,
            best_novelty: scores.get(best).copied().unwrap_or(0.0),
            mean_novelty: if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            },
            best_goal_distance: goal_distance,
            goal_reached: best_result.goal_reached,
        };

        self.population =
            selection::next_generation(&self.population, &scores, &self.config.evolution, &mut self.rng);
        self.generation += 1;
        Ok(summary)
    }

    /// Runs the configured number of generations and builds the report.
    pub fn run(&mut self) -> Result<RunReport> {
        for _ in 0..self.config.generations {
            let summary = self.step()?;
            tracing::info!(
                generation = summary.generation,
                archive_size = summary.archive_size,
                best_novelty = summary.best_novelty,
                mean_novelty = summary.mean_novelty,
                best_goal_distance = summary.best_goal_distance,
                goal_reached = summary.goal_reached,
                "generation complete"
            );
        }

        let trajectories: Vec<_> = self
            .population
            .iter()
            .map(|ctrl| {
                simulate(&self.maze, |inputs| ctrl.forward(inputs), &SimOptions::default())
                    .trajectory
            })
            .collect();

        Ok(RunReport {
            maze: self.config.maze.clone(),
            generations: self.generation,
            population_size: self.config.population_size,
            archive_size: self.engine.archive_stats().size,
            best_goal_distance: self.best_goal_distance,
            goal_reached_generation: self.goal_reached_generation,
            coverage: report::coverage(&self.maze, &trajectories),
            best_controller_hex: self
                .best_controller
                .as_ref()
                .map(Controller::to_hex)
                .unwrap_or_default(),
            finished_at: chrono::Utc::now(),
        })
    }

    #[must_use]
    pub fn engine(&self) -> &NoveltyEngine {
        &self.engine
    }

    #[must_use]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }
}

/// Resolves a maze by built-in name, else treats the string as a file path.
fn load_maze(name: &str) -> Result<Maze> {
    match name {
        "medium" => Ok(Maze::medium()),
        "hard" => Ok(Maze::hard()),
        path => {
            let layout = std::fs::read_to_string(path)
                .with_context(|| format!("reading maze layout {path}"))?;
            Maze::parse(&layout).with_context(|| format!("parsing maze layout {path}"))
        }
    }
}
