use serde::{Deserialize, Serialize};
use std::fs;

use curio_core::NoveltyConfig;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NoveltySettings {
    pub k_nearest: usize,
    pub archive_threshold: f64,
    pub min_dist_to_archive: f64,
    pub self_exclusion: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EvolutionSettings {
    pub mutation_rate: f64,
    pub mutation_amount: f64,
    pub tournament_size: usize,
    pub elite_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExperimentConfig {
    /// Built-in layout name ("medium", "hard") or a path to a layout file.
    pub maze: String,
    pub generations: usize,
    pub population_size: usize,
    /// Episode length override; the maze default applies when absent.
    pub timesteps: Option<usize>,
    pub seed: u64,
    pub novelty: NoveltySettings,
    pub evolution: EvolutionSettings,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            maze: "medium".to_string(),
            generations: 100,
            population_size: 100,
            timesteps: None,
            seed: 42,
            novelty: NoveltySettings {
                k_nearest: 15,
                archive_threshold: 6.0,
                min_dist_to_archive: 3.0,
                self_exclusion: false,
            },
            evolution: EvolutionSettings {
                mutation_rate: 0.1,
                mutation_amount: 0.3,
                tournament_size: 3,
                elite_count: 1,
            },
        }
    }
}

impl ExperimentConfig {
    /// Loads from a TOML file, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(path: &str) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path, error = %e, "bad config file, using defaults"),
            }
        }
        Self::default()
    }

    /// The engine configuration these settings describe.
    #[must_use]
    pub fn novelty_config(&self) -> NoveltyConfig {
        NoveltyConfig {
            k_nearest: self.novelty.k_nearest,
            archive_threshold: self.novelty.archive_threshold,
            min_dist_to_archive: self.novelty.min_dist_to_archive,
            self_exclusion: self.novelty.self_exclusion,
            ..NoveltyConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = ExperimentConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: ExperimentConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.maze, "medium");
        assert_eq!(back.population_size, config.population_size);
        assert_eq!(back.novelty.k_nearest, 15);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ExperimentConfig::load("/nonexistent/curio.toml");
        assert_eq!(config.generations, 100);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_novelty_config_carries_settings() {
        let mut config = ExperimentConfig::default();
        config.novelty.k_nearest = 5;
        config.novelty.self_exclusion = true;
        let nc = config.novelty_config();
        assert_eq!(nc.k_nearest, 5);
        assert!(nc.self_exclusion);
    }
}
