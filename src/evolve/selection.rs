use rand::Rng;

use crate::config::EvolutionSettings;
use crate::evolve::controller::Controller;

/// Index of the tournament winner: the most novel of `size` random picks.
pub fn tournament<R: Rng>(scores: &[f64], size: usize, rng: &mut R) -> usize {
    let mut best = rng.gen_range(0..scores.len());
    for _ in 1..size.max(1) {
        let challenger = rng.gen_range(0..scores.len());
        if scores[challenger] > scores[best] {
            best = challenger;
        }
    }
    best
}

/// Breeds the next generation from novelty scores.
///
/// The `elite_count` most novel individuals survive unchanged; the rest are
/// children of tournament-selected parents, crossed over and mutated.
pub fn next_generation<R: Rng>(
    population: &[Controller],
    scores: &[f64],
    config: &EvolutionSettings,
    rng: &mut R,
) -> Vec<Controller> {
    debug_assert_eq!(population.len(), scores.len());
    let mut next = Vec::with_capacity(population.len());

    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by(|a, b| {
        scores[*b]
            .partial_cmp(&scores[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for &i in ranked.iter().take(config.elite_count.min(population.len())) {
        next.push(population[i].clone());
    }

    while next.len() < population.len() {
        let p1 = tournament(scores, config.tournament_size, rng);
        let p2 = tournament(scores, config.tournament_size, rng);
        let mut child = Controller::crossover(&population[p1], &population[p2], rng);
        child.mutate_with_config(config, rng);
        next.push(child);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settings() -> EvolutionSettings {
        EvolutionSettings {
            mutation_rate: 0.1,
            mutation_amount: 0.3,
            tournament_size: 3,
            elite_count: 1,
        }
    }

    #[test]
    fn test_tournament_returns_valid_index() {
        let scores = vec![1.0, 5.0, 3.0, 2.0];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let winner = tournament(&scores, 3, &mut rng);
            assert!(winner < scores.len());
        }
    }

    #[test]
    fn test_tournament_full_size_picks_the_best_often() {
        // With tournament size == population size the best individual is
        // drawn with overwhelming probability across repeats.
        let scores = vec![0.0, 0.0, 9.0, 0.0];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let wins = (0..100)
            .filter(|_| tournament(&scores, 16, &mut rng) == 2)
            .count();
        assert!(wins > 95, "best won only {} of 100", wins);
    }

    #[test]
    fn test_next_generation_preserves_size_and_elite() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let population: Vec<Controller> = (0..8)
            .map(|_| Controller::new_random_with_rng(&mut rng))
            .collect();
        let scores = vec![0.1, 0.2, 0.9, 0.3, 0.0, 0.5, 0.4, 0.6];

        let next = next_generation(&population, &scores, &settings(), &mut rng);

        assert_eq!(next.len(), population.len());
        // Elite slot 0 is the most novel parent, byte for byte.
        assert_eq!(next[0].weights_ih, population[2].weights_ih);
        assert_eq!(next[0].bias_o, population[2].bias_o);
    }
}
