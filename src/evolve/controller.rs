use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EvolutionSettings;

/// Sensor inputs consumed per step (bias + 6 rangefinders + 4 radar bits).
pub const NUM_INPUTS: usize = 11;
/// Hidden layer width.
pub const NUM_HIDDEN: usize = 8;
/// Angular and linear velocity signals.
pub const NUM_OUTPUTS: usize = 2;

/// Fixed-topology controller network: 11 inputs -> 8 hidden -> 2 outputs.
///
/// Hidden units are tanh; outputs are sigmoid so they land in the [0, 1]
/// range the simulator expects for its velocity signals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Controller {
    pub weights_ih: Vec<f64>, // 11 inputs -> 8 hidden (88 weights)
    pub weights_ho: Vec<f64>, // 8 hidden -> 2 outputs (16 weights)
    pub bias_h: Vec<f64>,     // 8 hidden biases
    pub bias_o: Vec<f64>,     // 2 output biases
}

impl Controller {
    pub fn new_random_with_rng<R: Rng>(rng: &mut R) -> Self {
        let weights_ih = (0..NUM_INPUTS * NUM_HIDDEN)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        let weights_ho = (0..NUM_HIDDEN * NUM_OUTPUTS)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        let bias_h = (0..NUM_HIDDEN).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let bias_o = (0..NUM_OUTPUTS).map(|_| rng.gen_range(-1.0..1.0)).collect();

        Self {
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
        }
    }

    pub fn forward(&self, inputs: &[f64; NUM_INPUTS]) -> [f64; NUM_OUTPUTS] {
        let mut hidden = [0.0; NUM_HIDDEN];
        for (i, h) in hidden.iter_mut().enumerate() {
            let mut sum = self.bias_h[i];
            for (j, &input) in inputs.iter().enumerate() {
                sum += input * self.weights_ih[j * NUM_HIDDEN + i];
            }
            *h = sum.tanh();
        }

        let mut output = [0.0; NUM_OUTPUTS];
        for (i, o) in output.iter_mut().enumerate() {
            let mut sum = self.bias_o[i];
            for (j, &h) in hidden.iter().enumerate() {
                sum += h * self.weights_ho[j * NUM_OUTPUTS + i];
            }
            *o = 1.0 / (1.0 + (-sum).exp());
        }
        output
    }

    pub fn mutate_with_config<R: Rng>(&mut self, config: &EvolutionSettings, rng: &mut R) {
        let mut mutate_val = |v: &mut f64, rng: &mut R| {
            if rng.gen::<f64>() < config.mutation_rate {
                *v += rng.gen_range(-config.mutation_amount..config.mutation_amount);
            }
            *v = v.clamp(-2.0, 2.0);
        };

        for w in self.weights_ih.iter_mut() {
            mutate_val(w, rng);
        }
        for w in self.weights_ho.iter_mut() {
            mutate_val(w, rng);
        }
        for b in self.bias_h.iter_mut() {
            mutate_val(b, rng);
        }
        for b in self.bias_o.iter_mut() {
            mutate_val(b, rng);
        }
    }

    pub fn crossover<R: Rng>(parent1: &Controller, parent2: &Controller, rng: &mut R) -> Self {
        let mut child = parent1.clone();

        for i in 0..child.weights_ih.len() {
            if rng.gen_bool(0.5) {
                child.weights_ih[i] = parent2.weights_ih[i];
            }
        }
        for i in 0..child.weights_ho.len() {
            if rng.gen_bool(0.5) {
                child.weights_ho[i] = parent2.weights_ho[i];
            }
        }
        for i in 0..child.bias_h.len() {
            if rng.gen_bool(0.5) {
                child.bias_h[i] = parent2.bias_h[i];
            }
        }
        for i in 0..child.bias_o.len() {
            if rng.gen_bool(0.5) {
                child.bias_o[i] = parent2.bias_o[i];
            }
        }
        child
    }

    pub fn to_hex(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(bytes)
    }

    pub fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(hex_str)?;
        let controller = serde_json::from_slice(&bytes)?;
        Ok(controller)
    }
}
