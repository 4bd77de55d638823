//! # Regression Network
//! A single-hidden-layer feed-forward net (4 → 10 → 1, sigmoid activations
//! throughout) trained by per-example backpropagation. Trained exactly once
//! at startup; weights are read-only afterwards.
//!
//! Initialization is randomized and unseeded by default, so run-to-run
//! outputs are not reproducible; tests pass an explicit seed and assert
//! shape and error-trend properties instead of exact weights.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use tracing::info;

use crate::features::{FeatureVector, TrainingExample, FEATURE_WIDTH};

/// Training hyperparameters. Defaults: 20 000 iterations, learning rate
/// 0.01, 10 hidden units, no seed, no early stopping, no validation split.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainOptions {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_hidden_units")]
    pub hidden_units: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_iterations() -> usize {
    20_000
}
fn default_learning_rate() -> f64 {
    0.01
}
fn default_hidden_units() -> usize {
    10
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            learning_rate: default_learning_rate(),
            hidden_units: default_hidden_units(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Network {
    hidden_weights: Vec<[f64; FEATURE_WIDTH]>,
    hidden_bias: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: f64,
}

impl Network {
    /// Fresh network with weights uniform in (-0.2, 0.2). `seed` pins the
    /// initialization for deterministic tests; `None` draws from the OS.
    pub fn new(hidden_units: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };

        let mut hidden_weights = Vec::with_capacity(hidden_units);
        let mut hidden_bias = Vec::with_capacity(hidden_units);
        let mut output_weights = Vec::with_capacity(hidden_units);
        for _ in 0..hidden_units {
            let mut weights = [0.0; FEATURE_WIDTH];
            for w in weights.iter_mut() {
                *w = rng.random_range(-0.2..0.2);
            }
            hidden_weights.push(weights);
            hidden_bias.push(rng.random_range(-0.2..0.2));
            output_weights.push(rng.random_range(-0.2..0.2));
        }

        Self {
            hidden_weights,
            hidden_bias,
            output_weights,
            output_bias: rng.random_range(-0.2..0.2),
        }
    }

    pub fn hidden_units(&self) -> usize {
        self.hidden_bias.len()
    }

    /// One forward pass; returns the scalar prediction.
    pub fn run(&self, input: &FeatureVector) -> f64 {
        self.forward(input).1
    }

    fn forward(&self, input: &FeatureVector) -> (Vec<f64>, f64) {
        let mut hidden = Vec::with_capacity(self.hidden_bias.len());
        for (weights, bias) in self.hidden_weights.iter().zip(&self.hidden_bias) {
            let mut sum = *bias;
            for (w, x) in weights.iter().zip(input) {
                sum += w * x;
            }
            hidden.push(sigmoid(sum));
        }

        let mut out = self.output_bias;
        for (w, h) in self.output_weights.iter().zip(&hidden) {
            out += w * h;
        }
        (hidden, sigmoid(out))
    }

    /// Train over the full ordered example sequence for a fixed iteration
    /// count. Blocking by design: the caller runs this before serving any
    /// request. Logs mean squared training error every 1 000 iterations.
    pub fn train(&mut self, examples: &[TrainingExample], options: &TrainOptions) {
        let lr = options.learning_rate;
        for iteration in 1..=options.iterations {
            let mut error_sum = 0.0;
            for example in examples {
                let (hidden, output) = self.forward(&example.input);
                let error = output - example.target;
                error_sum += error * error;

                let delta_out = error * output * (1.0 - output);
                for j in 0..self.output_weights.len() {
                    // Hidden delta uses the pre-update output weight.
                    let delta_hidden =
                        delta_out * self.output_weights[j] * hidden[j] * (1.0 - hidden[j]);
                    self.output_weights[j] -= lr * delta_out * hidden[j];
                    for i in 0..FEATURE_WIDTH {
                        self.hidden_weights[j][i] -= lr * delta_hidden * example.input[i];
                    }
                    self.hidden_bias[j] -= lr * delta_hidden;
                }
                self.output_bias -= lr * delta_out;
            }

            if iteration % 1_000 == 0 {
                let mean_error = if examples.is_empty() {
                    0.0
                } else {
                    error_sum / examples.len() as f64
                };
                info!(iteration, training_error = mean_error, "training progress");
            }
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    fn mean_error(&self, examples: &[TrainingExample]) -> f64 {
        if examples.is_empty() {
            return 0.0;
        }
        examples
            .iter()
            .map(|e| (self.run(&e.input) - e.target).powi(2))
            .sum::<f64>()
            / examples.len() as f64
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
