use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Serialize, Deserialize};

/// Distribution used for initial connection weights and neuron outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    /// Uniform on [0, 1).
    #[default]
    Uniform01,
    /// Uniform on [-1, 1).
    UniformSigned,
}

impl Initializer {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Initializer::Uniform01 => rng.gen::<f64>(),
            Initializer::UniformSigned => rng.gen::<f64>() * 2.0 - 1.0,
        }
    }
}

/// An initializer bound to its own PRNG.
///
/// Every network owns one, so two networks never draw from shared state and a
/// seeded source replays the same weights on every run.
#[derive(Debug, Clone)]
pub struct WeightSource {
    initializer: Initializer,
    rng: ChaCha8Rng,
}

impl WeightSource {
    pub fn from_seed(initializer: Initializer, seed: u64) -> WeightSource {
        WeightSource { initializer, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy(initializer: Initializer) -> WeightSource {
        WeightSource { initializer, rng: ChaCha8Rng::from_entropy() }
    }

    /// Seeded when `seed` is `Some`, entropy-backed otherwise.
    pub fn new(initializer: Initializer, seed: Option<u64>) -> WeightSource {
        match seed {
            Some(s) => WeightSource::from_seed(initializer, s),
            None => WeightSource::from_entropy(initializer),
        }
    }

    pub fn initializer(&self) -> Initializer {
        self.initializer
    }

    /// Draws one value from the configured distribution.
    pub fn next_value(&mut self) -> f64 {
        self.initializer.sample(&mut self.rng)
    }
}
