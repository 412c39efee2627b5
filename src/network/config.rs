use serde::{Serialize, Deserialize};

use crate::activation::TransferFunction;
use crate::error::{NetError, Result};
use crate::init::Initializer;
use crate::loss::DEFAULT_SMOOTHING_WINDOW;
use crate::optim::Momentum;

/// Per-network hyperparameters and numeric policies.
///
/// Owned by each `Network`, so two networks never share mutable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Training rate, in [0, 1].
    pub eta: f64,
    /// Momentum multiplier, in [0, ∞).
    pub alpha: f64,
    pub initializer: Initializer,
    pub transfer: TransferFunction,
    /// Window of the exponentially smoothed recent-average error.
    pub smoothing_window: f64,
    /// Seed for the weight initializer; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            eta: 0.15,
            alpha: 0.5,
            initializer: Initializer::Uniform01,
            transfer: TransferFunction::Tanh,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }

    pub fn with_transfer(mut self, transfer: TransferFunction) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn with_smoothing_window(mut self, window: f64) -> Self {
        self.smoothing_window = window;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn momentum(&self) -> Momentum {
        Momentum::new(self.eta, self.alpha)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.eta) {
            return Err(NetError::InvalidConfig(format!("eta must be in [0, 1], got {}", self.eta)));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(NetError::InvalidConfig(format!("alpha must be finite and >= 0, got {}", self.alpha)));
        }
        if !self.smoothing_window.is_finite() || self.smoothing_window < 0.0 {
            return Err(NetError::InvalidConfig(format!(
                "smoothing window must be finite and >= 0, got {}",
                self.smoothing_window
            )));
        }
        Ok(())
    }
}
