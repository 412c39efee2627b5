use serde::{Serialize, Deserialize};

/// Transfer function applied to a neuron's weighted input sum.
///
/// Derivatives are expressed in terms of the *activated* output `y`, not the
/// pre-activation sum, because neurons only keep their output value around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFunction {
    /// Output range (-1, 1).
    #[default]
    Tanh,
    /// Output range (0, 1).
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
}

impl TransferFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            TransferFunction::Tanh => x.tanh(),
            TransferFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            TransferFunction::ReLU => if x <= 0.0 { 0.0 } else { x },
        }
    }

    /// Derivative evaluated at the activated output `y = function(x)`.
    ///
    /// - tanh:    `1 - y²`
    /// - sigmoid: `y · (1 - y)`
    /// - ReLU:    `0` for `y <= 0`, else `1`
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            TransferFunction::Tanh => 1.0 - y * y,
            TransferFunction::Sigmoid => y * (1.0 - y),
            TransferFunction::ReLU => if y <= 0.0 { 0.0 } else { 1.0 },
        }
    }
}
