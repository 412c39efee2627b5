/// Gradient descent with momentum, applied one connection at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    /// Training rate, in [0, 1].
    pub eta: f64,
    /// Fraction of the previous delta carried into the next one, in [0, ∞).
    pub alpha: f64,
}

impl Momentum {
    pub fn new(eta: f64, alpha: f64) -> Momentum {
        Momentum { eta, alpha }
    }

    /// Weight delta for one connection: `eta · source_output · gradient + alpha · old_delta`.
    ///
    /// `old_delta` must be the delta applied in the previous update, read
    /// before it is overwritten.
    pub fn delta(&self, source_output: f64, gradient: f64, old_delta: f64) -> f64 {
        self.eta * source_output * gradient + self.alpha * old_delta
    }
}
