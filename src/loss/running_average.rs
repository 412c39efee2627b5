use serde::{Serialize, Deserialize};

/// Default smoothing window for the recent-average error.
pub const DEFAULT_SMOOTHING_WINDOW: f64 = 125.0;

/// Exponentially smoothed scalar, roughly averaged over `window` samples.
///
/// Starts at 0.0, so early values are biased low until about `window`
/// samples have been folded in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentAverage {
    pub window: f64,
    pub value: f64,
}

impl RecentAverage {
    pub fn new(window: f64) -> RecentAverage {
        RecentAverage { window, value: 0.0 }
    }

    /// `value = (value · window + sample) / (window + 1)`
    pub fn fold(&mut self, sample: f64) -> f64 {
        self.value = (self.value * self.window + sample) / (self.window + 1.0);
        self.value
    }
}

impl Default for RecentAverage {
    fn default() -> Self {
        RecentAverage::new(DEFAULT_SMOOTHING_WINDOW)
    }
}
