use serde::{Serialize, Deserialize};

/// Progress report emitted by `train_loop` every `report_every` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// 1-based sample number.
    pub sample: usize,
    /// Total samples requested for this run.
    pub total_samples: usize,
    /// RMS error of this sample.
    pub error: f64,
    pub recent_average_error: f64,
    /// Zero or non-finite weights seen since the previous report.
    pub degenerate_weights: usize,
}

/// Outcome of a whole `train_loop` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Samples actually trained; lower than requested after an early stop.
    pub samples: usize,
    pub final_error: f64,
    pub final_recent_average_error: f64,
    pub degenerate_weights: usize,
}
