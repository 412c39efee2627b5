use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::sample_stats::SampleStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `samples`      — number of online training steps; each draws one sample
///                    uniformly at random from the dataset
/// - `report_every` — emit a `SampleStats` every this many samples; `0` disables
///                    reporting
/// - `progress_tx`  — optional channel sender for the reports. If the receiver
///                    is dropped the loop terminates early.
/// - `stop_flag`    — optional atomic flag; when set to `true` from another
///                    thread the loop stops before the next sample.
/// - `seed`         — seed for sample selection; `None` uses OS entropy
pub struct TrainConfig {
    pub samples: usize,
    pub report_every: usize,
    pub progress_tx: Option<mpsc::Sender<SampleStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
    pub seed: Option<u64>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel, no stop flag
    /// and entropy-seeded sampling.
    pub fn new(samples: usize, report_every: usize) -> Self {
        TrainConfig {
            samples,
            report_every,
            progress_tx: None,
            stop_flag: None,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
