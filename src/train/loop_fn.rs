use std::sync::atomic::Ordering;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::{NetError, Result};
use crate::network::network::Network;
use crate::train::sample_stats::{SampleStats, TrainSummary};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` online for `config.samples` steps. Each step picks one
/// sample uniformly at random, runs forward, back-propagation and the error
/// update.
///
/// # Early termination
/// The loop stops before the next sample if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `EmptyDataset` / `DatasetMismatch` for a bad dataset, and any size or
/// state error raised by the network itself.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<TrainSummary> {
    check_dataset(inputs, targets)?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut completed = 0;
    let mut degenerate_total = 0;
    let mut degenerate_since_report = 0;

    for sample in 1..=config.samples {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let idx = rng.gen_range(0..inputs.len());
        network.feed_forward(&inputs[idx])?;
        network.back_propagation(&targets[idx])?;
        let error = network.calc_error(&targets[idx])?;
        completed = sample;

        let health = network.last_health();
        let degenerate = health.zero_weights + health.non_finite_weights;
        degenerate_total += degenerate;
        degenerate_since_report += degenerate;

        if config.report_every == 0 || sample % config.report_every != 0 {
            continue;
        }

        let stats = SampleStats {
            sample,
            total_samples: config.samples,
            error,
            recent_average_error: network.recent_average_error(),
            degenerate_weights: degenerate_since_report,
        };
        degenerate_since_report = 0;
        info!(
            sample,
            total = config.samples,
            error = stats.error,
            recent_average_error = stats.recent_average_error,
            "training progress"
        );

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(TrainSummary {
        samples: completed,
        final_error: network.error(),
        final_recent_average_error: network.recent_average_error(),
        degenerate_weights: degenerate_total,
    })
}

/// Fraction of samples whose strongest output matches the strongest target.
pub fn accuracy(network: &mut Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
    check_dataset(inputs, targets)?;
    let mut correct = 0;
    for (input, target) in inputs.iter().zip(targets) {
        let output = network.predict(input)?;
        if argmax(&output) == argmax(target) {
            correct += 1;
        }
    }
    Ok(correct as f64 / inputs.len() as f64)
}

/// Snaps an output to 1 above 0.8 and to 0 below 0.2; values in between are
/// returned unchanged.
pub fn vote(x: f64) -> f64 {
    if x > 0.8 {
        1.0
    } else if x < 0.2 {
        0.0
    } else {
        x
    }
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

pub(crate) fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(NetError::EmptyDataset);
    }
    if inputs.len() != targets.len() {
        return Err(NetError::DatasetMismatch { inputs: inputs.len(), targets: targets.len() });
    }
    Ok(())
}
