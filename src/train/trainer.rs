use crate::error::Result;
use crate::network::network::Network;
use crate::train::loop_fn::check_dataset;

/// One in-order online pass over the dataset: forward, back-propagation and
/// error update per sample. Returns the mean RMS error of the pass.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(inputs, targets)?;
    let mut total_error = 0.0;

    for (input, target) in inputs.iter().zip(targets) {
        network.feed_forward(input)?;
        network.back_propagation(target)?;
        // outputs still reflect the forward pass, not the updated weights
        total_error += network.calc_error(target)?;
    }

    Ok(total_error / inputs.len() as f64)
}
