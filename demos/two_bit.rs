use backprop_nn::train::{train_loop, vote, TrainConfig};
use backprop_nn::{Network, NetworkConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Number of random samples to train on.
const TRAINING_SAMPLES: usize = 2000;

fn bits(n: usize) -> Vec<f64> {
    vec![((n & 2) != 0) as u8 as f64, ((n & 1) != 0) as u8 as f64]
}

fn one_hot(n: usize) -> Vec<f64> {
    (0..4).map(|k| (k == n) as u8 as f64).collect()
}

fn main() -> backprop_nn::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    // 2 inputs + bias, 8 hidden + bias, 4 one-hot outputs
    let mut network = Network::build(&[2, 8, 4], true, NetworkConfig::default())?;

    let inputs: Vec<Vec<f64>> = (0..4).map(bits).collect();
    let targets: Vec<Vec<f64>> = (0..4).map(one_hot).collect();

    info!(samples = TRAINING_SAMPLES, "training");
    let summary = train_loop(&mut network, &inputs, &targets, &TrainConfig::new(TRAINING_SAMPLES, 250))?;
    info!(
        samples = summary.samples,
        recent_average_error = summary.final_recent_average_error,
        "training done"
    );

    for n in 0..4 {
        let results = network.predict(&bits(n))?;
        let voted: Vec<f64> = results.iter().map(|&r| vote(r)).collect();
        println!("{} -> {:?}  raw {:.4?}", n, voted, results);
    }
    Ok(())
}
