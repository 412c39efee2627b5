use backprop_nn::{train_network, Network, NetworkConfig, TransferFunction};

fn main() -> backprop_nn::Result<()> {
    let config = NetworkConfig::default()
        .with_transfer(TransferFunction::Sigmoid)
        .with_eta(0.5)
        .with_alpha(0.9);
    let mut network = Network::build(&[2, 3, 1], true, config)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 5000;

    for epoch in 0..epochs {
        let error = train_network(&mut network, &inputs, &expected_outputs)?;
        if epoch % 500 == 0 {
            println!("Epoch {epoch}: rms error = {error:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }
    Ok(())
}
