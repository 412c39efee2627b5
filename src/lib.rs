//! A feed-forward multilayer perceptron trained sample by sample with
//! momentum backpropagation.
//!
//! Neurons and connections live in a single arena owned by the [`Network`];
//! layers and neurons refer to each other by index.

pub mod error;
pub mod activation;
pub mod init;
pub mod graph;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use activation::activation::TransferFunction;
pub use init::initializer::{Initializer, WeightSource};
pub use graph::{Graph, NeuronId, ConnectionId, WeightHealth};
pub use layers::dense::Layer;
pub use network::network::{Network, NetworkState};
pub use network::config::NetworkConfig;
pub use network::spec::NetworkSpec;
pub use optim::momentum::Momentum;
pub use train::trainer::train_network;
pub use train::loop_fn::train_loop;
