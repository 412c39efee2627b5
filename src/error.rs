use thiserror::Error;

use crate::network::network::NetworkState;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetError>;

/// Everything that can go wrong when building, running or training a network.
///
/// Precondition violations that the classic pointer-based design only caught
/// with debug assertions are surfaced here as recoverable errors.
#[derive(Error, Debug)]
pub enum NetError {
    /// Fewer than three layer sizes (input, hidden, output) were given.
    #[error("topology needs at least 3 layers (input, hidden, output), got {layers}")]
    TopologyTooShort { layers: usize },

    /// A layer size of zero.
    #[error("layer {index} has no neurons")]
    EmptyLayer { index: usize },

    #[error("expected {expected} input values, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("expected {expected} target values, got {actual}")]
    TargetSizeMismatch { expected: usize, actual: usize },

    /// An operation was called in the wrong lifecycle state.
    #[error("cannot {operation} while network is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: NetworkState,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("weight dump holds {actual} weights, network has {expected} connections")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[error("dataset has {inputs} inputs but {targets} targets")]
    DatasetMismatch { inputs: usize, targets: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
