pub mod activation;

pub use activation::TransferFunction;
