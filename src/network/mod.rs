pub mod config;
pub mod network;
pub mod spec;

pub use config::NetworkConfig;
pub use network::{Network, NetworkState};
pub use spec::NetworkSpec;
