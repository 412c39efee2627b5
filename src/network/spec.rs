use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::config::NetworkConfig;
use crate::network::network::Network;

/// A fully serializable description of a network: its shape plus the
/// hyperparameters it trains with.
///
/// `NetworkSpec` only captures how to build a network. Trained weights are
/// not part of it; use `Network::dump_weights` for an in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, handy as a file stem.
    pub name: String,
    /// Layer sizes without bias neurons, input first, output last.
    pub topology: Vec<usize>,
    /// Append a bias neuron to every layer.
    #[serde(default = "default_add_bias")]
    pub add_bias: bool,
    #[serde(default)]
    pub config: NetworkConfig,
}

fn default_add_bias() -> bool {
    true
}

impl NetworkSpec {
    pub fn new(name: impl Into<String>, topology: Vec<usize>, add_bias: bool, config: NetworkConfig) -> NetworkSpec {
        NetworkSpec { name: name.into(), topology, add_bias, config }
    }

    /// Creates and fully connects the described network.
    pub fn build(&self) -> Result<Network> {
        Network::build(&self.topology, self.add_bias, self.config.clone())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::TransferFunction;
    use crate::error::NetError;

    #[test]
    fn minimal_json_uses_defaults() {
        let spec: NetworkSpec = serde_json::from_str(r#"{ "name": "two_bit", "topology": [2, 8, 4] }"#).unwrap();
        assert!(spec.add_bias);
        assert_eq!(spec.config, NetworkConfig::default());
        let net = spec.build().unwrap();
        assert_eq!(net.connection_count(), 3 * 8 + 9 * 4);
    }

    #[test]
    fn save_and_load_through_file() {
        let path = std::env::temp_dir().join(format!("backprop_nn_spec_{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let spec = NetworkSpec::new(
            "xor",
            vec![2, 3, 1],
            false,
            NetworkConfig::default().with_transfer(TransferFunction::Sigmoid).with_seed(5),
        );
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(spec, loaded);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = NetworkSpec::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, NetError::Io(_)));
    }

    #[test]
    fn bad_topology_surfaces_on_build() {
        let spec = NetworkSpec::new("flat", vec![2, 1], true, NetworkConfig::default());
        assert!(matches!(spec.build(), Err(NetError::TopologyTooShort { .. })));
    }
}
