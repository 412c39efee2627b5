use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::error::{NetError, Result};
use crate::graph::{ConnectionId, Graph, WeightHealth};
use crate::init::WeightSource;
use crate::layers::dense::Layer;
use crate::loss::{RecentAverage, RmsError};
use crate::network::config::NetworkConfig;

/// Lifecycle of a [`Network`]. Construction is one-shot and strictly ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkState {
    Uninitialized,
    LayersCreated,
    Connected,
    /// At least one forward pass has run.
    Ready,
}

/// A fully connected feed-forward network trained one sample at a time.
///
/// The network owns every neuron and connection through a single [`Graph`]
/// arena; layers hold neuron ids only.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    state: NetworkState,
    graph: Graph,
    layers: Vec<Layer>,
    source: WeightSource,
    error: f64,
    recent_average: RecentAverage,
    last_health: WeightHealth,
}

impl Network {
    /// An empty network; call [`create_layers`](Self::create_layers) and
    /// [`connect_fully`](Self::connect_fully) next, or use [`build`](Self::build).
    pub fn new(config: NetworkConfig) -> Result<Network> {
        config.validate()?;
        let source = WeightSource::new(config.initializer, config.seed);
        let recent_average = RecentAverage::new(config.smoothing_window);
        Ok(Network {
            config,
            state: NetworkState::Uninitialized,
            graph: Graph::new(),
            layers: Vec::new(),
            source,
            error: 0.0,
            recent_average,
            last_health: WeightHealth::default(),
        })
    }

    /// Creates and fully connects a network in one go.
    pub fn build(topology: &[usize], add_bias: bool, config: NetworkConfig) -> Result<Network> {
        let mut network = Network::new(config)?;
        network.create_layers(topology, add_bias)?;
        network.connect_fully()?;
        Ok(network)
    }

    /// One layer per entry of `topology` (input first, output last).
    pub fn create_layers(&mut self, topology: &[usize], add_bias: bool) -> Result<()> {
        self.expect_state("create layers", NetworkState::Uninitialized)?;
        if topology.len() < 3 {
            return Err(NetError::TopologyTooShort { layers: topology.len() });
        }
        if let Some(index) = topology.iter().position(|&size| size == 0) {
            return Err(NetError::EmptyLayer { index });
        }

        for &size in topology {
            let layer = Layer::new(&mut self.graph, size, add_bias, &mut self.source);
            self.layers.push(layer);
        }
        self.state = NetworkState::LayersCreated;
        debug!(layers = topology.len(), neurons = self.graph.neurons().len(), add_bias, "layers created");
        Ok(())
    }

    /// Connects every neuron of each layer (bias included) to every regular
    /// neuron of the next one. Bias neurons never receive connections.
    pub fn connect_fully(&mut self) -> Result<()> {
        self.expect_state("connect layers", NetworkState::LayersCreated)?;
        for pair in self.layers.windows(2) {
            let (src, dst) = (&pair[0], &pair[1]);
            for &to in dst.units() {
                for &from in src.neurons() {
                    let weight = self.source.next_value();
                    self.graph.connect(from, to, weight);
                }
            }
        }
        self.state = NetworkState::Connected;
        debug!(connections = self.graph.connections().len(), "layers fully connected");
        Ok(())
    }

    /// Latches `inputs` into the input layer and evaluates every later layer
    /// in order. The input layer applies no transfer function.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<()> {
        self.expect_connected("feed forward")?;
        let input = &self.layers[0];
        if inputs.len() != input.size() {
            return Err(NetError::InputSizeMismatch { expected: input.size(), actual: inputs.len() });
        }
        for (&id, &value) in input.units().iter().zip(inputs) {
            self.graph.neuron_mut(id).set_output(value);
        }

        let transfer = self.config.transfer;
        for layer in &self.layers[1..] {
            layer.feed_forward(&mut self.graph, transfer);
        }
        self.state = NetworkState::Ready;
        Ok(())
    }

    /// [`feed_forward`](Self::feed_forward) followed by [`results`](Self::results).
    pub fn predict(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.feed_forward(inputs)?;
        Ok(self.results())
    }

    /// Trains toward `targets` using the outputs of the last forward pass.
    ///
    /// All gradients are finalized before any weight moves: hidden gradients
    /// read downstream weights, which must still hold their pre-update values.
    pub fn back_propagation(&mut self, targets: &[f64]) -> Result<()> {
        self.expect_connected("back-propagate")?;
        let transfer = self.config.transfer;
        let output = self.layers.len() - 1;

        self.layers[output].calc_output_gradients(&mut self.graph, targets, transfer)?;
        for layer in self.layers[1..output].iter().rev() {
            layer.calc_hidden_gradients(&mut self.graph, transfer);
        }

        let momentum = self.config.momentum();
        let mut health = WeightHealth::default();
        for layer in self.layers[1..].iter().rev() {
            health.merge(layer.update_weights(&mut self.graph, momentum));
        }
        self.last_health = health;
        Ok(())
    }

    /// RMS error of the current outputs against `targets`, folded into the
    /// recent average. Diagnostic only; training never reads it.
    pub fn calc_error(&mut self, targets: &[f64]) -> Result<f64> {
        self.expect_connected("calculate error")?;
        let output = self.output_layer();
        if targets.len() != output.size() {
            return Err(NetError::TargetSizeMismatch { expected: output.size(), actual: targets.len() });
        }
        let results = output.outputs(&self.graph);
        self.error = RmsError::loss(&results, targets);
        self.recent_average.fold(self.error);
        Ok(self.error)
    }

    /// Output-layer values, bias excluded.
    pub fn results(&self) -> Vec<f64> {
        self.layers.last()
            .map(|layer| layer.outputs(&self.graph))
            .unwrap_or_default()
    }

    /// Snapshot of every weight, layer by layer, each neuron's incoming
    /// connections in insertion order. Matches the order `load_weights` expects.
    pub fn dump_weights(&self) -> Vec<f64> {
        self.layers.iter()
            .flat_map(|layer| layer.dump_weights(&self.graph))
            .collect()
    }

    /// [`dump_weights`](Self::dump_weights) as space-separated text.
    pub fn weights_string(&self) -> String {
        self.dump_weights().iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Overwrites every weight from a dump of a same-shaped network and
    /// clears momentum.
    pub fn load_weights(&mut self, weights: &[f64]) -> Result<()> {
        self.expect_connected("load weights")?;
        let ids: Vec<ConnectionId> = self.layers.iter()
            .flat_map(|layer| layer.neurons().iter())
            .flat_map(|&id| self.graph.neuron(id).incoming().iter().copied())
            .collect();
        if ids.len() != weights.len() {
            return Err(NetError::WeightCountMismatch { expected: ids.len(), actual: weights.len() });
        }
        for (id, &weight) in ids.into_iter().zip(weights) {
            self.graph.set_weight(id, weight);
        }
        Ok(())
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn recent_average_error(&self) -> f64 {
        self.recent_average.value
    }

    /// Degenerate weights seen by the last `back_propagation` call.
    pub fn last_health(&self) -> WeightHealth {
        self.last_health
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Layer sizes, bias excluded.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.connections().len()
    }

    fn output_layer(&self) -> &Layer {
        // only called once connected, so at least three layers exist
        &self.layers[self.layers.len() - 1]
    }

    fn expect_state(&self, operation: &'static str, expected: NetworkState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(NetError::InvalidState { operation, state: self.state })
        }
    }

    fn expect_connected(&self, operation: &'static str) -> Result<()> {
        match self.state {
            NetworkState::Connected | NetworkState::Ready => Ok(()),
            state => Err(NetError::InvalidState { operation, state }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(topology: &[usize], add_bias: bool, seed: u64) -> Network {
        Network::build(topology, add_bias, NetworkConfig::default().with_seed(seed)).unwrap()
    }

    /// Same as `back_propagation`, but each layer updates its weights right
    /// after computing its gradients.
    fn back_propagation_eager(net: &mut Network, targets: &[f64]) {
        let transfer = net.config.transfer;
        let momentum = net.config.momentum();
        let last = net.layers.len() - 1;
        net.layers[last].calc_output_gradients(&mut net.graph, targets, transfer).unwrap();
        net.layers[last].update_weights(&mut net.graph, momentum);
        for i in (1..last).rev() {
            net.layers[i].calc_hidden_gradients(&mut net.graph, transfer);
            net.layers[i].update_weights(&mut net.graph, momentum);
        }
    }

    #[test]
    fn connection_count_matches_topology() {
        let with_bias = seeded(&[3, 5, 2], true, 1);
        assert_eq!(with_bias.connection_count(), 4 * 5 + 6 * 2);

        let without = seeded(&[3, 5, 4, 2], false, 1);
        assert_eq!(without.connection_count(), 3 * 5 + 5 * 4 + 4 * 2);
        assert_eq!(without.topology(), vec![3, 5, 4, 2]);
    }

    #[test]
    fn lifecycle_is_enforced() {
        let mut net = Network::new(NetworkConfig::default().with_seed(1)).unwrap();
        assert_eq!(net.state(), NetworkState::Uninitialized);
        assert!(matches!(net.feed_forward(&[0.0]), Err(NetError::InvalidState { .. })));
        assert!(matches!(net.connect_fully(), Err(NetError::InvalidState { .. })));

        net.create_layers(&[2, 2, 1], true).unwrap();
        assert_eq!(net.state(), NetworkState::LayersCreated);
        assert!(matches!(net.create_layers(&[2, 2, 1], true), Err(NetError::InvalidState { .. })));
        assert!(matches!(net.back_propagation(&[1.0]), Err(NetError::InvalidState { .. })));

        net.connect_fully().unwrap();
        assert_eq!(net.state(), NetworkState::Connected);
        assert!(matches!(net.connect_fully(), Err(NetError::InvalidState { .. })));

        net.feed_forward(&[1.0, 0.0]).unwrap();
        assert_eq!(net.state(), NetworkState::Ready);
    }

    #[test]
    fn topology_is_validated() {
        let cfg = NetworkConfig::default().with_seed(1);
        assert!(matches!(
            Network::build(&[2, 4], true, cfg.clone()),
            Err(NetError::TopologyTooShort { layers: 2 })
        ));
        assert!(matches!(
            Network::build(&[2, 0, 4], true, cfg),
            Err(NetError::EmptyLayer { index: 1 })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = NetworkConfig::default().with_eta(2.0);
        assert!(matches!(Network::new(cfg), Err(NetError::InvalidConfig(_))));
    }

    #[test]
    fn vector_lengths_are_checked() {
        let mut net = seeded(&[2, 3, 4], true, 5);
        assert!(matches!(
            net.feed_forward(&[1.0, 0.0, 1.0]),
            Err(NetError::InputSizeMismatch { expected: 2, actual: 3 })
        ));
        net.feed_forward(&[1.0, 0.0]).unwrap();
        assert!(matches!(
            net.back_propagation(&[0.0, 1.0]),
            Err(NetError::TargetSizeMismatch { expected: 4, actual: 2 })
        ));
        assert!(matches!(
            net.calc_error(&[0.0; 5]),
            Err(NetError::TargetSizeMismatch { expected: 4, actual: 5 })
        ));
    }

    #[test]
    fn failed_backprop_leaves_weights_untouched() {
        let mut net = seeded(&[2, 3, 2], true, 5);
        net.feed_forward(&[1.0, 1.0]).unwrap();
        let before = net.dump_weights();
        assert!(net.back_propagation(&[1.0]).is_err());
        assert_eq!(before, net.dump_weights());
    }

    #[test]
    fn forward_is_deterministic() {
        let mut net = seeded(&[2, 8, 4], true, 11);
        let a = net.predict(&[1.0, 0.0]).unwrap();
        let b = net.predict(&[1.0, 0.0]).unwrap();
        let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn same_seed_builds_same_network() {
        let a = seeded(&[2, 8, 4], true, 99);
        let b = seeded(&[2, 8, 4], true, 99);
        assert_eq!(a.dump_weights(), b.dump_weights());
    }

    #[test]
    fn bias_outputs_stay_pinned() {
        let mut net = seeded(&[3, 4, 4, 2], true, 21);
        for step in 0..50 {
            let x = (step % 4) as f64 / 3.0;
            net.feed_forward(&[x, 1.0 - x, 0.5]).unwrap();
            net.back_propagation(&[x, -x]).unwrap();
            for layer in net.layers() {
                let bias = layer.bias().unwrap();
                assert_eq!(net.graph().neuron(bias).output(), 1.0);
                assert!(net.graph().neuron(bias).incoming().is_empty());
            }
        }
    }

    #[test]
    fn calc_error_is_rms_and_folds_average() {
        let mut net = seeded(&[2, 3, 2], true, 8);
        net.feed_forward(&[0.0, 1.0]).unwrap();
        let out = net.results();
        let targets = [1.0, -1.0];
        let expected = (((1.0 - out[0]).powi(2) + (-1.0 - out[1]).powi(2)) / 2.0).sqrt();

        let err = net.calc_error(&targets).unwrap();
        assert_relative_eq!(err, expected, epsilon = 1e-12);
        assert_relative_eq!(net.error(), expected, epsilon = 1e-12);
        assert_relative_eq!(net.recent_average_error(), expected / 126.0, epsilon = 1e-12);
    }

    #[test]
    fn gradients_are_final_before_any_weight_moves() {
        let mut correct = seeded(&[2, 3, 2], true, 13);
        correct.feed_forward(&[1.0, 0.0]).unwrap();
        let mut eager = correct.clone();

        correct.back_propagation(&[1.0, -1.0]).unwrap();
        back_propagation_eager(&mut eager, &[1.0, -1.0]);

        let good = correct.dump_weights();
        let bad = eager.dump_weights();
        // 3 hidden neurons x (2 inputs + bias), then 2 outputs x (3 hidden + bias)
        let (good_hidden, good_out) = good.split_at(9);
        let (bad_hidden, bad_out) = bad.split_at(9);
        assert_eq!(good_out, bad_out);
        assert_ne!(good_hidden, bad_hidden);
    }

    #[test]
    fn weight_dump_round_trips() {
        let mut trained = seeded(&[2, 4, 3], true, 17);
        for i in 0..20 {
            let x = (i % 2) as f64;
            trained.feed_forward(&[x, 1.0 - x]).unwrap();
            trained.back_propagation(&[x, 0.0, 1.0 - x]).unwrap();
        }
        let dump = trained.dump_weights();
        assert_eq!(dump.len(), trained.connection_count());

        let mut copy = seeded(&[2, 4, 3], true, 18);
        assert_ne!(copy.dump_weights(), dump);
        copy.load_weights(&dump).unwrap();

        for input in [[0.0, 1.0], [1.0, 0.0], [0.3, 0.7]] {
            assert_eq!(trained.predict(&input).unwrap(), copy.predict(&input).unwrap());
        }
    }

    #[test]
    fn weight_dump_size_is_checked() {
        let mut net = seeded(&[2, 2, 1], false, 4);
        assert!(matches!(
            net.load_weights(&[0.1, 0.2]),
            Err(NetError::WeightCountMismatch { expected: 6, actual: 2 })
        ));
    }

    #[test]
    fn weights_string_is_space_separated() {
        let net = seeded(&[1, 1, 1], false, 2);
        let text = net.weights_string();
        let parsed: Vec<f64> = text.split(' ').map(|w| w.parse().unwrap()).collect();
        assert_eq!(parsed, net.dump_weights());
    }
}
