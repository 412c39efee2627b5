use tracing::warn;

use crate::activation::TransferFunction;
use crate::optim::Momentum;
use super::{ConnectionId, Graph, NeuronId};

/// A scalar unit: an output value, an error gradient, and the ids of the
/// connections that feed it and that it feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    pub(crate) output: f64,
    /// Only meaningful after a backward pass.
    pub(crate) gradient: f64,
    pub(crate) incoming: Vec<ConnectionId>,
    pub(crate) outgoing: Vec<ConnectionId>,
    pub(crate) is_bias: bool,
}

impl Neuron {
    pub fn new(output: f64) -> Neuron {
        Neuron {
            output,
            gradient: 0.0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            is_bias: false,
        }
    }

    /// A bias neuron: output pinned at 1.0, never receives input connections.
    pub fn bias() -> Neuron {
        Neuron { is_bias: true, ..Neuron::new(1.0) }
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn set_output(&mut self, value: f64) {
        self.output = value;
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn incoming(&self) -> &[ConnectionId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ConnectionId] {
        &self.outgoing
    }

    pub fn is_bias(&self) -> bool {
        self.is_bias
    }
}

/// Zero or non-finite weights observed during one or more weight updates.
///
/// These are reported, never fatal: momentum descent can legitimately cross
/// zero, and a diverging run is the caller's call to stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightHealth {
    pub zero_weights: usize,
    pub non_finite_weights: usize,
}

impl WeightHealth {
    fn record(&mut self, connection: ConnectionId, weight: f64) {
        if !weight.is_finite() {
            self.non_finite_weights += 1;
            warn!(connection = connection.index(), weight, "weight became non-finite");
        } else if weight == 0.0 {
            self.zero_weights += 1;
            warn!(connection = connection.index(), "weight driven to exactly zero");
        }
    }

    pub fn merge(&mut self, other: WeightHealth) {
        self.zero_weights += other.zero_weights;
        self.non_finite_weights += other.non_finite_weights;
    }

    pub fn is_clean(&self) -> bool {
        self.zero_weights == 0 && self.non_finite_weights == 0
    }
}

// Neuron-level numerics. They live on the arena because each one reads
// neighbouring neurons through connection ids.
impl Graph {
    /// `output = transfer(Σ source.output · weight)` over incoming connections.
    ///
    /// No-op for bias neurons so their pinned output survives every pass.
    pub fn feed_forward(&mut self, id: NeuronId, transfer: TransferFunction) {
        let neuron = &self.neurons[id.0];
        if neuron.is_bias {
            return;
        }
        let sum: f64 = neuron.incoming.iter()
            .map(|c| {
                let conn = &self.connections[c.0];
                self.neurons[conn.source.0].output * conn.weight
            })
            .sum();
        self.neurons[id.0].output = transfer.function(sum);
    }

    /// `gradient = (target - output) · transfer'(output)`
    pub fn calc_output_gradient(&mut self, id: NeuronId, target: f64, transfer: TransferFunction) {
        let neuron = &mut self.neurons[id.0];
        let delta = target - neuron.output;
        neuron.gradient = delta * transfer.derivative(neuron.output);
    }

    /// `gradient = (Σ weight · destination.gradient) · transfer'(output)` over
    /// outgoing connections. Every destination gradient must already be final.
    pub fn calc_hidden_gradient(&mut self, id: NeuronId, transfer: TransferFunction) {
        let neuron = &self.neurons[id.0];
        let sum: f64 = neuron.outgoing.iter()
            .map(|c| {
                let conn = &self.connections[c.0];
                conn.weight * self.neurons[conn.destination.0].gradient
            })
            .sum();
        let output = neuron.output;
        self.neurons[id.0].gradient = sum * transfer.derivative(output);
    }

    /// Applies the momentum rule to every incoming connection of `id`.
    pub fn update_input_weights(&mut self, id: NeuronId, momentum: Momentum) -> WeightHealth {
        let mut health = WeightHealth::default();
        let gradient = self.neurons[id.0].gradient;
        for &cid in &self.neurons[id.0].incoming {
            let source_output = self.neurons[self.connections[cid.0].source.0].output;
            let conn = &mut self.connections[cid.0];
            let new_delta = momentum.delta(source_output, gradient, conn.delta_weight);
            conn.delta_weight = new_delta;
            conn.weight += new_delta;
            health.record(cid, conn.weight);
        }
        health
    }

    /// Incoming weights of `id` in insertion order. Call again (or clone the
    /// iterator) to walk them a second time.
    pub fn dump_weights(&self, id: NeuronId) -> impl Iterator<Item = f64> + Clone + '_ {
        self.neurons[id.0].incoming.iter().map(move |c| self.connections[c.0].weight)
    }
}
