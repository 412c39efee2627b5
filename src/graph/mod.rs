//! Arena storage for neurons and connections.
//!
//! Neurons and connections are addressed by stable index handles instead of
//! references, so the whole graph has exactly one owner and tears down in one
//! drop.

pub mod connection;
pub mod neuron;

pub use connection::Connection;
pub use neuron::{Neuron, WeightHealth};

/// Handle to a neuron in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId(pub(crate) usize);

/// Handle to a connection in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub(crate) usize);

impl NeuronId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl ConnectionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) neurons: Vec<Neuron>,
    pub(crate) connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn add_neuron(&mut self, neuron: Neuron) -> NeuronId {
        self.neurons.push(neuron);
        NeuronId(self.neurons.len() - 1)
    }

    /// Registers a `source → destination` edge on both endpoints.
    pub fn connect(&mut self, source: NeuronId, destination: NeuronId, weight: f64) -> ConnectionId {
        let id = ConnectionId(self.connections.len());
        self.connections.push(Connection::new(source, destination, weight));
        self.neurons[source.0].outgoing.push(id);
        self.neurons[destination.0].incoming.push(id);
        id
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id.0]
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> &mut Neuron {
        &mut self.neurons[id.0]
    }

    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.0]
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// All connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Overwrites a weight and clears its momentum.
    pub fn set_weight(&mut self, id: ConnectionId, weight: f64) {
        let conn = &mut self.connections[id.0];
        conn.weight = weight;
        conn.delta_weight = 0.0;
    }
}
