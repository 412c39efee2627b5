use super::NeuronId;

/// A directed, weighted edge between two neurons of adjacent layers.
///
/// Owned by the [`Graph`](super::Graph) arena; neurons only hold its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub(crate) source: NeuronId,
    pub(crate) destination: NeuronId,
    pub(crate) weight: f64,
    /// Last applied update, read back as momentum on the next one.
    pub(crate) delta_weight: f64,
}

impl Connection {
    pub fn new(source: NeuronId, destination: NeuronId, weight: f64) -> Connection {
        Connection { source, destination, weight, delta_weight: 0.0 }
    }

    pub fn source(&self) -> NeuronId {
        self.source
    }

    pub fn destination(&self) -> NeuronId {
        self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn delta_weight(&self) -> f64 {
        self.delta_weight
    }
}
