use crate::activation::TransferFunction;
use crate::error::{NetError, Result};
use crate::graph::{Graph, Neuron, NeuronId, WeightHealth};
use crate::init::WeightSource;
use crate::optim::Momentum;

/// An ordered run of neurons in the arena, optionally ending with a bias neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Neuron count without the bias neuron.
    size: usize,
    has_bias: bool,
    neurons: Vec<NeuronId>,
}

impl Layer {
    /// Allocates `size` neurons (plus a bias neuron when `add_bias`) in `graph`.
    ///
    /// Each regular neuron starts with output `initializer() - 0.5`; the bias
    /// neuron, if any, is pinned at 1.0.
    pub fn new(graph: &mut Graph, size: usize, add_bias: bool, source: &mut WeightSource) -> Layer {
        let mut neurons: Vec<NeuronId> = (0..size)
            .map(|_| graph.add_neuron(Neuron::new(source.next_value() - 0.5)))
            .collect();
        if add_bias {
            neurons.push(graph.add_neuron(Neuron::bias()));
        }
        Layer { size, has_bias: add_bias, neurons }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn has_bias(&self) -> bool {
        self.has_bias
    }

    /// Every neuron, bias last.
    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    /// Regular neurons only.
    pub fn units(&self) -> &[NeuronId] {
        &self.neurons[..self.size]
    }

    pub fn bias(&self) -> Option<NeuronId> {
        if self.has_bias { self.neurons.last().copied() } else { None }
    }

    pub fn outputs(&self, graph: &Graph) -> Vec<f64> {
        self.units().iter().map(|&id| graph.neuron(id).output()).collect()
    }

    pub fn feed_forward(&self, graph: &mut Graph, transfer: TransferFunction) {
        for &id in &self.neurons {
            graph.feed_forward(id, transfer);
        }
    }

    /// `targets` must hold exactly one value per regular neuron.
    pub fn calc_output_gradients(
        &self,
        graph: &mut Graph,
        targets: &[f64],
        transfer: TransferFunction,
    ) -> Result<()> {
        if targets.len() != self.size {
            return Err(NetError::TargetSizeMismatch { expected: self.size, actual: targets.len() });
        }
        for (&id, &target) in self.units().iter().zip(targets) {
            graph.calc_output_gradient(id, target, transfer);
        }
        Ok(())
    }

    /// Includes the bias neuron; its gradient is computed but never consumed.
    pub fn calc_hidden_gradients(&self, graph: &mut Graph, transfer: TransferFunction) {
        for &id in &self.neurons {
            graph.calc_hidden_gradient(id, transfer);
        }
    }

    pub fn update_weights(&self, graph: &mut Graph, momentum: Momentum) -> WeightHealth {
        let mut health = WeightHealth::default();
        for &id in &self.neurons {
            health.merge(graph.update_input_weights(id, momentum));
        }
        health
    }

    /// Incoming weights of every neuron, in neuron then connection order.
    pub fn dump_weights<'a>(&'a self, graph: &'a Graph) -> impl Iterator<Item = f64> + Clone + 'a {
        self.neurons.iter().flat_map(move |&id| graph.dump_weights(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::Initializer;

    fn source() -> WeightSource {
        WeightSource::from_seed(Initializer::Uniform01, 3)
    }

    #[test]
    fn bias_is_appended_and_pinned() {
        let mut g = Graph::new();
        let layer = Layer::new(&mut g, 3, true, &mut source());
        assert_eq!(layer.size(), 3);
        assert_eq!(layer.neurons().len(), 4);
        let bias = layer.bias().unwrap();
        assert!(g.neuron(bias).is_bias());
        assert_eq!(g.neuron(bias).output(), 1.0);
        assert_eq!(layer.outputs(&g).len(), 3);
    }

    #[test]
    fn seeded_outputs_are_offset_by_half() {
        let mut g = Graph::new();
        let layer = Layer::new(&mut g, 16, false, &mut source());
        assert!(layer.bias().is_none());
        for out in layer.outputs(&g) {
            assert!((-0.5..0.5).contains(&out));
        }
    }

    #[test]
    fn target_length_is_checked() {
        let mut g = Graph::new();
        let layer = Layer::new(&mut g, 2, true, &mut source());
        let err = layer
            .calc_output_gradients(&mut g, &[1.0, 0.0, 1.0], TransferFunction::Tanh)
            .unwrap_err();
        assert!(matches!(err, NetError::TargetSizeMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn dump_walks_neurons_in_order() {
        let mut g = Graph::new();
        let mut src = source();
        let a = Layer::new(&mut g, 1, true, &mut src);
        let b = Layer::new(&mut g, 2, false, &mut src);
        for &dst in b.units() {
            for &s in a.neurons() {
                g.connect(s, dst, dst.index() as f64 * 10.0 + s.index() as f64);
            }
        }
        let dumped: Vec<f64> = b.dump_weights(&g).collect();
        assert_eq!(dumped, vec![20.0, 21.0, 30.0, 31.0]);
        assert_eq!(a.dump_weights(&g).count(), 0);
    }
}
