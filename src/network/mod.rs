//! Networks of identical neurons coupled through gap junctions.
//!
//! A network owns its neurons and junctions in two arenas, junctions refer to
//! neurons by index and neurons refer to their incoming junctions by index.
//! Every timestep runs in two phases: all junction currents are first
//! recomputed from a snapshot of the potentials taken before the step, then
//! every neuron advances with the sum of its incoming currents.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use log::debug;
use crate::error::{ModelError, NetworkError};
use crate::graph::Topology;
use crate::distribution::scale_uniformly;
use crate::neuron::{Model, ModelKind, ModelTiming, NeuronModel, Regime};


/// Calculates the current flowing from the presynaptic neuron into the
/// postsynaptic neuron through a gap junction with the given conductance
pub fn gap_junction<T: Model, U: Model>(presynaptic_neuron: &T, postsynaptic_neuron: &U, conductance: f64) -> f64 {
    conductance * (presynaptic_neuron.get_potential() - postsynaptic_neuron.get_potential())
}

/// Directed electrical synapse between two neurons of a network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapJunction {
    /// Index of the presynaptic neuron
    presynaptic: usize,
    /// Index of the postsynaptic neuron
    postsynaptic: usize,
    /// Coupling conductance
    conductance: f64,
    /// Current computed on the last timestep
    current: f64,
}

impl GapJunction {
    pub fn new(presynaptic: usize, postsynaptic: usize, conductance: f64) -> Self {
        GapJunction {
            presynaptic,
            postsynaptic,
            conductance,
            current: 0.,
        }
    }

    pub fn presynaptic(&self) -> usize {
        self.presynaptic
    }

    pub fn postsynaptic(&self) -> usize {
        self.postsynaptic
    }

    pub fn conductance(&self) -> f64 {
        self.conductance
    }

    /// Current computed on the last timestep
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Recomputes the current from the potentials of every neuron of the
    /// network, indexed like the network's neurons, taken before the timestep
    pub fn time_step(&mut self, potentials: &[f64]) {
        self.current = self.conductance * (potentials[self.presynaptic] - potentials[self.postsynaptic]);
    }

    /// Sets the current to zero
    pub fn reset(&mut self) {
        self.current = 0.;
    }
}

/// A network of `size` neurons of the same kind and regime whose connections
/// follow a [`Topology`] with a uniform coupling conductance
///
/// Example usage:
/// ```rust
/// use neuron_performance::graph::Topology;
/// use neuron_performance::neuron::{Model, ModelKind, Regime};
/// use neuron_performance::network::NetworkModel;
///
/// let mut network = NetworkModel::new(
///     ModelKind::Izhikevich, Regime::Excitable, 1000, Topology::Linear, 3, 0.1,
/// ).unwrap();
///
/// assert_eq!(network.label(), "Linear_IzhikevichExcitable");
/// assert_eq!(network.junctions().len(), 2);
///
/// network.time_step();
/// assert_eq!(network.get_network_potentials().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NetworkModel {
    topology: Topology,
    kind: ModelKind,
    regime: Regime,
    horizon: usize,
    size: usize,
    conductance: f64,
    timing: ModelTiming,
    neurons: Vec<NeuronModel>,
    junctions: Vec<GapJunction>,
    /// Source of neuron seeds and initial condition dispersal
    rng: StdRng,
    /// Whether to run both phases of a timestep on the rayon thread pool,
    /// results are identical to the sequential path
    pub parallel: bool,
}

impl NetworkModel {
    /// Generates a network, randomness is seeded from entropy
    pub fn new(
        kind: ModelKind,
        regime: Regime,
        horizon: usize,
        topology: Topology,
        size: usize,
        conductance: f64,
    ) -> Result<Self, NetworkError> {
        let mut rng = StdRng::from_entropy();

        Self::with_rng(kind, regime, horizon, topology, size, conductance, &mut rng)
    }

    /// Generates a network, randomness is seeded from the given random source
    pub fn with_rng<R: Rng + ?Sized>(
        kind: ModelKind,
        regime: Regime,
        horizon: usize,
        topology: Topology,
        size: usize,
        conductance: f64,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        if size == 0 {
            return Err(NetworkError::EmptyNetwork);
        }

        let mut network = NetworkModel {
            topology,
            kind,
            regime,
            horizon,
            size,
            conductance,
            timing: ModelTiming { dt: 0., timesteps_per_ms: 0., transient_length: 0. },
            neurons: vec![],
            junctions: vec![],
            rng: StdRng::seed_from_u64(rng.gen()),
            parallel: false,
        };
        network.initialize();

        Ok(network)
    }

    // builds neurons, wires the topology and seeds the initial state
    fn initialize(&mut self) {
        let (kind, regime, horizon) = (self.kind, self.regime, self.horizon);
        self.neurons = (0..self.size)
            .map(|_| NeuronModel::with_rng(kind, regime, horizon, &mut self.rng))
            .collect();
        self.timing = ModelTiming {
            dt: self.neurons[0].dt(),
            timesteps_per_ms: self.neurons[0].timesteps_per_ms(),
            transient_length: self.neurons[0].transient_length(),
        };

        self.junctions = self.topology.connections(self.size)
            .into_iter()
            .map(|(presynaptic, postsynaptic)| GapJunction::new(presynaptic, postsynaptic, self.conductance))
            .collect();
        for (index, junction) in self.junctions.iter().enumerate() {
            self.neurons[junction.postsynaptic()].add_input(index);
        }

        match self.topology {
            Topology::Linear => {
                // a single excitation starts at the head of the chain
                self.neurons.iter_mut().for_each(|neuron| { neuron.reset_to_fixed_point(); });
                self.neurons[0].reset(regime, horizon);
            },
            Topology::MeanField => {
                let fixed_point = self.neurons[0].reset_to_fixed_point();
                for neuron in self.neurons.iter_mut() {
                    let initial_condition = scale_uniformly(&fixed_point, &mut self.rng);
                    neuron.load_state(&initial_condition);
                }
            },
        }

        debug!(
            "Built {} with {} neurons and {} gap junctions (g = {})",
            self.label(), self.size, self.junctions.len(), self.conductance,
        );
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Uniform coupling conductance of every junction
    pub fn conductance(&self) -> f64 {
        self.conductance
    }

    pub fn neurons(&self) -> &[NeuronModel] {
        &self.neurons
    }

    pub fn junctions(&self) -> &[GapJunction] {
        &self.junctions
    }

    /// Currents of every junction computed on the last timestep, in junction order
    pub fn junction_currents(&self) -> Vec<f64> {
        self.junctions.iter().map(|junction| junction.current()).collect()
    }

    /// Overwrites the state of a single neuron
    pub fn set_neuron_initial_condition(
        &mut self,
        index: usize,
        initial_condition: &[f64],
    ) -> Result<(), NetworkError> {
        let size = self.size;
        let neuron = self.neurons.get_mut(index)
            .ok_or(NetworkError::NeuronIndexOutOfRange { index, size })?;

        neuron.set_initial_condition(initial_condition)?;

        Ok(())
    }

    fn update_junctions(&mut self, potentials: &[f64]) {
        if self.parallel {
            self.junctions.par_iter_mut()
                .for_each(|junction| junction.time_step(potentials));
        } else {
            self.junctions.iter_mut()
                .for_each(|junction| junction.time_step(potentials));
        }
    }

    fn update_neurons(&mut self) {
        let junctions = &self.junctions;
        if self.parallel {
            self.neurons.par_iter_mut()
                .for_each(|neuron| neuron.time_step_networked(junctions));
        } else {
            self.neurons.iter_mut()
                .for_each(|neuron| neuron.time_step_networked(junctions));
        }
    }
}

impl Model for NetworkModel {
    fn reset(&mut self, regime: Regime, horizon: usize) {
        self.regime = regime;
        self.horizon = horizon;
        self.initialize();
    }

    fn set_bursting_params(&mut self) {
        self.regime = Regime::Bursting;
        self.neurons.iter_mut().for_each(|neuron| neuron.set_bursting_params());
    }

    fn set_excitable_params(&mut self) {
        self.regime = Regime::Excitable;
        self.neurons.iter_mut().for_each(|neuron| neuron.set_excitable_params());
    }

    fn set_initial_condition(&mut self, initial_condition: &[f64]) -> Result<(), ModelError> {
        // neurons share a kind so either the first one fails or none do
        self.neurons.iter_mut()
            .try_for_each(|neuron| neuron.set_initial_condition(initial_condition))
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.junctions.iter_mut().for_each(|junction| junction.reset());
        let fixed_points: Vec<Vec<f64>> = self.neurons.iter_mut()
            .map(|neuron| neuron.reset_to_fixed_point())
            .collect();

        fixed_points.into_iter().next().unwrap_or_default()
    }

    fn time_step(&mut self) {
        let potentials = self.get_network_potentials();

        self.update_junctions(&potentials);
        self.update_neurons();
    }

    // sum of the potentials, see `get_network_potentials` for each neuron
    fn get_potential(&self) -> f64 {
        self.neurons.iter().map(|neuron| neuron.get_potential()).sum()
    }

    fn get_network_potentials(&self) -> Vec<f64> {
        self.neurons.iter().map(|neuron| neuron.get_potential()).collect()
    }

    fn dt(&self) -> f64 {
        self.timing.dt
    }

    fn timesteps_per_ms(&self) -> f64 {
        self.timing.timesteps_per_ms
    }

    fn transient_length(&self) -> f64 {
        self.timing.transient_length
    }

    fn is_network(&self) -> bool {
        true
    }

    fn neuron_count(&self) -> usize {
        self.size
    }

    fn has_known_fixed_point(&self) -> bool {
        self.kind.has_known_fixed_point()
    }

    fn label(&self) -> String {
        format!("{}_{}{}", self.topology, self.kind, self.regime)
    }
}
