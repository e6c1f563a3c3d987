//! A collection of single neuron models, discrete maps as well as conductance based
//! models integrated with Runge-Kutta, that share one state update interface.
//!
//! Every model kind has two parameter regimes ([`Regime::Bursting`] and [`Regime::Excitable`]),
//! a canonical initial state for each regime, and where one is known, a fixed point.
//! Models are advanced one timestep at a time either on their own ([`Model::time_step`])
//! or as members of a [`crate::network::NetworkModel`] where the incoming gap junction
//! currents are summed into a synaptic current ([`NeuronModel::time_step_networked`]).

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
pub mod integrate_and_fire;
use integrate_and_fire::{GlExpModel, LeakyIntegrateAndFireModel};
pub mod ktz;
use ktz::{KtzLogModel, KtzTanhModel};
pub mod izhikevich;
use izhikevich::IzhikevichModel;
pub mod rulkov;
use rulkov::RulkovModel;
pub mod hodgkin_huxley;
use hodgkin_huxley::{HodgkinHuxleyModel, LeechHodgkinHuxleyModel};
pub mod runge_kutta;
/// A derive macro to automatically implement [`StateVector`] for a struct of state variables.
pub mod state_vector_traits {
    pub use state_vector_traits::*;
}
use crate::error::ModelError;
use crate::network::GapJunction;


/// Canonical parameter and initial condition profile of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Spontaneous bursting or tonic activity
    Bursting,
    /// Quiescent until perturbed, settles at a fixed point
    Excitable,
}

impl Regime {
    /// Short suffix used when naming output files
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Regime::Bursting => "bst",
            Regime::Excitable => "exc",
        }
    }
}

impl Display for Regime {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Regime::Bursting => "Bursting",
            Regime::Excitable => "Excitable",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for Regime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "bursting" | "bst" => Ok(Regime::Bursting),
            "excitable" | "exc" => Ok(Regime::Excitable),
            _ => Err(ModelError::UnrecognizedRegime(s.to_string())),
        }
    }
}

/// The eight available neuron models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Leaky integrate and fire
    Lif,
    /// Stochastic generalized linear model with exponential firing probability
    GlExp,
    /// KTz map with hyperbolic tangent saturation
    KtzTanh,
    /// KTz map with logistic saturation
    KtzLog,
    /// Izhikevich map
    Izhikevich,
    /// Rulkov map
    Rulkov,
    /// Standard Hodgkin Huxley model
    HodgkinHuxley,
    /// Reduced Hodgkin Huxley model of a leech heart interneuron
    HodgkinHuxleyLeech,
}

impl ModelKind {
    /// Every model kind
    pub const ALL: [ModelKind; 8] = [
        ModelKind::Lif,
        ModelKind::GlExp,
        ModelKind::KtzTanh,
        ModelKind::KtzLog,
        ModelKind::Izhikevich,
        ModelKind::Rulkov,
        ModelKind::HodgkinHuxley,
        ModelKind::HodgkinHuxleyLeech,
    ];

    /// Stable name of the model used as a label and file key
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Lif => LeakyIntegrateAndFireModel::LABEL,
            ModelKind::GlExp => GlExpModel::LABEL,
            ModelKind::KtzTanh => KtzTanhModel::LABEL,
            ModelKind::KtzLog => KtzLogModel::LABEL,
            ModelKind::Izhikevich => IzhikevichModel::LABEL,
            ModelKind::Rulkov => RulkovModel::LABEL,
            ModelKind::HodgkinHuxley => HodgkinHuxleyModel::LABEL,
            ModelKind::HodgkinHuxleyLeech => LeechHodgkinHuxleyModel::LABEL,
        }
    }

    /// Whether the model has a fixed point derived for it
    pub fn has_known_fixed_point(&self) -> bool {
        !matches!(self, ModelKind::HodgkinHuxleyLeech)
    }

    /// Whether stepping the model consumes random numbers
    pub fn is_stochastic(&self) -> bool {
        matches!(self, ModelKind::GlExp)
    }

    /// Returns the conductance based model used for a regime, the leech model
    /// is the bursting Hodgkin Huxley model and the standard model is the excitable one
    pub fn conductance_based(regime: Regime) -> Self {
        match regime {
            Regime::Bursting => ModelKind::HodgkinHuxleyLeech,
            Regime::Excitable => ModelKind::HodgkinHuxley,
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ModelKind::Lif => "LIF",
            ModelKind::GlExp => "GLExp",
            ModelKind::KtzTanh => "KTzTanh",
            ModelKind::KtzLog => "KTzLog",
            ModelKind::Izhikevich => "Izhikevich",
            ModelKind::Rulkov => "Rulkov",
            ModelKind::HodgkinHuxley => "HodgkinHuxley",
            ModelKind::HodgkinHuxleyLeech => "HodgkinHuxleyLeech",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "lif" | "lifmodel" | "leakyintegrateandfire" => Ok(ModelKind::Lif),
            "glexp" | "glexpmodel" => Ok(ModelKind::GlExp),
            "ktztanh" | "ktztanhmodel" => Ok(ModelKind::KtzTanh),
            "ktzlog" | "ktzlogmodel" => Ok(ModelKind::KtzLog),
            "izhikevich" | "izhikevichmodel" => Ok(ModelKind::Izhikevich),
            "rulkov" | "rulkovmodel" => Ok(ModelKind::Rulkov),
            "hh" | "hhstd" | "hhstdmodel" | "hodgkinhuxley" => Ok(ModelKind::HodgkinHuxley),
            "hhleech" | "hhleechmodel" | "hodgkinhuxleyleech" => Ok(ModelKind::HodgkinHuxleyLeech),
            _ => Err(ModelError::UnrecognizedModel(s.to_string())),
        }
    }
}

pub(crate) fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Discretization constants of a model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTiming {
    /// Integration step
    pub dt: f64,
    /// Number of timesteps that correspond to one millisecond
    pub timesteps_per_ms: f64,
    /// Length of the transient to discard before steady state behavior
    pub transient_length: f64,
}

/// Exposes the state variables of a model as a flat vector, usually derived
/// with [`state_vector_traits::StateVector`]
pub trait StateVector {
    /// Number of state variables
    const DIMENSION: usize;
    /// Returns the state variables in order
    fn to_state_vector(&self) -> Vec<f64>;
    /// Overwrites the state variables in order, `values` must have
    /// at least [`StateVector::DIMENSION`] values
    fn load_state_vector(&mut self, values: &[f64]);
}

/// Update law of a single model kind, the synaptic current is always
/// passed in and is `0.` when the neuron is not coupled to anything
pub trait NeuronLaw: Clone + Send + Sync {
    /// State variables of the model
    type State: StateVector;
    /// Stable name of the model
    const LABEL: &'static str;
    /// Discretization constants of the model
    const TIMING: ModelTiming;
    /// Loads the bursting parameters and initial state
    fn set_bursting_params(&mut self);
    /// Loads the excitable parameters and initial state
    fn set_excitable_params(&mut self);
    /// Returns the state variables
    fn state(&self) -> &Self::State;
    /// Returns the state variables mutably
    fn state_mut(&mut self) -> &mut Self::State;
    /// Advances the model by one step given a synaptic current
    fn update(&mut self, synaptic_current: f64, dt: f64);
    /// Returns the variable interpreted as membrane potential
    fn get_potential(&self) -> f64;
    /// Sets the state to the fixed point of the model and returns it
    fn reset_to_fixed_point(&mut self) -> Vec<f64>;

    /// Loads the parameters and initial state of the given regime
    fn set_regime(&mut self, regime: Regime) {
        match regime {
            Regime::Bursting => self.set_bursting_params(),
            Regime::Excitable => self.set_excitable_params(),
        }
    }

    /// Overwrites the state from an already validated vector
    fn set_initial_condition(&mut self, values: &[f64]) {
        self.state_mut().load_state_vector(values);
    }
}

/// Shared interface of single neurons and networks of neurons that a driver
/// uses without knowing which concrete model it steps
pub trait Model {
    /// Reinitializes timing, parameters and state for a regime, `horizon` is the
    /// total time the caller intends to simulate
    fn reset(&mut self, regime: Regime, horizon: usize);
    /// Loads the bursting parameters and initial state
    fn set_bursting_params(&mut self);
    /// Loads the excitable parameters and initial state
    fn set_excitable_params(&mut self);
    /// Overwrites the state from a vector with one value per state variable
    fn set_initial_condition(&mut self, initial_condition: &[f64]) -> Result<(), ModelError>;
    /// Sets the state to the known fixed point and returns that state
    fn reset_to_fixed_point(&mut self) -> Vec<f64>;
    /// Advances exactly one timestep
    fn time_step(&mut self);
    /// Returns the membrane potential observable
    fn get_potential(&self) -> f64;
    /// Returns the potential of every neuron
    fn get_network_potentials(&self) -> Vec<f64>;
    /// Integration step
    fn dt(&self) -> f64;
    /// Number of timesteps per millisecond
    fn timesteps_per_ms(&self) -> f64;
    /// Transient length to discard
    fn transient_length(&self) -> f64;
    /// Whether the model is a network of neurons
    fn is_network(&self) -> bool;
    /// Number of neurons stepped
    fn neuron_count(&self) -> usize;
    /// Whether [`Model::reset_to_fixed_point`] reaches a true fixed point
    fn has_known_fixed_point(&self) -> bool;
    /// Human readable name used as a label and file key
    fn label(&self) -> String;
}

/// Per kind state of a [`NeuronModel`]
#[derive(Debug, Clone)]
pub enum NeuronDynamics {
    Lif(LeakyIntegrateAndFireModel),
    GlExp(GlExpModel),
    KtzTanh(KtzTanhModel),
    KtzLog(KtzLogModel),
    Izhikevich(IzhikevichModel),
    Rulkov(RulkovModel),
    HodgkinHuxley(HodgkinHuxleyModel),
    HodgkinHuxleyLeech(LeechHodgkinHuxleyModel),
}

macro_rules! dispatch {
    ($dynamics:expr, $law:ident => $body:expr) => {
        match $dynamics {
            NeuronDynamics::Lif($law) => $body,
            NeuronDynamics::GlExp($law) => $body,
            NeuronDynamics::KtzTanh($law) => $body,
            NeuronDynamics::KtzLog($law) => $body,
            NeuronDynamics::Izhikevich($law) => $body,
            NeuronDynamics::Rulkov($law) => $body,
            NeuronDynamics::HodgkinHuxley($law) => $body,
            NeuronDynamics::HodgkinHuxleyLeech($law) => $body,
        }
    };
}

fn timing_of<L: NeuronLaw>(_: &L) -> ModelTiming {
    L::TIMING
}

fn dimension_of<L: NeuronLaw>(_: &L) -> usize {
    L::State::DIMENSION
}

impl NeuronDynamics {
    /// Generates the dynamics of a model kind in a regime, the random source
    /// seeds the stochastic models
    pub fn new<R: Rng + ?Sized>(kind: ModelKind, regime: Regime, rng: &mut R) -> Self {
        match kind {
            ModelKind::Lif => NeuronDynamics::Lif(LeakyIntegrateAndFireModel::new(regime)),
            ModelKind::GlExp => NeuronDynamics::GlExp(
                GlExpModel::new(regime, StdRng::seed_from_u64(rng.gen()))
            ),
            ModelKind::KtzTanh => NeuronDynamics::KtzTanh(KtzTanhModel::new(regime)),
            ModelKind::KtzLog => NeuronDynamics::KtzLog(KtzLogModel::new(regime)),
            ModelKind::Izhikevich => NeuronDynamics::Izhikevich(IzhikevichModel::new(regime)),
            ModelKind::Rulkov => NeuronDynamics::Rulkov(RulkovModel::new(regime)),
            ModelKind::HodgkinHuxley => NeuronDynamics::HodgkinHuxley(HodgkinHuxleyModel::new(regime)),
            ModelKind::HodgkinHuxleyLeech => NeuronDynamics::HodgkinHuxleyLeech(
                LeechHodgkinHuxleyModel::new(regime)
            ),
        }
    }

    /// Returns the kind of model
    pub fn kind(&self) -> ModelKind {
        match self {
            NeuronDynamics::Lif(_) => ModelKind::Lif,
            NeuronDynamics::GlExp(_) => ModelKind::GlExp,
            NeuronDynamics::KtzTanh(_) => ModelKind::KtzTanh,
            NeuronDynamics::KtzLog(_) => ModelKind::KtzLog,
            NeuronDynamics::Izhikevich(_) => ModelKind::Izhikevich,
            NeuronDynamics::Rulkov(_) => ModelKind::Rulkov,
            NeuronDynamics::HodgkinHuxley(_) => ModelKind::HodgkinHuxley,
            NeuronDynamics::HodgkinHuxleyLeech(_) => ModelKind::HodgkinHuxleyLeech,
        }
    }

    /// Discretization constants of the model
    pub fn timing(&self) -> ModelTiming {
        dispatch!(self, law => timing_of(law))
    }

    /// Number of state variables
    pub fn dimension(&self) -> usize {
        dispatch!(self, law => dimension_of(law))
    }

    /// Returns the state variables in order
    pub fn state_vector(&self) -> Vec<f64> {
        dispatch!(self, law => law.state().to_state_vector())
    }

    fn set_regime(&mut self, regime: Regime) {
        dispatch!(self, law => law.set_regime(regime))
    }

    fn set_bursting_params(&mut self) {
        dispatch!(self, law => law.set_bursting_params())
    }

    fn set_excitable_params(&mut self) {
        dispatch!(self, law => law.set_excitable_params())
    }

    fn set_initial_condition(&mut self, values: &[f64]) {
        dispatch!(self, law => law.set_initial_condition(values))
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        dispatch!(self, law => law.reset_to_fixed_point())
    }

    fn update(&mut self, synaptic_current: f64, dt: f64) {
        dispatch!(self, law => law.update(synaptic_current, dt))
    }

    fn get_potential(&self) -> f64 {
        dispatch!(self, law => law.get_potential())
    }
}

/// A single neuron of any [`ModelKind`], when it belongs to a network it also
/// keeps the indices of its incoming gap junctions and the last summed
/// synaptic current
///
/// Example usage:
/// ```rust
/// use neuron_performance::neuron::{Model, ModelKind, NeuronModel, Regime};
///
/// let mut neuron = NeuronModel::new(ModelKind::Rulkov, Regime::Excitable, 1000);
///
/// let fixed_point = neuron.reset_to_fixed_point();
/// assert_eq!(fixed_point, vec![-0.6, -2.1625]);
///
/// neuron.time_step();
/// assert!((neuron.get_potential() - -0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct NeuronModel {
    /// Current regime
    regime: Regime,
    /// Total time requested at construction or reset
    horizon: usize,
    /// Discretization constants
    timing: ModelTiming,
    /// Model parameters and state
    dynamics: NeuronDynamics,
    /// Indices of incoming gap junctions
    inputs: Vec<usize>,
    /// Sum of incoming gap junction currents from the last networked step
    synaptic_current: f64,
}

impl NeuronModel {
    /// Generates a neuron, stochastic models are seeded from entropy
    pub fn new(kind: ModelKind, regime: Regime, horizon: usize) -> Self {
        let mut rng = StdRng::from_entropy();

        Self::with_rng(kind, regime, horizon, &mut rng)
    }

    /// Generates a neuron, stochastic models are seeded from the given random source
    pub fn with_rng<R: Rng + ?Sized>(kind: ModelKind, regime: Regime, horizon: usize, rng: &mut R) -> Self {
        let dynamics = NeuronDynamics::new(kind, regime, rng);

        NeuronModel {
            regime,
            horizon,
            timing: dynamics.timing(),
            dynamics,
            inputs: vec![],
            synaptic_current: 0.,
        }
    }

    /// Returns the kind of model
    pub fn kind(&self) -> ModelKind {
        self.dynamics.kind()
    }

    /// Returns the current regime
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Returns the total time requested at construction or reset
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Returns the parameters and state of the model
    pub fn dynamics(&self) -> &NeuronDynamics {
        &self.dynamics
    }

    /// Number of state variables
    pub fn dimension(&self) -> usize {
        self.dynamics.dimension()
    }

    /// Returns the state variables in order
    pub fn state_vector(&self) -> Vec<f64> {
        self.dynamics.state_vector()
    }

    /// Registers a gap junction (by index in the owning network) as an input
    pub fn add_input(&mut self, junction: usize) {
        self.inputs.push(junction);
    }

    /// Indices of incoming gap junctions
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Sum of incoming gap junction currents used in the last networked step
    pub fn synaptic_current(&self) -> f64 {
        self.synaptic_current
    }

    /// Sums the currents of the incoming gap junctions into the synaptic current
    /// then advances one timestep, `junctions` is the junction list of the
    /// owning network and must already be updated for this timestep
    pub fn time_step_networked(&mut self, junctions: &[GapJunction]) {
        self.synaptic_current = self.inputs.iter()
            .map(|&i| junctions[i].current())
            .sum();

        self.dynamics.update(self.synaptic_current, self.timing.dt);
    }

    // state produced by another neuron of the same kind, already the right shape
    pub(crate) fn load_state(&mut self, values: &[f64]) {
        self.dynamics.set_initial_condition(values);
    }

    fn validate_initial_condition(&self, initial_condition: &[f64]) -> Result<(), ModelError> {
        let expected = self.dimension();
        if initial_condition.len() != expected {
            return Err(ModelError::InitialConditionLength {
                model: self.label(),
                expected,
                found: initial_condition.len(),
            });
        }

        match initial_condition.iter().position(|value| !value.is_finite()) {
            Some(index) => Err(ModelError::NonFiniteInitialCondition { model: self.label(), index }),
            None => Ok(()),
        }
    }
}

impl Model for NeuronModel {
    fn reset(&mut self, regime: Regime, horizon: usize) {
        self.regime = regime;
        self.horizon = horizon;
        self.timing = self.dynamics.timing();
        self.synaptic_current = 0.;
        self.dynamics.set_regime(regime);
    }

    fn set_bursting_params(&mut self) {
        self.regime = Regime::Bursting;
        self.dynamics.set_bursting_params();
    }

    fn set_excitable_params(&mut self) {
        self.regime = Regime::Excitable;
        self.dynamics.set_excitable_params();
    }

    fn set_initial_condition(&mut self, initial_condition: &[f64]) -> Result<(), ModelError> {
        self.validate_initial_condition(initial_condition)?;
        self.dynamics.set_initial_condition(initial_condition);

        Ok(())
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.dynamics.reset_to_fixed_point()
    }

    fn time_step(&mut self) {
        self.dynamics.update(0., self.timing.dt);
    }

    fn get_potential(&self) -> f64 {
        self.dynamics.get_potential()
    }

    fn get_network_potentials(&self) -> Vec<f64> {
        vec![self.get_potential()]
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
        false
    }

    fn neuron_count(&self) -> usize {
        1
    }

    fn has_known_fixed_point(&self) -> bool {
        self.kind().has_known_fixed_point()
    }

    fn label(&self) -> String {
        self.kind().label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse() {
        assert_eq!("ktz_tanh".parse::<ModelKind>(), Ok(ModelKind::KtzTanh));
        assert_eq!("HHLeech".parse::<ModelKind>(), Ok(ModelKind::HodgkinHuxleyLeech));
        assert_eq!("Izhikevich".parse::<ModelKind>(), Ok(ModelKind::Izhikevich));
        assert_eq!("exc".parse::<Regime>(), Ok(Regime::Excitable));
        assert!(matches!("fitzhugh".parse::<ModelKind>(), Err(ModelError::UnrecognizedModel(_))));
        assert!(matches!("chaotic".parse::<Regime>(), Err(ModelError::UnrecognizedRegime(_))));
    }

    #[test]
    fn test_kind_round_trips_through_display() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.to_string().parse::<ModelKind>(), Ok(kind));
            assert_eq!(kind.label().parse::<ModelKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_initial_condition_validation() {
        let mut neuron = NeuronModel::new(ModelKind::Izhikevich, Regime::Excitable, 100);

        assert_eq!(
            neuron.set_initial_condition(&[1., 2., 3.]),
            Err(ModelError::InitialConditionLength {
                model: String::from("IzhikevichModel"),
                expected: 2,
                found: 3,
            })
        );
        assert_eq!(
            neuron.set_initial_condition(&[f64::NAN, 2.]),
            Err(ModelError::NonFiniteInitialCondition { model: String::from("IzhikevichModel"), index: 0 })
        );

        assert!(neuron.set_initial_condition(&[-60., -14.]).is_ok());
        assert_eq!(neuron.state_vector(), vec![-60., -14.]);
    }

    #[test]
    fn test_timing_follows_kind() {
        let neuron = NeuronModel::new(ModelKind::Izhikevich, Regime::Bursting, 100);
        assert_eq!(neuron.dt(), 1.);
        assert_eq!(neuron.timesteps_per_ms(), 5.);

        let neuron = NeuronModel::new(ModelKind::HodgkinHuxley, Regime::Excitable, 100);
        assert_eq!(neuron.dt(), 0.01);
        assert_eq!(neuron.timesteps_per_ms(), 100.);
        assert_eq!(neuron.transient_length(), 100.);
    }

    #[test]
    fn test_only_glexp_is_stochastic() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.is_stochastic(), kind == ModelKind::GlExp);
        }
    }
}
