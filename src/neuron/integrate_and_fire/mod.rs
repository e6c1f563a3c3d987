//! Integrate and fire models, a deterministic leaky integrate and fire neuron
//! and a stochastic generalized linear model whose spikes are drawn with an
//! exponential firing probability.

use rand::{rngs::StdRng, Rng};
use state_vector_traits::StateVector;
use super::{ModelTiming, NeuronLaw, Regime, StateVector};


/// Parameters of the leaky integrate and fire neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakyIntegrateAndFireParameters {
    /// Membrane time constant
    pub tau: f64,
    /// External input current
    pub i_ext: f64,
    /// Voltage reset value
    pub v_reset: f64,
    /// Voltage threshold
    pub v_th: f64,
}

impl LeakyIntegrateAndFireParameters {
    pub fn bursting() -> Self {
        LeakyIntegrateAndFireParameters {
            tau: 20.,
            i_ext: 30.,
            v_reset: 10.,
            v_th: 20.,
        }
    }

    // both regimes share one parameter set
    pub fn excitable() -> Self {
        Self::bursting()
    }
}

/// State of an integrate and fire neuron
#[derive(Debug, Clone, Copy, PartialEq, StateVector)]
pub struct IntegrateAndFireState {
    /// Membrane potential
    pub v: f64,
}

impl IntegrateAndFireState {
    /// Resting state used as the fixed point
    pub const FIXED_POINT: IntegrateAndFireState = IntegrateAndFireState { v: 0. };

    pub fn bursting() -> Self {
        IntegrateAndFireState { v: 0. }
    }

    pub fn excitable() -> Self {
        IntegrateAndFireState { v: 0. }
    }
}

/// A leaky integrate and fire neuron without refractoriness, voltage is reset
/// on the step after crossing the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct LeakyIntegrateAndFireModel {
    pub params: LeakyIntegrateAndFireParameters,
    pub state: IntegrateAndFireState,
}

impl Default for LeakyIntegrateAndFireModel {
    fn default() -> Self {
        LeakyIntegrateAndFireModel {
            params: LeakyIntegrateAndFireParameters::bursting(),
            state: IntegrateAndFireState::bursting(),
        }
    }
}

impl LeakyIntegrateAndFireModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }

    /// Calculates the change in voltage given a synaptic current
    pub fn get_dv_change(&self, synaptic_current: f64, dt: f64) -> f64 {
        dt * (-self.state.v / self.params.tau + self.params.i_ext + synaptic_current)
    }
}

impl NeuronLaw for LeakyIntegrateAndFireModel {
    type State = IntegrateAndFireState;

    const LABEL: &'static str = "LIFModel";
    const TIMING: ModelTiming = ModelTiming {
        dt: 0.1,
        timesteps_per_ms: 10.,
        transient_length: 1000.,
    };

    fn set_bursting_params(&mut self) {
        self.params = LeakyIntegrateAndFireParameters::bursting();
        self.state = IntegrateAndFireState::bursting();
    }

    fn set_excitable_params(&mut self) {
        self.params = LeakyIntegrateAndFireParameters::excitable();
        self.state = IntegrateAndFireState::excitable();
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, dt: f64) {
        if self.state.v > self.params.v_th {
            self.state.v = self.params.v_reset;
        } else {
            self.state.v += self.get_dv_change(synaptic_current, dt);
        }
    }

    fn get_potential(&self) -> f64 {
        self.state.v
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = IntegrateAndFireState::FIXED_POINT;

        self.state.to_state_vector()
    }
}

/// Parameters of the generalized linear model with exponential firing probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlExpParameters {
    /// Firing probability scale
    pub a: f64,
    /// Potential at which the firing probability equals `a`
    pub v_m: f64,
    /// Sharpness of the firing probability
    pub v_s: f64,
    /// Membrane time constant
    pub tau: f64,
    /// External input current
    pub i_ext: f64,
    /// Voltage reset value
    pub v_reset: f64,
}

impl GlExpParameters {
    pub fn bursting() -> Self {
        GlExpParameters {
            a: 1. / 27.07,
            v_m: 20.,
            v_s: 1.2,
            tau: 20.,
            i_ext: 30.,
            v_reset: 10.,
        }
    }

    pub fn excitable() -> Self {
        Self::bursting()
    }
}

/// A stochastic integrate and fire model, after each step whether the neuron
/// fires is drawn with probability `a * exp((v - v_m) / v_s)` and a firing
/// neuron is reset on the next step
#[derive(Debug, Clone)]
pub struct GlExpModel {
    pub params: GlExpParameters,
    pub state: IntegrateAndFireState,
    /// Whether the neuron fired on the last step
    pub is_spiking: bool,
    /// Random source used to draw spikes
    rng: StdRng,
}

impl GlExpModel {
    /// Generates the model with the parameters of the given regime, spikes are
    /// drawn from `rng`
    pub fn new(regime: Regime, rng: StdRng) -> Self {
        let mut model = GlExpModel {
            params: GlExpParameters::bursting(),
            state: IntegrateAndFireState::bursting(),
            is_spiking: false,
            rng,
        };
        model.set_regime(regime);

        model
    }

    /// Probability of firing at the current potential
    pub fn firing_probability(&self) -> f64 {
        self.params.a * ((self.state.v - self.params.v_m) / self.params.v_s).exp()
    }
}

impl NeuronLaw for GlExpModel {
    type State = IntegrateAndFireState;

    const LABEL: &'static str = "GLExpModel";
    const TIMING: ModelTiming = ModelTiming {
        dt: 0.1,
        timesteps_per_ms: 10.,
        transient_length: 1000.,
    };

    fn set_bursting_params(&mut self) {
        self.params = GlExpParameters::bursting();
        self.state = IntegrateAndFireState::bursting();
        self.is_spiking = false;
    }

    fn set_excitable_params(&mut self) {
        self.params = GlExpParameters::excitable();
        self.state = IntegrateAndFireState::excitable();
        self.is_spiking = false;
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, dt: f64) {
        if self.is_spiking {
            self.state.v = self.params.v_reset;
        } else {
            self.state.v += dt * (-self.state.v / self.params.tau + self.params.i_ext + synaptic_current);
        }

        self.is_spiking = self.rng.gen::<f64>() < self.firing_probability();
    }

    fn get_potential(&self) -> f64 {
        self.state.v
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = IntegrateAndFireState::FIXED_POINT;
        self.is_spiking = false;

        self.state.to_state_vector()
    }

    fn set_initial_condition(&mut self, values: &[f64]) {
        self.state.load_state_vector(values);
        self.is_spiking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_lif_resets_above_threshold() {
        let mut lif = LeakyIntegrateAndFireModel::new(Regime::Bursting);
        lif.state.v = 20.5;

        lif.update(0., 0.1);
        assert_eq!(lif.state.v, 10.);

        lif.update(0., 0.1);
        assert!((lif.state.v - (10. + 0.1 * (-10. / 20. + 30.))).abs() < 1e-12);
    }

    #[test]
    fn test_lif_fires_periodically() {
        let mut lif = LeakyIntegrateAndFireModel::new(Regime::Excitable);

        let mut resets = 0;
        for _ in 0..1000 {
            let before = lif.state.v;
            lif.update(0., 0.1);
            if lif.state.v < before {
                resets += 1;
            }
        }

        assert!(resets > 1);
    }

    #[test]
    fn test_glexp_is_reproducible_with_seed() {
        let mut first = GlExpModel::new(Regime::Bursting, StdRng::seed_from_u64(7));
        let mut second = GlExpModel::new(Regime::Bursting, StdRng::seed_from_u64(7));

        for _ in 0..5000 {
            first.update(0., 0.1);
            second.update(0., 0.1);
            assert_eq!(first.state.v, second.state.v);
            assert_eq!(first.is_spiking, second.is_spiking);
        }
    }

    #[test]
    fn test_glexp_spike_resets_voltage() {
        let mut glexp = GlExpModel::new(Regime::Bursting, StdRng::seed_from_u64(1));

        let mut spiked = false;
        for _ in 0..10000 {
            let was_spiking = glexp.is_spiking;
            glexp.update(0., 0.1);
            if was_spiking {
                assert_eq!(glexp.state.v, glexp.params.v_reset);
                spiked = true;
            }
        }

        assert!(spiked);
    }

    #[test]
    fn test_glexp_initial_condition_clears_spike() {
        let mut glexp = GlExpModel::new(Regime::Excitable, StdRng::seed_from_u64(3));
        glexp.is_spiking = true;

        glexp.set_initial_condition(&[5.]);
        assert_eq!(glexp.state.v, 5.);
        assert!(!glexp.is_spiking);
    }

    #[test]
    fn test_lif_adds_synaptic_current() {
        let mut lif = LeakyIntegrateAndFireModel::new(Regime::Excitable);
        lif.state.v = 5.;

        lif.update(2., 0.1);

        assert!((lif.state.v - (5. + 0.1 * (-5. / 20. + 30. + 2.))).abs() < 1e-12);

        let mut inhibited = LeakyIntegrateAndFireModel::new(Regime::Excitable);
        inhibited.state.v = 5.;
        inhibited.update(-2., 0.1);
        assert!((lif.state.v - inhibited.state.v - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_glexp_adds_synaptic_current() {
        let mut glexp = GlExpModel::new(Regime::Excitable, StdRng::seed_from_u64(5));
        glexp.state.v = 5.;

        glexp.update(2., 0.1);

        assert!((glexp.state.v - (5. + 0.1 * (-5. / 20. + 30. + 2.))).abs() < 1e-12);

        let mut inhibited = GlExpModel::new(Regime::Excitable, StdRng::seed_from_u64(5));
        inhibited.state.v = 5.;
        inhibited.update(-2., 0.1);
        assert!((glexp.state.v - inhibited.state.v - 0.4).abs() < 1e-12);
    }
}
