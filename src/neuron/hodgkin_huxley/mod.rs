//! Conductance based neurons integrated with fourth order Runge-Kutta, the
//! standard Hodgkin Huxley squid axon model and a reduced three dimensional
//! model of a leech heart interneuron.

use state_vector_traits::StateVector;
use super::{ModelTiming, NeuronLaw, Regime, StateVector};
use super::runge_kutta::runge_kutta_4;


const HODGKIN_HUXLEY_TIMING: ModelTiming = ModelTiming {
    dt: 0.01,
    timesteps_per_ms: 100.,
    transient_length: 100.,
};

/// Exponential rate, `c * exp(s * (v - theta))`
fn exponential_rate(c: f64, theta: f64, s: f64, v: f64) -> f64 {
    c * (s * (v - theta)).exp()
}

/// Sigmoidal rate, `c / (1 + exp(s * (v - theta)))`
fn sigmoid_rate(c: f64, theta: f64, s: f64, v: f64) -> f64 {
    c / (1. + (s * (v - theta)).exp())
}

/// Linear over exponential rate, `c * (v - theta) / (1 - exp(s * (v - theta)))`,
/// at `v == theta` the removable singularity is replaced by its limit `-c / s`
fn linoid_rate(c: f64, theta: f64, s: f64, v: f64) -> f64 {
    let exponent = s * (v - theta);
    if exponent.abs() < f64::EPSILON {
        return -c / s;
    }

    c * (v - theta) / -exponent.exp_m1()
}

/// Parameters of the standard Hodgkin Huxley model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HodgkinHuxleyParameters {
    /// Maximal sodium conductance (mS/cm²)
    pub g_na: f64,
    /// Sodium reversal potential (mV)
    pub e_na: f64,
    /// Maximal potassium conductance (mS/cm²)
    pub g_k: f64,
    /// Potassium reversal potential (mV)
    pub e_k: f64,
    /// Total leak conductance (mS/cm²)
    pub g_l: f64,
    /// Leak reversal potential (mV)
    pub e_l: f64,
    /// Membrane capacitance (μF/cm²)
    pub c_m: f64,
    /// External input current (μA/cm²)
    pub i_ext: f64,
}

impl HodgkinHuxleyParameters {
    pub fn excitable() -> Self {
        let (g_leak_na, g_leak_k, g_leak_cl) = (0.0265, 0.07, 0.1);
        let (e_na, e_k, e_leak_cl) = (52.4, -72.1, -57.2);
        let g_l = g_leak_k + g_leak_na + g_leak_cl;

        HodgkinHuxleyParameters {
            g_na: 120.,
            e_na,
            g_k: 36.,
            e_k,
            g_l,
            e_l: (g_leak_k * e_k + g_leak_na * e_na + g_leak_cl * e_leak_cl) / g_l,
            c_m: 1.,
            i_ext: 0.,
        }
    }

    pub fn bursting() -> Self {
        HodgkinHuxleyParameters {
            i_ext: 3.7161,
            ..Self::excitable()
        }
    }
}

/// State of the standard Hodgkin Huxley model, ordered `[V, n, m, h]`
#[derive(Debug, Clone, Copy, PartialEq, StateVector)]
pub struct HodgkinHuxleyState {
    /// Membrane potential (mV)
    pub v: f64,
    /// Potassium activation
    pub n: f64,
    /// Sodium activation
    pub m: f64,
    /// Sodium inactivation
    pub h: f64,
}

impl HodgkinHuxleyState {
    /// Resting state without input current
    pub const FIXED_POINT: HodgkinHuxleyState = HodgkinHuxleyState {
        v: -62.698490240702419,
        n: 0.353721170200369,
        m: 0.069236269218388,
        h: 0.514071155409594,
    };

    pub fn initial() -> Self {
        HodgkinHuxleyState {
            v: -59.,
            ..Self::FIXED_POINT
        }
    }
}

/// Standard four dimensional Hodgkin Huxley neuron
#[derive(Debug, Clone, PartialEq)]
pub struct HodgkinHuxleyModel {
    pub params: HodgkinHuxleyParameters,
    pub state: HodgkinHuxleyState,
}

impl Default for HodgkinHuxleyModel {
    fn default() -> Self {
        HodgkinHuxleyModel {
            params: HodgkinHuxleyParameters::excitable(),
            state: HodgkinHuxleyState::initial(),
        }
    }
}

impl HodgkinHuxleyModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }

    /// Time derivative of `[V, n, m, h]` under a synaptic current
    pub fn derivative(&self, state: &[f64; 4], synaptic_current: f64) -> [f64; 4] {
        let p = &self.params;
        let [v, n, m, h] = *state;

        let dh = exponential_rate(0.07, -65., -0.05, v) * (1. - h) - sigmoid_rate(1., -35., -0.1, v) * h;
        let dm = linoid_rate(0.1, -40., -0.1, v) * (1. - m) - exponential_rate(4., -65., -0.056, v) * m;
        let dn = linoid_rate(0.01, -55., -0.1, v) * (1. - n) - exponential_rate(0.125, -65., -0.013, v) * n;

        let n4 = n * n * n * n;
        let m3 = m * m * m;
        let dv = (
            p.i_ext + synaptic_current
            - p.g_k * n4 * (v - p.e_k)
            - p.g_na * m3 * h * (v - p.e_na)
            - p.g_l * (v - p.e_l)
        ) / p.c_m;

        [dv, dn, dm, dh]
    }
}

impl NeuronLaw for HodgkinHuxleyModel {
    type State = HodgkinHuxleyState;

    const LABEL: &'static str = "HHStdModel";
    const TIMING: ModelTiming = HODGKIN_HUXLEY_TIMING;

    fn set_bursting_params(&mut self) {
        self.params = HodgkinHuxleyParameters::bursting();
        self.state = HodgkinHuxleyState::initial();
    }

    fn set_excitable_params(&mut self) {
        self.params = HodgkinHuxleyParameters::excitable();
        self.state = HodgkinHuxleyState::initial();
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, dt: f64) {
        let next = runge_kutta_4(
            &self.state.to_array(),
            dt,
            |state| self.derivative(state, synaptic_current),
        );

        self.state = HodgkinHuxleyState::from_array(next);
    }

    fn get_potential(&self) -> f64 {
        self.state.v
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = HodgkinHuxleyState::FIXED_POINT;

        self.state.to_state_vector()
    }
}

/// Parameters of the leech heart interneuron model, in SI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeechHodgkinHuxleyParameters {
    /// Potassium (K2) conductance (S)
    pub g_k2: f64,
    /// Leak conductance (S)
    pub g_l: f64,
    /// Sodium conductance (S)
    pub g_na: f64,
    /// Potassium reversal potential (V)
    pub e_k: f64,
    /// Sodium reversal potential (V)
    pub e_na: f64,
    /// Leak reversal potential (V)
    pub e_l: f64,
    /// Membrane capacitance (F)
    pub c_m: f64,
    /// Shift of the K2 activation curve (V)
    pub v_k2_shift: f64,
    /// K2 activation time constant (s)
    pub tau_k2: f64,
    /// Sodium inactivation time constant (s)
    pub tau_na: f64,
    pub a_h_na: f64,
    pub b_h_na: f64,
    pub a_m_k2: f64,
    pub b_m_k2: f64,
    pub a_v: f64,
    pub b_v: f64,
    /// External input current (A)
    pub i_ext: f64,
}

impl LeechHodgkinHuxleyParameters {
    pub fn bursting() -> Self {
        LeechHodgkinHuxleyParameters {
            g_k2: 30.0e-9,
            g_l: 8.0e-9,
            g_na: 160.0e-9,
            e_k: -0.07,
            e_na: 0.045,
            e_l: -0.046,
            c_m: 0.5e-9,
            v_k2_shift: -0.0228,
            tau_k2: 0.9,
            tau_na: 0.0405,
            a_h_na: 500.,
            b_h_na: 0.0325,
            a_m_k2: -83.,
            b_m_k2: 0.018,
            a_v: -150.,
            b_v: 0.0305,
            i_ext: 0.0062e-9,
        }
    }

    pub fn excitable() -> Self {
        LeechHodgkinHuxleyParameters {
            v_k2_shift: 0.0248,
            ..Self::bursting()
        }
    }
}

/// State of the leech model, ordered `[V, m_K2, h_Na]`
#[derive(Debug, Clone, Copy, PartialEq, StateVector)]
pub struct LeechHodgkinHuxleyState {
    /// Membrane potential (V)
    pub v: f64,
    /// Potassium (K2) activation
    pub m_k2: f64,
    /// Sodium inactivation
    pub h_na: f64,
}

impl LeechHodgkinHuxleyState {
    pub fn initial() -> Self {
        LeechHodgkinHuxleyState { v: -0.05, m_k2: 0.3, h_na: 0.3 }
    }
}

fn leech_activation(a: f64, b: f64, v: f64) -> f64 {
    1. / (1. + (a * (v + b)).exp())
}

/// Reduced Hodgkin Huxley model of a leech heart interneuron
#[derive(Debug, Clone, PartialEq)]
pub struct LeechHodgkinHuxleyModel {
    pub params: LeechHodgkinHuxleyParameters,
    pub state: LeechHodgkinHuxleyState,
}

impl Default for LeechHodgkinHuxleyModel {
    fn default() -> Self {
        LeechHodgkinHuxleyModel {
            params: LeechHodgkinHuxleyParameters::bursting(),
            state: LeechHodgkinHuxleyState::initial(),
        }
    }
}

impl LeechHodgkinHuxleyModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }

    /// Time derivative of `[V, m_K2, h_Na]` under a synaptic current
    pub fn derivative(&self, state: &[f64; 3], synaptic_current: f64) -> [f64; 3] {
        let p = &self.params;
        let [v, m_k2, h_na] = *state;

        let sodium_activation = leech_activation(p.a_v, p.b_v, v);
        let dh_na = (leech_activation(p.a_h_na, p.b_h_na, v) - h_na) / p.tau_na;
        let dm_k2 = (leech_activation(p.a_m_k2, p.b_m_k2 + p.v_k2_shift, v) - m_k2) / p.tau_k2;
        let dv = -(
            p.i_ext + synaptic_current
            + p.g_k2 * m_k2 * m_k2 * (v - p.e_k)
            + p.g_na * h_na * (v - p.e_na) * sodium_activation.powi(3)
            + p.g_l * (v - p.e_l)
        ) / p.c_m;

        [dv, dm_k2, dh_na]
    }
}

impl NeuronLaw for LeechHodgkinHuxleyModel {
    type State = LeechHodgkinHuxleyState;

    const LABEL: &'static str = "HHLeechModel";
    const TIMING: ModelTiming = HODGKIN_HUXLEY_TIMING;

    fn set_bursting_params(&mut self) {
        self.params = LeechHodgkinHuxleyParameters::bursting();
        self.state = LeechHodgkinHuxleyState::initial();
    }

    fn set_excitable_params(&mut self) {
        self.params = LeechHodgkinHuxleyParameters::excitable();
        self.state = LeechHodgkinHuxleyState::initial();
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, dt: f64) {
        let next = runge_kutta_4(
            &self.state.to_array(),
            dt,
            |state| self.derivative(state, synaptic_current),
        );

        self.state = LeechHodgkinHuxleyState::from_array(next);
    }

    fn get_potential(&self) -> f64 {
        self.state.v
    }

    // no fixed point is known, the current state is kept
    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state.to_state_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leak_reversal_is_conductance_weighted() {
        let params = HodgkinHuxleyParameters::excitable();

        assert!((params.g_l - 0.1965).abs() < 1e-12);
        let expected = (0.07 * -72.1 + 0.0265 * 52.4 + 0.1 * -57.2) / 0.1965;
        assert!((params.e_l - expected).abs() < 1e-12);
        assert_eq!(HodgkinHuxleyParameters::bursting().i_ext, 3.7161);
    }

    #[test]
    fn test_fixed_point_has_vanishing_derivative() {
        let model = HodgkinHuxleyModel::new(Regime::Excitable);
        let derivative = model.derivative(&HodgkinHuxleyState::FIXED_POINT.to_array(), 0.);

        for value in derivative {
            assert!(value.abs() < 1e-9, "derivative: {:?}", derivative);
        }
    }

    #[test]
    fn test_state_order() {
        let mut model = HodgkinHuxleyModel::new(Regime::Excitable);
        model.set_initial_condition(&[-60., 0.3, 0.05, 0.6]);

        assert_eq!(model.state.v, -60.);
        assert_eq!(model.state.n, 0.3);
        assert_eq!(model.state.m, 0.05);
        assert_eq!(model.state.h, 0.6);

        let mut leech = LeechHodgkinHuxleyModel::new(Regime::Bursting);
        leech.set_initial_condition(&[-0.04, 0.2, 0.1]);
        assert_eq!(leech.state.to_state_vector(), vec![-0.04, 0.2, 0.1]);
        assert_eq!(leech.get_potential(), -0.04);
    }

    #[test]
    fn test_leech_fixed_point_keeps_state() {
        let mut leech = LeechHodgkinHuxleyModel::new(Regime::Excitable);
        for _ in 0..100 {
            leech.update(0., 0.01);
        }
        let before = leech.state;

        let returned = leech.reset_to_fixed_point();

        assert_eq!(leech.state, before);
        assert_eq!(returned, before.to_state_vector());
    }

    #[test]
    fn test_excitable_settles() {
        let mut model = HodgkinHuxleyModel::new(Regime::Excitable);
        for _ in 0..(200. / 0.01) as usize {
            model.update(0., 0.01);
        }

        assert!((model.state.v - HodgkinHuxleyState::FIXED_POINT.v).abs() < 1e-3);
    }

    #[test]
    fn test_linoid_rate_is_continuous_at_its_singularity() {
        for (c, theta, s) in [(0.1, -40., -0.1), (0.01, -55., -0.1)] {
            let limit = linoid_rate(c, theta, s, theta);

            assert_eq!(limit, -c / s);
            assert!((linoid_rate(c, theta, s, theta + 1e-7) - limit).abs() < 1e-8);
            assert!((linoid_rate(c, theta, s, theta - 1e-7) - limit).abs() < 1e-8);
        }
    }

    #[test]
    fn test_stepping_through_gate_singularities_stays_finite() {
        for v in [-40., -55.] {
            let mut model = HodgkinHuxleyModel::new(Regime::Excitable);
            model.set_initial_condition(&[v, 0.35, 0.07, 0.5]);

            for _ in 0..1000 {
                model.update(0., 0.01);
                assert!(
                    model.state.to_state_vector().iter().all(|value| value.is_finite()),
                    "state from V = {} became {:?}", v, model.state,
                );
            }
        }
    }

    #[test]
    fn test_synaptic_current_drives_voltage() {
        let model = HodgkinHuxleyModel::new(Regime::Excitable);
        let state = HodgkinHuxleyState::initial().to_array();

        let uncoupled = model.derivative(&state, 0.);
        let coupled = model.derivative(&state, 2.5);

        assert!((coupled[0] - uncoupled[0] - 2.5 / model.params.c_m).abs() < 1e-12);
        assert_eq!(&coupled[1..], &uncoupled[1..]);

        let mut depolarized = HodgkinHuxleyModel::new(Regime::Excitable);
        let mut resting = HodgkinHuxleyModel::new(Regime::Excitable);
        depolarized.update(2.5, 0.01);
        resting.update(0., 0.01);
        assert!(depolarized.state.v > resting.state.v);
    }

    #[test]
    fn test_leech_synaptic_current_is_outward() {
        let model = LeechHodgkinHuxleyModel::new(Regime::Bursting);
        let state = LeechHodgkinHuxleyState::initial().to_array();

        let uncoupled = model.derivative(&state, 0.);
        let coupled = model.derivative(&state, 1.0e-10);

        let expected = -1.0e-10 / model.params.c_m;
        assert!((coupled[0] - uncoupled[0] - expected).abs() < 1e-9 * expected.abs());
        assert_eq!(&coupled[1..], &uncoupled[1..]);

        let mut coupled_model = LeechHodgkinHuxleyModel::new(Regime::Bursting);
        let mut uncoupled_model = LeechHodgkinHuxleyModel::new(Regime::Bursting);
        coupled_model.update(1.0e-10, 0.01);
        uncoupled_model.update(0., 0.01);
        assert!(coupled_model.state.v < uncoupled_model.state.v);
    }
}
