//! KTz (Kinouchi-Tragtenberg) map neurons with a slow `z` current, in the
//! hyperbolic tangent form and in the logistic form which replaces the
//! tangent with the piecewise rational saturation `u / (1 + |u|)`.

use state_vector_traits::StateVector;
use super::{ModelTiming, NeuronLaw, Regime, StateVector};


/// Parameters shared by both KTz maps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KtzParameters {
    /// Coupling between fast variable and its previous value
    pub k: f64,
    /// Temperature, controls saturation sharpness
    pub t: f64,
    /// Recovery rate of the slow current
    pub delta: f64,
    /// Coupling of the slow current to the fast variable
    pub lambda: f64,
    /// Reversal value of the slow current
    pub x_r: f64,
    /// External input current
    pub i_ext: f64,
}

/// State of a KTz map
#[derive(Debug, Clone, Copy, PartialEq, StateVector)]
pub struct KtzState {
    /// Fast variable, interpreted as membrane potential
    pub x: f64,
    /// Previous value of the fast variable
    pub y: f64,
    /// Slow current
    pub z: f64,
}

impl KtzState {
    /// Fixed point of the excitable hyperbolic tangent map
    pub const TANH_FIXED_POINT: KtzState = KtzState {
        x: -0.6717116617084296,
        y: -0.6717116617084296,
        z: -0.0161647647380404,
    };

    /// Fixed point of the excitable logistic map
    pub const LOG_FIXED_POINT: KtzState = KtzState {
        x: -0.3458236433584459,
        y: -0.3458236433584459,
        z: -0.0308352713283108,
    };
}

impl KtzParameters {
    pub fn tanh_bursting() -> Self {
        KtzParameters {
            k: 0.6,
            t: 0.35,
            delta: 0.001,
            lambda: 0.001,
            x_r: -0.5,
            i_ext: 0.,
        }
    }

    pub fn tanh_excitable() -> Self {
        KtzParameters {
            k: 0.6,
            t: 0.35,
            delta: 0.007,
            lambda: 0.004,
            x_r: -0.7,
            i_ext: 0.,
        }
    }

    pub fn log_bursting() -> Self {
        KtzParameters {
            k: 0.6,
            t: 0.3,
            delta: 0.001,
            lambda: 0.003,
            x_r: -0.3,
            i_ext: 0.2,
        }
    }

    pub fn log_excitable() -> Self {
        KtzParameters {
            k: 0.6,
            t: 0.32,
            delta: 0.05,
            lambda: 0.01,
            x_r: -0.5,
            i_ext: 0.,
        }
    }
}

/// Logistic saturation used in place of the hyperbolic tangent
pub fn ktz_logistic(u: f64) -> f64 {
    if u > 0. {
        u / (1. + u)
    } else {
        u / (1. - u)
    }
}

// one iteration of the map with a given saturation function
fn iterate_ktz(state: &mut KtzState, params: &KtzParameters, synaptic_current: f64, saturation: fn(f64) -> f64) {
    let x = state.x;

    state.x = saturation(
        (x - params.k * state.y + state.z + synaptic_current + params.i_ext) / params.t
    );
    state.y = x;
    state.z = (1. - params.delta) * state.z - params.lambda * (x - params.x_r);
}

const KTZ_TIMING: ModelTiming = ModelTiming {
    dt: 1.,
    timesteps_per_ms: 10.,
    transient_length: 1000.,
};

/// KTz map with hyperbolic tangent saturation
#[derive(Debug, Clone, PartialEq)]
pub struct KtzTanhModel {
    pub params: KtzParameters,
    pub state: KtzState,
}

impl Default for KtzTanhModel {
    fn default() -> Self {
        KtzTanhModel {
            params: KtzParameters::tanh_bursting(),
            state: KtzState { x: 0., y: 0., z: 0. },
        }
    }
}

impl KtzTanhModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }
}

impl NeuronLaw for KtzTanhModel {
    type State = KtzState;

    const LABEL: &'static str = "KTzTanhModel";
    const TIMING: ModelTiming = KTZ_TIMING;

    fn set_bursting_params(&mut self) {
        self.params = KtzParameters::tanh_bursting();
        self.state = KtzState { x: 0., y: 0., z: 0. };
    }

    fn set_excitable_params(&mut self) {
        self.params = KtzParameters::tanh_excitable();
        self.state = KtzState {
            x: -0.5,
            y: -0.6717116617084296,
            z: -0.0161647647380404,
        };
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, _dt: f64) {
        iterate_ktz(&mut self.state, &self.params, synaptic_current, f64::tanh);
    }

    fn get_potential(&self) -> f64 {
        self.state.x
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = KtzState::TANH_FIXED_POINT;

        self.state.to_state_vector()
    }
}

/// KTz map with logistic saturation
#[derive(Debug, Clone, PartialEq)]
pub struct KtzLogModel {
    pub params: KtzParameters,
    pub state: KtzState,
}

impl Default for KtzLogModel {
    fn default() -> Self {
        KtzLogModel {
            params: KtzParameters::log_bursting(),
            state: KtzState { x: -0.2, y: -0.2, z: -0.2 },
        }
    }
}

impl KtzLogModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }
}

impl NeuronLaw for KtzLogModel {
    type State = KtzState;

    const LABEL: &'static str = "KTzLogModel";
    const TIMING: ModelTiming = KTZ_TIMING;

    fn set_bursting_params(&mut self) {
        self.params = KtzParameters::log_bursting();
        self.state = KtzState { x: -0.2, y: -0.2, z: -0.2 };
    }

    fn set_excitable_params(&mut self) {
        self.params = KtzParameters::log_excitable();
        self.state = KtzState {
            x: -0.1,
            y: -0.3458236433584459,
            z: -0.0308352713283108,
        };
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, _dt: f64) {
        iterate_ktz(&mut self.state, &self.params, synaptic_current, ktz_logistic);
    }

    fn get_potential(&self) -> f64 {
        self.state.x
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = KtzState::LOG_FIXED_POINT;

        self.state.to_state_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logistic_is_odd_and_bounded() {
        for u in [0.1, 1., 5., 100.] {
            assert_eq!(ktz_logistic(-u), -ktz_logistic(u));
            assert!(ktz_logistic(u) < 1.);
        }
        assert_eq!(ktz_logistic(0.), 0.);
        assert_eq!(ktz_logistic(1.), 0.5);
    }

    #[test]
    fn test_y_stores_previous_x() {
        let mut ktz = KtzTanhModel::new(Regime::Bursting);
        ktz.state = KtzState { x: 0.3, y: 0.1, z: 0.05 };

        ktz.update(0., 1.);

        assert_eq!(ktz.state.y, 0.3);
        let expected_x = ((0.3 - 0.6 * 0.1 + 0.05) / 0.35_f64).tanh();
        assert!((ktz.state.x - expected_x).abs() < 1e-15);
        let expected_z = (1. - 0.001) * 0.05 - 0.001 * (0.3 + 0.5);
        assert!((ktz.state.z - expected_z).abs() < 1e-15);
    }

    #[test]
    fn test_bursting_tanh_is_active() {
        let mut ktz = KtzTanhModel::new(Regime::Bursting);

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        for _ in 0..5000 {
            ktz.update(0., 1.);
            min_x = min_x.min(ktz.state.x);
            max_x = max_x.max(ktz.state.x);
        }

        assert!(max_x - min_x > 0.5);
    }
}
