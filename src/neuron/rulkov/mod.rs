//! The Rulkov map, a two dimensional map with a fast piecewise variable
//! and a slowly drifting variable.

use state_vector_traits::StateVector;
use super::{ModelTiming, NeuronLaw, Regime, StateVector};


/// Parameters of the Rulkov map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulkovParameters {
    /// Nonlinearity of the fast variable
    pub alpha: f64,
    /// Target of the slow variable
    pub sigma: f64,
    /// Rate of the slow variable
    pub mu: f64,
    /// External input current
    pub i_ext: f64,
}

impl RulkovParameters {
    pub fn bursting() -> Self {
        RulkovParameters {
            alpha: 6.,
            sigma: -1.1,
            mu: 0.001,
            i_ext: 0.,
        }
    }

    pub fn excitable() -> Self {
        RulkovParameters {
            alpha: 2.5,
            sigma: -0.6,
            mu: 0.001,
            i_ext: 0.,
        }
    }
}

/// State of the Rulkov map
#[derive(Debug, Clone, Copy, PartialEq, StateVector)]
pub struct RulkovState {
    /// Fast variable, interpreted as membrane potential
    pub x: f64,
    /// Slow variable
    pub y: f64,
}

impl RulkovState {
    /// Fixed point in the excitable regime
    pub const FIXED_POINT: RulkovState = RulkovState { x: -0.6, y: -2.1625 };

    pub fn bursting() -> Self {
        RulkovState { x: -0.1, y: -0.1 }
    }

    pub fn excitable() -> Self {
        RulkovState { x: -0.4, y: -2.1625 }
    }
}

/// Piecewise fast map of the Rulkov model
pub fn rulkov_map(x: f64, w: f64, alpha: f64) -> f64 {
    if x <= 0. {
        w + alpha / (1. - x)
    } else if x < alpha + w {
        alpha + w
    } else {
        -1.
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RulkovModel {
    pub params: RulkovParameters,
    pub state: RulkovState,
}

impl Default for RulkovModel {
    fn default() -> Self {
        RulkovModel {
            params: RulkovParameters::bursting(),
            state: RulkovState::bursting(),
        }
    }
}

impl RulkovModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }
}

impl NeuronLaw for RulkovModel {
    type State = RulkovState;

    const LABEL: &'static str = "RulkovModel";
    const TIMING: ModelTiming = ModelTiming {
        dt: 1.,
        timesteps_per_ms: 10.,
        transient_length: 2000.,
    };

    fn set_bursting_params(&mut self) {
        self.params = RulkovParameters::bursting();
        self.state = RulkovState::bursting();
    }

    fn set_excitable_params(&mut self) {
        self.params = RulkovParameters::excitable();
        self.state = RulkovState::excitable();
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, _dt: f64) {
        let RulkovState { x, y } = self.state;

        self.state.x = rulkov_map(x, y + self.params.i_ext + synaptic_current, self.params.alpha);
        self.state.y = y - self.params.mu * (x - self.params.sigma);
    }

    fn get_potential(&self) -> f64 {
        self.state.x
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = RulkovState::FIXED_POINT;

        self.state.to_state_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_branches() {
        assert_eq!(rulkov_map(-1., 0., 6.), 3.);
        assert_eq!(rulkov_map(0.5, 0., 6.), 6.);
        assert_eq!(rulkov_map(7., 0., 6.), -1.);
        assert_eq!(rulkov_map(6., 0., 6.), -1.);
    }

    #[test]
    fn test_bursting_produces_spikes() {
        let mut rulkov = RulkovModel::new(Regime::Bursting);

        let mut spikes = 0;
        for _ in 0..20000 {
            let before = rulkov.state.x;
            rulkov.update(0., 1.);
            if before > 0. && rulkov.state.x == -1. {
                spikes += 1;
            }
        }

        assert!(spikes > 0);
    }
}
