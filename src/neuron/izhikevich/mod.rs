//! The Izhikevich neuron iterated as a map with a unit timestep.

use state_vector_traits::StateVector;
use super::{ModelTiming, NeuronLaw, Regime, StateVector};


/// Parameters of the Izhikevich map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IzhikevichParameters {
    /// Controls speed of the recovery variable
    pub a: f64,
    /// Controls sensitivity of the recovery variable to the voltage
    pub b: f64,
    /// Voltage after a spike
    pub c: f64,
    /// Recovery variable increase after a spike
    pub d: f64,
    /// Spike cutoff, voltage at or above this value is reset to `c`
    pub v_reset: f64,
    /// External input current
    pub i_ext: f64,
}

impl IzhikevichParameters {
    pub fn bursting() -> Self {
        IzhikevichParameters {
            a: 0.02,
            b: 0.25,
            c: -57.,
            d: 0.,
            v_reset: 30.,
            i_ext: 2.,
        }
    }

    pub fn excitable() -> Self {
        IzhikevichParameters {
            c: -62.,
            i_ext: 0.6,
            ..Self::bursting()
        }
    }
}

/// State of the Izhikevich map
#[derive(Debug, Clone, Copy, PartialEq, StateVector)]
pub struct IzhikevichState {
    /// Membrane potential
    pub v: f64,
    /// Recovery variable
    pub u: f64,
}

impl IzhikevichState {
    /// Fixed point in the excitable regime
    pub const FIXED_POINT: IzhikevichState = IzhikevichState {
        v: -62.5984492395571,
        u: -15.649612309889193,
    };

    pub fn bursting() -> Self {
        IzhikevichState { v: 0.1, u: 0.1 }
    }

    pub fn excitable() -> Self {
        IzhikevichState { v: -56., u: -15.649612309889193 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IzhikevichModel {
    pub params: IzhikevichParameters,
    pub state: IzhikevichState,
}

impl Default for IzhikevichModel {
    fn default() -> Self {
        IzhikevichModel {
            params: IzhikevichParameters::bursting(),
            state: IzhikevichState::bursting(),
        }
    }
}

impl IzhikevichModel {
    /// Generates the model with the parameters of the given regime
    pub fn new(regime: Regime) -> Self {
        let mut model = Self::default();
        model.set_regime(regime);

        model
    }
}

impl NeuronLaw for IzhikevichModel {
    type State = IzhikevichState;

    const LABEL: &'static str = "IzhikevichModel";
    const TIMING: ModelTiming = ModelTiming {
        dt: 1.,
        timesteps_per_ms: 5.,
        transient_length: 1000.,
    };

    fn set_bursting_params(&mut self) {
        self.params = IzhikevichParameters::bursting();
        self.state = IzhikevichState::bursting();
    }

    fn set_excitable_params(&mut self) {
        self.params = IzhikevichParameters::excitable();
        self.state = IzhikevichState::excitable();
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn state_mut(&mut self) -> &mut Self::State {
        &mut self.state
    }

    fn update(&mut self, synaptic_current: f64, _dt: f64) {
        let IzhikevichState { v, u } = self.state;

        if v < self.params.v_reset {
            self.state.v = 0.04 * v * v + 6. * v + 140. - u + self.params.i_ext + synaptic_current;
            self.state.u = u + self.params.a * (self.params.b * v - u);
        } else {
            self.state.v = self.params.c;
            self.state.u = u + self.params.d;
        }
    }

    fn get_potential(&self) -> f64 {
        self.state.v
    }

    fn reset_to_fixed_point(&mut self) -> Vec<f64> {
        self.state = IzhikevichState::FIXED_POINT;

        self.state.to_state_vector()
    }
}
