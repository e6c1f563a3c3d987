//! Measurement harness that runs models through transients, times their
//! timesteps, searches for convergence to their fixed points and records
//! potential time series.

use std::time::Instant;
use ndarray::Array2;
use rand::{rngs::StdRng, SeedableRng};
use log::{debug, warn};
use crate::config::{Couplings, ExperimentConfig};
use crate::error::{NetworkError, SimulationError};
use crate::graph::Topology;
use crate::network::NetworkModel;
use crate::neuron::{Model, ModelKind, NeuronModel, Regime};
use crate::statistics::Statistics;


/// Wall clock cost of stepping a model
#[derive(Debug, Clone, PartialEq)]
pub struct TimingReport {
    /// Label of the measured model
    pub label: String,
    /// Timesteps taken in each sample
    pub steps_per_sample: usize,
    /// Nanoseconds per timestep across samples
    pub nanoseconds_per_step: Statistics,
}

/// Cost of reaching the fixed point from the regime's initial state
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceReport {
    /// Label of the measured model
    pub label: String,
    /// Timesteps needed to converge across samples
    pub timesteps: Statistics,
    /// Nanoseconds needed to converge across samples
    pub nanoseconds: Statistics,
}

/// Standalone neurons and networks used in one stage of an experiment
#[derive(Debug, Clone)]
pub struct ModelSuite {
    pub neurons: Vec<NeuronModel>,
    pub networks: Vec<NetworkModel>,
}

/// Runs measurements on any [`Model`] in a fixed regime
#[derive(Debug, Clone)]
pub struct ModelSimulator {
    regime: Regime,
    /// Simulated time per sample in milliseconds
    total_time: usize,
    /// Largest potential change regarded as converged
    tolerance: f64,
    /// Time budget of a convergence search, in units of the model's `dt`
    max_time: usize,
    rng: StdRng,
}

impl ModelSimulator {
    /// Generates a simulator, randomness is seeded from entropy
    pub fn new(regime: Regime, total_time: usize, tolerance: f64, max_time: usize) -> Self {
        Self::with_rng(regime, total_time, tolerance, max_time, StdRng::from_entropy())
    }

    /// Generates a simulator with a given random source for the models it builds
    pub fn with_rng(regime: Regime, total_time: usize, tolerance: f64, max_time: usize, rng: StdRng) -> Self {
        ModelSimulator {
            regime,
            total_time,
            tolerance,
            max_time,
            rng,
        }
    }

    /// Generates a simulator from the experiment settings, seeded if a seed is given
    pub fn from_config(config: &ExperimentConfig, regime: Regime) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::with_rng(regime, config.total_time, config.tolerance, config.max_time, rng)
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn total_time(&self) -> usize {
        self.total_time
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_time(&self) -> usize {
        self.max_time
    }

    /// Steps the model through its transient, returns the number of steps taken
    pub fn run_transient<M: Model + ?Sized>(&self, model: &mut M) -> usize {
        let steps = (model.transient_length() / model.dt()).floor() as usize + 1;
        (0..steps).for_each(|_| model.time_step());

        steps
    }

    /// Number of timesteps that cover the total time for a model
    pub fn steps_per_run<M: Model + ?Sized>(&self, model: &M) -> usize {
        (model.timesteps_per_ms() * self.total_time as f64).ceil() as usize
    }

    /// Steps the model over the total time, returns the number of steps taken
    pub fn run_model<M: Model + ?Sized>(&self, model: &mut M) -> usize {
        let steps = self.steps_per_run(model);
        (0..steps).for_each(|_| model.time_step());

        steps
    }

    /// Measures the wall clock time per timestep over `n_samples` runs of the
    /// total time, the model keeps its state between runs
    pub fn time_step_test<M: Model + ?Sized>(
        &self,
        model: &mut M,
        n_samples: usize,
    ) -> Result<TimingReport, SimulationError> {
        let steps = self.steps_per_run(model);

        let samples: Vec<f64> = (0..n_samples)
            .map(|_| {
                let start = Instant::now();
                self.run_model(model);
                let elapsed = start.elapsed().as_nanos() as f64;

                elapsed / steps.max(1) as f64
            })
            .collect();

        debug!("Timed {} samples of {} ({} steps each)", n_samples, model.label(), steps);

        Ok(TimingReport {
            label: model.label(),
            steps_per_sample: steps,
            nanoseconds_per_step: Statistics::new(&samples)?,
        })
    }

    /// Maximum number of steps a convergence search takes for a model
    pub fn max_steps<M: Model + ?Sized>(&self, model: &M) -> usize {
        (self.max_time as f64 / model.dt()).ceil() as usize
    }

    /// Steps the model until the potential changes by less than the tolerance
    /// in one step, returns the number of steps taken including the last one
    pub fn run_to_fixed_point<M: Model + ?Sized>(&self, model: &mut M) -> Result<usize, SimulationError> {
        let max_steps = self.max_steps(model);

        let mut previous = model.get_potential();
        for step in 1..=max_steps {
            model.time_step();
            let potential = model.get_potential();
            if (potential - previous).abs() < self.tolerance {
                return Ok(step);
            }
            previous = potential;
        }

        Err(SimulationError::NoConvergence {
            model: model.label(),
            max_steps,
            tolerance: self.tolerance,
        })
    }

    /// Resets the model into the simulator's regime `n_samples` times and
    /// measures how long it takes to reach the fixed point
    pub fn fixed_point_convergence_test<M: Model + ?Sized>(
        &self,
        model: &mut M,
        n_samples: usize,
    ) -> Result<ConvergenceReport, SimulationError> {
        if !model.has_known_fixed_point() {
            warn!("{} has no known fixed point, convergence may not be reached", model.label());
        }

        let mut timesteps = Vec::with_capacity(n_samples);
        let mut nanoseconds = Vec::with_capacity(n_samples);
        for _ in 0..n_samples {
            let horizon = self.max_steps(model);
            model.reset(self.regime, horizon);

            let start = Instant::now();
            let steps = self.run_to_fixed_point(model)?;
            nanoseconds.push(start.elapsed().as_nanos() as f64);
            timesteps.push(steps as f64);
        }

        debug!("Measured convergence of {} over {} samples", model.label(), n_samples);

        Ok(ConvergenceReport {
            label: model.label(),
            timesteps: Statistics::new(&timesteps)?,
            nanoseconds: Statistics::new(&nanoseconds)?,
        })
    }

    /// Steps the model over `total_time` milliseconds and records a row of
    /// `[t * dt, V_1, ..., V_N]` after every step
    pub fn record<M: Model + ?Sized>(&self, model: &mut M, total_time: usize) -> Array2<f64> {
        let rows = (model.timesteps_per_ms() * total_time as f64).floor() as usize;
        let mut data = Array2::<f64>::zeros((rows, model.neuron_count() + 1));

        for (t, mut row) in data.rows_mut().into_iter().enumerate() {
            model.time_step();
            row[0] = t as f64 * model.dt();
            for (i, potential) in model.get_network_potentials().into_iter().enumerate() {
                row[i + 1] = potential;
            }
        }

        data
    }

    /// Builds one standalone neuron per kind and one network per kind, the two
    /// Hodgkin Huxley kinds share a single network using the kind matching the
    /// regime, in the bursting regime standalone neurons are run through their
    /// transient
    pub fn model_suite(
        &mut self,
        kinds: &[ModelKind],
        topology: Topology,
        size: usize,
        couplings: &Couplings,
    ) -> Result<ModelSuite, NetworkError> {
        let (regime, horizon) = (self.regime, self.total_time);

        let mut neurons: Vec<NeuronModel> = kinds.iter()
            .map(|&kind| NeuronModel::with_rng(kind, regime, horizon, &mut self.rng))
            .collect();
        if regime == Regime::Bursting {
            for neuron in neurons.iter_mut() {
                self.run_transient(neuron);
            }
        }

        let mut network_kinds: Vec<ModelKind> = vec![];
        for &kind in kinds {
            let kind = match kind {
                ModelKind::HodgkinHuxley | ModelKind::HodgkinHuxleyLeech => ModelKind::conductance_based(regime),
                kind => kind,
            };
            if !network_kinds.contains(&kind) {
                network_kinds.push(kind);
            }
        }

        let networks = network_kinds.into_iter()
            .map(|kind| {
                NetworkModel::with_rng(
                    kind, regime, horizon, topology, size, couplings.conductance(kind, regime), &mut self.rng,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ModelSuite { neurons, networks })
    }
}
