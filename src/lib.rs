//! # Neuron Performance
//!
//! `neuron_performance` is a package of single neuron models, discrete maps as well
//! as conductance based models, that can be composed into small networks coupled
//! through gap junctions. It is focused on measuring how much a timestep of each
//! model costs and how long each model takes to converge to its fixed point.
//!
//! Eight models are implemented, each with a bursting and an excitable regime:
//! leaky integrate and fire, a stochastic generalized linear model with exponential
//! firing probability, the KTz map in hyperbolic tangent and logistic forms,
//! the Izhikevich map, the Rulkov map, the standard Hodgkin Huxley model and a
//! reduced Hodgkin Huxley model of a leech heart interneuron.
//!
//! ## Example Code
//!
//! ### Stepping a single neuron
//!
//! ```rust
//! use neuron_performance::neuron::{Model, ModelKind, NeuronModel, Regime};
//!
//! let mut neuron = NeuronModel::new(ModelKind::Izhikevich, Regime::Excitable, 1000);
//!
//! let mut voltages = vec![];
//! for _ in 0..(neuron.timesteps_per_ms() * 300.) as usize {
//!     neuron.time_step();
//!     voltages.push(neuron.get_potential());
//! }
//!
//! // the excitable regime settles at the fixed point
//! let fixed_point = neuron.reset_to_fixed_point();
//! assert!((voltages.last().unwrap() - fixed_point[0]).abs() < 1e-3);
//! ```
//!
//! ### Seeding a signal down a chain of neurons
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use neuron_performance::graph::Topology;
//! use neuron_performance::network::NetworkModel;
//! use neuron_performance::neuron::{Model, ModelKind, Regime};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut network = NetworkModel::with_rng(
//!     ModelKind::KtzTanh, Regime::Excitable, 1000, Topology::Linear, 5, 0.04, &mut rng,
//! ).unwrap();
//!
//! for _ in 0..100 {
//!     network.time_step();
//! }
//!
//! let potentials = network.get_network_potentials();
//! assert_eq!(potentials.len(), 5);
//! ```
//!
//! ### Measuring convergence to the fixed point
//!
//! ```rust
//! use neuron_performance::neuron::{ModelKind, NeuronModel, Regime};
//! use neuron_performance::simulation::ModelSimulator;
//!
//! let simulator = ModelSimulator::new(Regime::Excitable, 100, 1e-8, 100000);
//! let mut rulkov = NeuronModel::new(ModelKind::Rulkov, Regime::Excitable, 100);
//!
//! let report = simulator.fixed_point_convergence_test(&mut rulkov, 3).unwrap();
//! assert!(report.timesteps.mean > 1.);
//! ```

pub mod error;
pub mod neuron;
pub mod graph;
pub mod network;
pub mod distribution;
pub mod statistics;
pub mod simulation;
pub mod output;
pub mod config;
