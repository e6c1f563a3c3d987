//! Error types for model construction, networks, measurement and configuration.

use thiserror::Error;


/// Error set for neuron model construction and state manipulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Model name could not be matched to a known model
    #[error("Unrecognized model type: {0}")]
    UnrecognizedModel(String),
    /// Regime name could not be matched to a known regime
    #[error("Unrecognized neuron regime: {0}")]
    UnrecognizedRegime(String),
    /// Initial condition does not have one value per state variable
    #[error("Initial condition for {model} must have {expected} values, found {found}")]
    InitialConditionLength {
        model: String,
        expected: usize,
        found: usize,
    },
    /// Initial condition contains `NaN` or an infinite value
    #[error("Initial condition for {model} is not finite at index {index}")]
    NonFiniteInitialCondition {
        model: String,
        index: usize,
    },
}

/// Error set for network construction and manipulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Topology name could not be matched to a known topology
    #[error("Unrecognized network topology: {0}")]
    UnrecognizedTopology(String),
    /// Networks must contain at least one neuron
    #[error("Network must contain at least one neuron")]
    EmptyNetwork,
    /// Neuron index is not present in network
    #[error("Neuron index {index} out of range for network of size {size}")]
    NeuronIndexOutOfRange {
        index: usize,
        size: usize,
    },
    /// Initial condition given to a single neuron is invalid
    #[error("{0}")]
    InvalidNeuronState(#[from] ModelError),
}

/// Error set for the measurement harness
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Potential never settled within tolerance before the step budget ran out
    #[error("The model could not converge to the fixed point. Model: {model}; MaxTimeSteps: {max_steps}; Tolerance: {tolerance:e}")]
    NoConvergence {
        model: String,
        max_steps: usize,
        tolerance: f64,
    },
    /// Sample statistics require at least two observations
    #[error("Statistics require at least 2 samples, found {found}")]
    NotEnoughSamples {
        found: usize,
    },
}

/// Error set for reading experiment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file cannot be read
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration file is not valid
    #[error("Cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A set of errors that may occur when using the library
#[derive(Debug, Error)]
pub enum NeuronPerformanceError {
    /// Errors related to neuron models
    #[error("{0}")]
    ModelRelatedError(#[from] ModelError),
    /// Errors related to networks
    #[error("{0}")]
    NetworkRelatedError(#[from] NetworkError),
    /// Errors related to measurement
    #[error("{0}")]
    SimulationRelatedError(#[from] SimulationError),
    /// Errors related to configuration
    #[error("{0}")]
    ConfigRelatedError(#[from] ConfigError),
    /// Errors writing time series
    #[error("Cannot write output: {0}")]
    OutputRelatedError(#[from] csv::Error),
    /// Other I/O errors
    #[error("I/O error: {0}")]
    IoRelatedError(#[from] std::io::Error),
}
