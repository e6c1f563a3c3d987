//! Experiment settings read from a `.toml` file, every setting is optional and
//! falls back to its default.
//!
//! ```toml
//! n_samples = 50
//! total_time = 500
//! network_size = 5
//! seed = 42
//!
//! [couplings.excitable]
//! ktz_tanh = 0.05
//! ```

use std::{fs::read_to_string, path::{Path, PathBuf}};
use serde::Deserialize;
use crate::error::ConfigError;
use crate::neuron::{ModelKind, Regime};


/// Coupling conductance used for networks of each model kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouplingTable {
    pub lif: f64,
    pub glexp: f64,
    pub ktz_tanh: f64,
    pub ktz_log: f64,
    pub izhikevich: f64,
    pub rulkov: f64,
    /// Shared by both conductance based models
    pub hodgkin_huxley: f64,
}

impl CouplingTable {
    pub fn excitable() -> Self {
        CouplingTable {
            lif: 0.1,
            glexp: 0.1,
            ktz_tanh: 0.04,
            ktz_log: 0.1,
            izhikevich: 0.1,
            rulkov: 0.08,
            hodgkin_huxley: 0.05,
        }
    }

    pub fn bursting() -> Self {
        CouplingTable {
            ktz_log: 0.,
            hodgkin_huxley: 1.0e-10,
            ..Self::excitable()
        }
    }

    /// Coupling conductance of a model kind
    pub fn get(&self, kind: ModelKind) -> f64 {
        match kind {
            ModelKind::Lif => self.lif,
            ModelKind::GlExp => self.glexp,
            ModelKind::KtzTanh => self.ktz_tanh,
            ModelKind::KtzLog => self.ktz_log,
            ModelKind::Izhikevich => self.izhikevich,
            ModelKind::Rulkov => self.rulkov,
            ModelKind::HodgkinHuxley | ModelKind::HodgkinHuxleyLeech => self.hodgkin_huxley,
        }
    }
}

impl Default for CouplingTable {
    fn default() -> Self {
        Self::excitable()
    }
}

// conductances given in a file, missing ones keep the regime's default
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CouplingOverrides {
    lif: Option<f64>,
    glexp: Option<f64>,
    ktz_tanh: Option<f64>,
    ktz_log: Option<f64>,
    izhikevich: Option<f64>,
    rulkov: Option<f64>,
    hodgkin_huxley: Option<f64>,
}

impl CouplingOverrides {
    fn apply(self, base: CouplingTable) -> CouplingTable {
        CouplingTable {
            lif: self.lif.unwrap_or(base.lif),
            glexp: self.glexp.unwrap_or(base.glexp),
            ktz_tanh: self.ktz_tanh.unwrap_or(base.ktz_tanh),
            ktz_log: self.ktz_log.unwrap_or(base.ktz_log),
            izhikevich: self.izhikevich.unwrap_or(base.izhikevich),
            rulkov: self.rulkov.unwrap_or(base.rulkov),
            hodgkin_huxley: self.hodgkin_huxley.unwrap_or(base.hodgkin_huxley),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CouplingsFile {
    bursting: CouplingOverrides,
    excitable: CouplingOverrides,
}

impl From<CouplingsFile> for Couplings {
    fn from(file: CouplingsFile) -> Self {
        Couplings {
            bursting: file.bursting.apply(CouplingTable::bursting()),
            excitable: file.excitable.apply(CouplingTable::excitable()),
        }
    }
}

/// Coupling conductances for both regimes
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "CouplingsFile")]
pub struct Couplings {
    pub bursting: CouplingTable,
    pub excitable: CouplingTable,
}

impl Default for Couplings {
    fn default() -> Self {
        Couplings {
            bursting: CouplingTable::bursting(),
            excitable: CouplingTable::excitable(),
        }
    }
}

impl Couplings {
    /// Coupling conductance of a model kind in a regime
    pub fn conductance(&self, kind: ModelKind, regime: Regime) -> f64 {
        match regime {
            Regime::Bursting => self.bursting.get(kind),
            Regime::Excitable => self.excitable.get(kind),
        }
    }
}

/// Settings of a full experiment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Number of repetitions of every measurement
    pub n_samples: usize,
    /// Simulated time per run in milliseconds
    pub total_time: usize,
    /// Time budget of a fixed point search, in units of the model's `dt`
    pub max_time: usize,
    /// Largest potential change per step regarded as converged
    pub tolerance: f64,
    /// Number of neurons in each network
    pub network_size: usize,
    /// Whether to write potential time series files
    pub write_potential_files: bool,
    /// Directory the time series files are written to
    pub output_dir: PathBuf,
    /// Seed of every random source, entropy is used when absent
    pub seed: Option<u64>,
    pub couplings: Couplings,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            n_samples: 100,
            total_time: 1000,
            max_time: 100000,
            tolerance: 1.0e-8,
            network_size: 3,
            write_potential_files: false,
            output_dir: PathBuf::from("."),
            seed: None,
            couplings: Couplings::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parses settings from `.toml` contents
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads settings from a `.toml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = read_to_string(path)?;

        Self::from_toml_str(&contents)
    }
}
