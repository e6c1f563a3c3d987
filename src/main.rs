use std::{fs::create_dir_all, path::PathBuf};
use clap::Parser;
use log::{debug, info, warn};
use neuron_performance::{
    config::ExperimentConfig,
    error::NeuronPerformanceError,
    graph::Topology,
    neuron::{Model, ModelKind, Regime},
    output::{data_file_path, time_series_header, write_time_series},
    simulation::{ConvergenceReport, ModelSimulator, ModelSuite, TimingReport},
};


/// Measures the cost per timestep and the fixed point convergence time of
/// neuron models and gap junction networks
#[derive(Parser, Debug)]
#[command(name = "neuron_performance", version, long_about = None)]
struct Args {
    /// Path to a `.toml` experiment config, flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of repetitions of every measurement
    #[arg(long)]
    n_samples: Option<usize>,

    /// Time to run each model in ms
    #[arg(long)]
    total_time: Option<usize>,

    /// Time budget of a fixed point search in units of the model's timestep
    #[arg(long)]
    max_time: Option<usize>,

    /// Largest potential change per timestep regarded as converged
    #[arg(long)]
    tolerance: Option<f64>,

    /// Number of neurons in each network
    #[arg(short = 'n', long)]
    network_size: Option<usize>,

    /// Write files containing the membrane potential of every model
    #[arg(short, long, default_value_t = false)]
    write: bool,

    /// Directory the potential files are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Seed for every random source
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<ExperimentConfig, NeuronPerformanceError> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(n_samples) = args.n_samples {
        config.n_samples = n_samples;
    }
    if let Some(total_time) = args.total_time {
        config.total_time = total_time;
    }
    if let Some(max_time) = args.max_time {
        config.max_time = max_time;
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(network_size) = args.network_size {
        config.network_size = network_size;
    }
    if args.write {
        config.write_potential_files = true;
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok(config)
}

fn report_timing(report: &TimingReport) {
    info!("* {} Model:", report.label);
    info!(
        "  {:.3} +/- {:.3} ns/timestep ({} timesteps per sample)",
        report.nanoseconds_per_step.mean,
        report.nanoseconds_per_step.std,
        report.steps_per_sample,
    );
}

fn report_convergence(report: &ConvergenceReport) {
    info!("* {} Model:", report.label);
    info!("  TimeStep amount: {} +/- {}", report.timesteps.mean, report.timesteps.std);
    info!("  {:.0} +/- {:.0} ns to converge", report.nanoseconds.mean, report.nanoseconds.std);
}

fn write_suite(
    simulator: &ModelSimulator,
    suite: &mut ModelSuite,
    config: &ExperimentConfig,
) -> Result<(), NeuronPerformanceError> {
    create_dir_all(&config.output_dir)?;

    let models = suite.neurons.iter_mut()
        .map(|neuron| neuron as &mut dyn Model)
        .chain(suite.networks.iter_mut().map(|network| network as &mut dyn Model));

    for model in models {
        let data = simulator.record(model, config.total_time);
        let path = data_file_path(&config.output_dir, &model.label(), simulator.regime());
        write_time_series(&path, &time_series_header(model.neuron_count()), &data)?;

        debug!("Wrote {}", path.display());
    }

    Ok(())
}

fn time_networks(
    simulator: &ModelSimulator,
    suite: &mut ModelSuite,
    n_samples: usize,
) -> Result<(), NeuronPerformanceError> {
    for network in suite.networks.iter_mut() {
        report_timing(&simulator.time_step_test(network, n_samples)?);
    }

    Ok(())
}

fn main() -> Result<(), NeuronPerformanceError> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = load_config(&args)?;
    let n = config.network_size;
    debug!("{:#?}", config);

    info!("Preparing to measure time per timestep...");
    let mut simulator = ModelSimulator::from_config(&config, Regime::Bursting);
    let mut suite = simulator.model_suite(&ModelKind::ALL, Topology::MeanField, n, &config.couplings)?;

    if config.write_potential_files {
        write_suite(&simulator, &mut suite, &config)?;
    }

    info!("- Execution time/timestep (ns/timestep)");
    for neuron in suite.neurons.iter_mut() {
        // the standard model is only measured for convergence
        if neuron.kind() == ModelKind::HodgkinHuxley {
            continue;
        }
        report_timing(&simulator.time_step_test(neuron, config.n_samples)?);
    }

    info!("--");
    info!("Preparing to measure convergence time...");
    let mut simulator = ModelSimulator::from_config(&config, Regime::Excitable);
    let mut suite = simulator.model_suite(&ModelKind::ALL, Topology::Linear, n, &config.couplings)?;

    if config.write_potential_files {
        write_suite(&simulator, &mut suite, &config)?;
        suite = simulator.model_suite(&ModelKind::ALL, Topology::Linear, n, &config.couplings)?;
    }

    for neuron in suite.neurons.iter_mut() {
        match neuron.kind() {
            kind if kind.is_stochastic() => {
                warn!("No fixed point convergence time for {} model, since it fires stochastically", kind)
            },
            ModelKind::Lif => warn!("No fixed point convergence time for LIF model, since it fires constantly"),
            ModelKind::HodgkinHuxleyLeech => continue,
            _ => report_convergence(&simulator.fixed_point_convergence_test(neuron, config.n_samples)?),
        }
    }

    info!("--");
    info!("Preparing to measure network time per timestep...");
    info!("Linear Network (N = {}, signal propagation)", n);
    time_networks(&simulator, &mut suite, config.n_samples)?;

    info!("-");
    info!("Mean Field Network (N = {}, synchronization)", n);
    let mut simulator = ModelSimulator::from_config(&config, Regime::Bursting);
    let mut suite = simulator.model_suite(&ModelKind::ALL, Topology::MeanField, n, &config.couplings)?;
    time_networks(&simulator, &mut suite, config.n_samples)?;

    Ok(())
}
