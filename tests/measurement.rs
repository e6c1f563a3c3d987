#[cfg(test)]
mod tests {
    use std::{fs, io::Write};
    use rand::{rngs::StdRng, SeedableRng};
    use tempfile::{tempdir, NamedTempFile};
    use neuron_performance::{
        config::ExperimentConfig,
        error::{NeuronPerformanceError, SimulationError},
        graph::Topology,
        network::NetworkModel,
        neuron::{Model, ModelKind, NeuronModel, Regime},
        output::{data_file_path, time_series_header, write_time_series},
        simulation::ModelSimulator,
        statistics::Statistics,
    };


    fn simulator(regime: Regime, total_time: usize) -> ModelSimulator {
        ModelSimulator::with_rng(regime, total_time, 1e-8, 100000, StdRng::seed_from_u64(42))
    }

    #[test]
    pub fn test_rulkov_convergence_is_deterministic() -> Result<(), SimulationError> {
        let simulator = simulator(Regime::Excitable, 10);
        let mut rulkov = NeuronModel::new(ModelKind::Rulkov, Regime::Excitable, 10);

        let report = simulator.fixed_point_convergence_test(&mut rulkov, 5)?;

        assert_eq!(report.label, "RulkovModel");
        assert_eq!(report.timesteps.len(), 5);
        assert!(report.timesteps.mean > 500. && report.timesteps.mean < 650.);
        assert_eq!(report.timesteps.std, 0.);
        assert!(report.timesteps.samples.iter().all(|steps| *steps == report.timesteps.mean));
        assert!(report.nanoseconds.mean > 0.);

        Ok(())
    }

    #[test]
    pub fn test_convergence_of_excitable_network() -> Result<(), NeuronPerformanceError> {
        let simulator = simulator(Regime::Excitable, 10);
        let mut network = NetworkModel::with_rng(
            ModelKind::KtzTanh, Regime::Excitable, 10, Topology::Linear, 3, 0.04,
            &mut StdRng::seed_from_u64(5),
        )?;

        let report = simulator.fixed_point_convergence_test(&mut network, 2)?;
        assert_eq!(report.label, "Linear_KTzTanhExcitable");
        assert!(report.timesteps.mean > 1.);

        let resting = NeuronModel::new(ModelKind::KtzTanh, Regime::Excitable, 10).reset_to_fixed_point()[0];
        for potential in network.get_network_potentials() {
            assert!((potential - resting).abs() < 1e-4);
        }

        Ok(())
    }

    #[test]
    pub fn test_timing_report() -> Result<(), SimulationError> {
        let simulator = simulator(Regime::Bursting, 20);
        let mut izhikevich = NeuronModel::new(ModelKind::Izhikevich, Regime::Bursting, 20);

        let report = simulator.time_step_test(&mut izhikevich, 4)?;

        assert_eq!(report.label, "IzhikevichModel");
        assert_eq!(report.steps_per_sample, 100);
        assert_eq!(report.nanoseconds_per_step.len(), 4);
        assert!(report.nanoseconds_per_step.mean >= 0.);
        assert!(report.nanoseconds_per_step.sem <= report.nanoseconds_per_step.std);

        assert_eq!(
            simulator.time_step_test(&mut izhikevich, 1),
            Err(SimulationError::NotEnoughSamples { found: 1 }),
        );

        Ok(())
    }

    #[test]
    pub fn test_statistics() -> Result<(), SimulationError> {
        let statistics = Statistics::new(&[2., 4., 4., 4., 5., 5., 7., 9.])?;

        assert_eq!(statistics.mean, 5.);
        assert!((statistics.std - (32. / 7.0_f64).sqrt()).abs() < 1e-12);
        assert!((statistics.sem - statistics.std / 8.0_f64.sqrt()).abs() < 1e-12);

        Ok(())
    }

    #[test]
    pub fn test_network_recording() -> Result<(), NeuronPerformanceError> {
        let simulator = simulator(Regime::Excitable, 10);
        let mut network = NetworkModel::with_rng(
            ModelKind::KtzTanh, Regime::Excitable, 10, Topology::Linear, 3, 0.04,
            &mut StdRng::seed_from_u64(5),
        )?;

        let data = simulator.record(&mut network, 10);
        assert_eq!(data.shape(), &[100, 4]);
        assert_eq!(data[[0, 0]], 0.);
        assert_eq!(data[[99, 0]], 99.);
        let last = network.get_network_potentials();
        for i in 0..3 {
            assert_eq!(data[[99, i + 1]], last[i]);
        }

        let directory = tempdir()?;
        let path = data_file_path(directory.path(), &network.label(), Regime::Excitable);
        assert!(path.ends_with("Linear_KTzTanhExcitable_exc.dat"));

        write_time_series(&path, &time_series_header(network.neuron_count()), &data)?;

        let contents = fs::read_to_string(&path)?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 101);
        assert_eq!(lines[0], "#t\tV1\tV2\tV3");

        let first_row: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(first_row.len(), 4);
        assert_eq!(first_row[0], "0.00000000e+000");
        let parsed: f64 = first_row[1].parse().unwrap();
        assert!((parsed - data[[0, 1]]).abs() < 1e-7);

        Ok(())
    }

    #[test]
    pub fn test_single_neuron_file_header() -> Result<(), NeuronPerformanceError> {
        let simulator = simulator(Regime::Bursting, 5);
        let mut rulkov = NeuronModel::new(ModelKind::Rulkov, Regime::Bursting, 5);
        let data = simulator.record(&mut rulkov, 5);

        let directory = tempdir()?;
        let path = data_file_path(directory.path(), &rulkov.label(), Regime::Bursting);
        write_time_series(&path, &time_series_header(1), &data)?;

        let contents = fs::read_to_string(&path)?;
        assert!(contents.starts_with("#t\tV\n"));
        assert_eq!(contents.lines().count(), 51);

        Ok(())
    }

    #[test]
    pub fn test_config_file() -> Result<(), NeuronPerformanceError> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "n_samples = 7\nnetwork_size = 5\nseed = 9\n\n[couplings.excitable]\nrulkov = 0.2\n",
        )?;

        let config = ExperimentConfig::from_file(file.path())?;

        assert_eq!(config.n_samples, 7);
        assert_eq!(config.network_size, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.total_time, 1000);
        assert_eq!(config.couplings.conductance(ModelKind::Rulkov, Regime::Excitable), 0.2);
        assert_eq!(config.couplings.conductance(ModelKind::KtzTanh, Regime::Excitable), 0.04);

        let simulator = ModelSimulator::from_config(&config, Regime::Excitable);
        assert_eq!(simulator.total_time(), 1000);
        assert_eq!(simulator.regime(), Regime::Excitable);

        assert!(ExperimentConfig::from_file(file.path().with_extension("missing")).is_err());

        Ok(())
    }
}
