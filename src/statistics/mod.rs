//! Summary statistics of measurement samples.

use ndarray::Array1;
use crate::error::SimulationError;


/// Mean, sample standard deviation and standard error of a set of observations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    /// Observations
    pub samples: Array1<f64>,
    /// Arithmetic mean
    pub mean: f64,
    /// Standard deviation with an `N - 1` denominator
    pub std: f64,
    /// Standard error of the mean, `std / sqrt(N)`
    pub sem: f64,
}

impl Statistics {
    /// Summarizes the observations, at least two are required
    pub fn new(samples: &[f64]) -> Result<Self, SimulationError> {
        if samples.len() < 2 {
            return Err(SimulationError::NotEnoughSamples { found: samples.len() });
        }

        let samples = Array1::from_vec(samples.to_vec());
        let n = samples.len() as f64;
        let mean = samples.sum() / n;
        let std = samples.std(1.);

        Ok(Statistics {
            mean,
            std,
            sem: std / n.sqrt(),
            samples,
        })
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_statistics() {
        let stats = Statistics::new(&[2., 4., 4., 4., 5., 5., 7., 9.]).unwrap();

        assert_eq!(stats.mean, 5.);
        let expected_std = (32. / 7_f64).sqrt();
        assert!((stats.std - expected_std).abs() < 1e-12);
        assert!((stats.sem - expected_std / 8_f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.len(), 8);
    }

    #[test]
    fn test_not_enough_samples() {
        assert_eq!(Statistics::new(&[1.]), Err(SimulationError::NotEnoughSamples { found: 1 }));
        assert_eq!(Statistics::new(&[]), Err(SimulationError::NotEnoughSamples { found: 0 }));
        assert!(Statistics::default().is_empty());
    }
}
