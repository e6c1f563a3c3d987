//! Random dispersal of initial conditions.

use rand::Rng;
use rand_distr::Uniform;


/// Scales every component of `values` by an independent factor drawn uniformly
/// from `[0, 1)`
pub fn scale_uniformly<R: Rng + ?Sized>(values: &[f64], rng: &mut R) -> Vec<f64> {
    let unit = Uniform::new(0., 1.);

    values.iter()
        .map(|value| value * rng.sample(&unit))
        .collect()
}
