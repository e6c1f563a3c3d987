//! Classical fourth order Runge-Kutta integration over fixed size state arrays.

/// Advances `state` by one step of size `dt` given its time invariant
/// `derivative`
///
/// Example usage:
/// ```rust
/// use neuron_performance::neuron::runge_kutta::runge_kutta_4;
///
/// // exponential decay y' = -y
/// let next = runge_kutta_4(&[1.], 0.1, |y| [-y[0]]);
/// assert!((next[0] - (-0.1_f64).exp()).abs() < 1e-6);
/// ```
pub fn runge_kutta_4<const D: usize, F>(state: &[f64; D], dt: f64, derivative: F) -> [f64; D]
where
    F: Fn(&[f64; D]) -> [f64; D],
{
    let offset = |k: &[f64; D], scale: f64| -> [f64; D] {
        let mut shifted = *state;
        shifted.iter_mut()
            .zip(k.iter())
            .for_each(|(s, k)| *s += scale * k);

        shifted
    };

    let k1 = derivative(state);
    let k2 = derivative(&offset(&k1, dt / 2.));
    let k3 = derivative(&offset(&k2, dt / 2.));
    let k4 = derivative(&offset(&k3, dt));

    let mut next = *state;
    for i in 0..D {
        next[i] += dt / 6. * (k1[i] + 2. * k2[i] + 2. * k3[i] + k4[i]);
    }

    next
}
