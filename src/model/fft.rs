//! model::fft — the discrete Fourier transform kernel.
//!
//! Purpose
//! -------
//! Provide the one transform the crate needs: a forward complex DFT over
//! lanes of arbitrary length in `O(n log n)`, plus the axis-wise driver
//! used by [`crate::model::DataModel::fft`].
//!
//! Key behaviors
//! -------------
//! - Forward sign convention `X[k] = Σ_j x[j]·e^{-2πi·jk/n}`; output bins
//!   are in natural DFT order (zero, positive-ascending,
//!   negative-descending frequencies).
//! - Power-of-two lengths run an iterative radix-2 butterfly; every other
//!   length runs Bluestein's chirp-z reformulation over a padded
//!   power-of-two circular convolution.
//!
//! Invariants & assumptions
//! ------------------------
//! - The transform is total: any input length (including 0 and 1) returns
//!   without error.
//! - No inverse transform and no normalization are provided; referencing
//!   conventions (phase, coordinate alignment) live with the model
//!   operation, not here.
//!
//! Testing notes
//! -------------
//! - The sign convention is pinned against hand-computed four-point
//!   transforms and a quadratic-time reference DFT.

use std::f64::consts::PI;

use ndarray::{Array1, ArrayD, Axis};
use num_complex::Complex64;

/// Forward DFT of one lane.
///
/// Purpose
/// -------
/// Compute `X[k] = Σ_j x[j]·e^{-2πi·jk/n}` for `k = 0..n-1`, bins in
/// natural DFT order.
///
/// Key behaviors
/// -------------
/// - Lengths 0 and 1 are fixed points.
/// - Power-of-two lengths use radix-2; all others Bluestein, so cost is
///   `O(n log n)` throughout.
pub fn dft_forward(lane: &[Complex64]) -> Vec<Complex64> {
    if lane.len() <= 1 {
        return lane.to_vec();
    }
    if lane.len().is_power_of_two() {
        let mut out = lane.to_vec();
        radix2_in_place(&mut out);
        return out;
    }
    bluestein(lane)
}

/// Iterative radix-2 Cooley-Tukey butterfly; `lane.len()` must be a power
/// of two.
fn radix2_in_place(lane: &mut [Complex64]) {
    let n = lane.len();

    // Bit-reversal permutation.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            lane.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let step = Complex64::from_polar(1.0, -2.0 * PI / len as f64);
        let half = len / 2;
        for chunk in lane.chunks_mut(len) {
            let mut twiddle = Complex64::new(1.0, 0.0);
            for k in 0..half {
                let even = chunk[k];
                let odd = chunk[k + half] * twiddle;
                chunk[k] = even + odd;
                chunk[k + half] = even - odd;
                twiddle *= step;
            }
        }
        len <<= 1;
    }
}

/// Bluestein's chirp-z transform: rewrite `jk = (j² + k² - (k-j)²)/2` so
/// the DFT becomes a circular convolution of power-of-two length.
fn bluestein(lane: &[Complex64]) -> Vec<Complex64> {
    let n = lane.len();
    let padded = (2 * n - 1).next_power_of_two();

    // chirp[j] = e^{-πi·j²/n}; j² is reduced mod 2n, the chirp's period.
    let chirp: Vec<Complex64> = (0..n)
        .map(|j| {
            let square = (j as u64 * j as u64) % (2 * n as u64);
            Complex64::from_polar(1.0, -PI * square as f64 / n as f64)
        })
        .collect();

    let mut scaled = vec![Complex64::new(0.0, 0.0); padded];
    for (slot, (value, factor)) in scaled.iter_mut().zip(lane.iter().zip(chirp.iter())) {
        *slot = value * factor;
    }
    let mut kernel = vec![Complex64::new(0.0, 0.0); padded];
    kernel[0] = chirp[0].conj();
    for j in 1..n {
        kernel[j] = chirp[j].conj();
        kernel[padded - j] = chirp[j].conj();
    }

    radix2_in_place(&mut scaled);
    radix2_in_place(&mut kernel);
    for (left, right) in scaled.iter_mut().zip(kernel.iter()) {
        *left *= right;
    }
    // Inverse transform of the product via double conjugation.
    for value in scaled.iter_mut() {
        *value = value.conj();
    }
    radix2_in_place(&mut scaled);

    let scale = 1.0 / padded as f64;
    (0..n).map(|k| scaled[k].conj() * scale * chirp[k]).collect()
}

/// Transform every 1-D lane of `data` along `axis` and multiply by
/// `phase` element-wise.
///
/// Callers guarantee `phase.len()` equals the lane length along `axis`;
/// the model operation validates this against the grid before calling.
pub(crate) fn transform_lanes(
    data: &mut ArrayD<Complex64>,
    axis: Axis,
    phase: &Array1<Complex64>,
) {
    for mut lane in data.lanes_mut(axis) {
        let samples: Vec<Complex64> = lane.iter().copied().collect();
        let spectrum = dft_forward(&samples);
        for (slot, (value, factor)) in lane.iter_mut().zip(spectrum.iter().zip(phase.iter())) {
            *slot = value * factor;
        }
    }
}
