//! Single-bin DFT magnitude extraction via the Goertzel algorithm.
//!
//! Evaluates one DFT bin in O(N) without computing a full transform,
//! which is exactly what harmonic extraction needs: a handful of known
//! frequencies against a long buffer.
//!
//! # Recurrence
//!
//! ```text
//! k  = round(f · N / sample_rate)
//! ω  = 2π · k / N
//! s0 = x[n] + 2cos(ω) · s1 − s2
//! |X[k]| = sqrt((s1 − s2·cos ω)² + (s2·sin ω)²) / N
//! ```
//!
//! Reference: Oppenheim & Schafer, "Discrete-Time Signal Processing"
//! (3rd ed.), section 13.2.

use std::f32::consts::TAU;

/// Floor applied to the fundamental magnitude so that THD and SINAD
/// divisions are always defined.
pub(crate) const FUNDAMENTAL_EPSILON: f32 = 1e-12;

/// Magnitude of the DFT bin nearest `freq_hz`, normalized by the
/// buffer length.
///
/// The frequency is quantized to the nearest bin of an N-point DFT
/// where N is the buffer length, so the result matches what a full
/// FFT of the unpadded buffer would report for that bin.
pub fn goertzel_magnitude(signal: &[f32], freq_hz: f32, sample_rate: f32) -> f32 {
    let n = signal.len();
    if n == 0 {
        return 0.0;
    }

    let k = (freq_hz * n as f32 / sample_rate).round();
    let omega = TAU * k / n as f32;
    let cos_omega = omega.cos();
    let coeff = 2.0 * cos_omega;

    let mut s1 = 0.0f32;
    let mut s2 = 0.0f32;
    for &x in signal {
        let s0 = x + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }

    let re = s1 - s2 * cos_omega;
    let im = s2 * omega.sin();
    (re * re + im * im).sqrt() / n as f32
}

/// Magnitudes of the fundamental and its overtones.
///
/// Evaluates harmonics `1..=max_harmonics` of `fundamental_hz`,
/// stopping at Nyquist. The fundamental entry is always present and is
/// floored to a small epsilon so downstream ratios never divide by
/// zero.
pub fn harmonic_magnitudes(
    signal: &[f32],
    fundamental_hz: f32,
    sample_rate: f32,
    max_harmonics: usize,
) -> Vec<f32> {
    let nyquist = sample_rate / 2.0;
    let mut magnitudes = Vec::with_capacity(max_harmonics);

    for h in 1..=max_harmonics {
        let freq = fundamental_hz * h as f32;
        // Overtones past Nyquist are dropped; the fundamental stays so
        // the result is never empty
        if h > 1 && freq >= nyquist {
            break;
        }
        magnitudes.push(goertzel_magnitude(signal, freq, sample_rate));
    }

    if let Some(first) = magnitudes.first_mut() {
        *first = first.max(FUNDAMENTAL_EPSILON);
    }

    magnitudes
}
