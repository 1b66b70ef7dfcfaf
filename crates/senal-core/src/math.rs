//! Mathematical utility functions for DSP.
//!
//! Allocation-free, `no_std`-suitable level conversions and sample helpers.
//! The dB conversions define the sentinel behavior the rest of the workspace
//! depends on: any non-positive linear value maps to [`SILENCE_FLOOR_DB`],
//! so downstream arithmetic never sees a NaN or −∞.

use libm::{expf, logf};

/// The dB value reported for signals with no measurable energy.
///
/// This is a clamp, not a measurement: [`linear_to_db`] returns it for any
/// non-positive input, and the analyzer reports it as the noise floor of a
/// silent buffer. Tests rely on the exact value.
pub const SILENCE_FLOOR_DB: f32 = -120.0;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use senal_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Non-positive inputs return [`SILENCE_FLOOR_DB`] instead of −∞ or NaN.
///
/// # Example
/// ```rust
/// use senal_core::{SILENCE_FLOOR_DB, linear_to_db};
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// assert_eq!(linear_to_db(0.0), SILENCE_FLOOR_DB);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    if linear <= 0.0 {
        SILENCE_FLOOR_DB
    } else {
        logf(linear) * FACTOR
    }
}

/// Flush near-zero floats to exact zero.
///
/// Values with magnitude below 1e-15 are hard-zeroed. Denormalized floats
/// cause severe CPU slowdowns on most architectures; the compressor's output
/// path must never emit them.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-15 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` but uses one fewer multiply:
/// `dry + (wet - dry) * mix`.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}
