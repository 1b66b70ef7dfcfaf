//! Fundamental frequency estimation via autocorrelation.
//!
//! Unnormalized time-domain autocorrelation over the lag range that
//! corresponds to candidate fundamentals between 50 Hz and 2000 Hz:
//!
//! ```text
//! R(τ) = Σ_{n} x[n] · x[n + τ]
//! ```
//!
//! The lag with the maximum correlation wins and the fundamental is
//! `sample_rate / best_lag`.

/// Lowest candidate fundamental in Hz.
const MIN_FUNDAMENTAL_HZ: f32 = 50.0;

/// Highest candidate fundamental in Hz.
const MAX_FUNDAMENTAL_HZ: f32 = 2000.0;

/// Estimate the fundamental frequency of `signal` in Hz.
///
/// Searches lags in `[sample_rate / 2000, sample_rate / 50]`, bounded
/// to half the buffer length. The estimate is only meaningful for
/// buffers that actually contain a periodic component at least two
/// periods long; short or aperiodic buffers produce a deterministic
/// but dubious answer (the shortest candidate lag wins by default).
pub fn detect_fundamental(signal: &[f32], sample_rate: f32) -> f32 {
    let min_lag = ((sample_rate / MAX_FUNDAMENTAL_HZ) as usize).max(1);
    let max_lag = ((sample_rate / MIN_FUNDAMENTAL_HZ) as usize).min(signal.len() / 2);

    let mut best_lag = min_lag;
    let mut best_corr = f32::MIN;

    for lag in min_lag..=max_lag {
        let mut corr = 0.0f32;
        for i in 0..signal.len() - lag {
            corr += signal[i] * signal[i + lag];
        }
        if corr > best_corr {
            best_corr = corr;
            best_lag = lag;
        }
    }

    sample_rate / best_lag as f32
}
