//! Buffer-level measurements: peak and RMS.

use senal_core::linear_to_db;

/// Peak absolute sample value of a buffer.
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// Root-mean-square level of a buffer. Empty buffers measure 0.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = signal.iter().map(|&x| x * x).sum();
    (sum_sq / signal.len() as f32).sqrt()
}

/// Peak level in dBFS. Silence measures the -120 dB floor.
pub fn peak_db(signal: &[f32]) -> f32 {
    linear_to_db(peak(signal))
}

/// RMS level in dBFS. Silence measures the -120 dB floor.
pub fn rms_db(signal: &[f32]) -> f32 {
    linear_to_db(rms(signal))
}
