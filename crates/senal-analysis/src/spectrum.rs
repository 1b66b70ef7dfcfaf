//! Magnitude half-spectrum sources.
//!
//! The analyzer needs a magnitude spectrum but does not care where it
//! comes from: a host engine may already have one lying around from its
//! visualization path, and computing a fresh FFT is the fallback. The
//! [`SpectrumSource`] trait captures that capability split.

use crate::fft::{Fft, Window};

/// A magnitude half-spectrum plus the FFT size that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    /// Bin magnitudes for `k in [0, fft_size / 2)`, normalized by the
    /// FFT size.
    pub magnitudes: Vec<f32>,
    /// Size of the transform the magnitudes came from.
    pub fft_size: usize,
}

impl SpectralFrame {
    /// Frequency width of one bin in Hz.
    pub fn bin_width(&self, sample_rate: f32) -> f32 {
        sample_rate / self.fft_size as f32
    }

    /// Index of the bin nearest to `freq_hz`, clamped to the frame.
    pub fn nearest_bin(&self, freq_hz: f32, sample_rate: f32) -> usize {
        let bin = (freq_hz / self.bin_width(sample_rate)).round() as usize;
        bin.min(self.magnitudes.len().saturating_sub(1))
    }
}

/// A provider of magnitude half-spectra for a time-domain signal.
///
/// Returning `None` signals that this source cannot produce a usable
/// frame and the caller should fall back to another source.
pub trait SpectrumSource {
    /// Produce a half-spectrum for `signal`, or `None` if unavailable.
    fn half_spectrum(&self, signal: &[f32]) -> Option<SpectralFrame>;
}

/// Spectrum handed over by a host engine.
///
/// Wraps a magnitude half-spectrum the engine already computed. The
/// frame is unusable (and this source yields `None`) when it is empty
/// or carries no energy at all.
#[derive(Debug, Clone)]
pub struct LiveEngineSpectrum {
    magnitudes: Vec<f32>,
    fft_size: usize,
}

impl LiveEngineSpectrum {
    /// Wrap an engine-provided half-spectrum of `fft_size / 2` bins.
    pub fn new(magnitudes: Vec<f32>, fft_size: usize) -> Self {
        Self {
            magnitudes,
            fft_size,
        }
    }
}

impl SpectrumSource for LiveEngineSpectrum {
    fn half_spectrum(&self, _signal: &[f32]) -> Option<SpectralFrame> {
        if self.magnitudes.is_empty() || self.magnitudes.iter().all(|&m| m == 0.0) {
            return None;
        }
        Some(SpectralFrame {
            magnitudes: self.magnitudes.clone(),
            fft_size: self.fft_size,
        })
    }
}

/// Offline FFT fallback: Hann window, zero-pad to the next power of
/// two, magnitudes `|X[k]| / N` for the lower half-spectrum.
#[derive(Debug, Clone, Default)]
pub struct OfflineFftSpectrum {
    window: Window,
}

impl OfflineFftSpectrum {
    /// Create the fallback source with a Hann window.
    pub fn new() -> Self {
        Self {
            window: Window::Hann,
        }
    }
}

impl SpectrumSource for OfflineFftSpectrum {
    fn half_spectrum(&self, signal: &[f32]) -> Option<SpectralFrame> {
        if signal.is_empty() {
            return None;
        }

        let fft_size = signal.len().next_power_of_two().max(2);

        // Pad first, then window: the Hann taper spans the full
        // transform length, so a short buffer and its pre-padded copy
        // produce the same frame
        let mut windowed = signal.to_vec();
        windowed.resize(fft_size, 0.0);
        self.window.apply(&mut windowed);

        let fft = Fft::new(fft_size);
        let spectrum = fft.forward(&windowed);

        let scale = 1.0 / fft_size as f32;
        let magnitudes: Vec<f32> = spectrum[..fft_size / 2]
            .iter()
            .map(|c| c.norm() * scale)
            .collect();

        Some(SpectralFrame {
            magnitudes,
            fft_size,
        })
    }
}
