//! Signal quality analysis: THD, SINAD, SNR, and dynamic range.
//!
//! One-shot offline analysis of a complete buffer. The pipeline:
//!
//! 1. fundamental estimation (autocorrelation, [`crate::pitch`]);
//! 2. harmonic extraction (Goertzel against the raw buffer,
//!    [`crate::goertzel`]);
//! 3. noise floor from the non-harmonic spectral bins
//!    ([`crate::spectrum`]);
//! 4. aggregate metrics and the [`QualityReport`].
//!
//! Silence is not an error: the epsilon floors built into the pipeline
//! produce a conservative report (noise floor at -120 dB, THD 0).

use crate::error::AnalysisError;
use crate::goertzel::harmonic_magnitudes;
use crate::level::{peak, rms};
use crate::pitch::detect_fundamental;
use crate::spectrum::{OfflineFftSpectrum, SpectralFrame, SpectrumSource};
use senal_core::{SILENCE_FLOOR_DB, db_to_linear, linear_to_db};
use std::f32::consts::PI;
use tracing::debug;

/// Bins excluded on each side of a harmonic when estimating the noise
/// floor; a single bin would count window leakage as noise.
const HARMONIC_EXCLUSION_BINS: i32 = 3;

/// Bins below this frequency are DC region, never noise.
const DC_CUTOFF_HZ: f32 = 20.0;

/// Result of a quality analysis pass. Immutable value object.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// Total harmonic distortion in percent.
    pub thd_percent: f32,
    /// Signal to noise-and-distortion ratio in dB.
    pub sinad_db: f32,
    /// Signal to noise ratio in dB.
    pub snr_db: f32,
    /// Peak level over noise floor in dB.
    pub dynamic_range_db: f32,
    /// Detected fundamental frequency in Hz.
    pub fundamental_hz: f32,
    /// Level of each harmonic in dB (fundamental first).
    pub harmonic_levels_db: Vec<f32>,
    /// Spectral noise floor in dB.
    pub noise_floor_db: f32,
    /// Peak sample level in dBFS.
    pub peak_db: f32,
    /// RMS level in dBFS.
    pub rms_db: f32,
}

impl QualityReport {
    /// Classify this report into a [`QualityTier`].
    pub fn tier(&self) -> QualityTier {
        QualityTier::classify(self.thd_percent, self.sinad_db)
    }
}

/// Coarse five-step quality classification for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    /// Measurement-grade: THD below 0.01% and SINAD above 90 dB.
    Excellent,
    /// Hi-fi grade: THD below 0.1% and SINAD above 70 dB.
    Good,
    /// Audible but unobtrusive distortion.
    Fair,
    /// Clearly audible degradation.
    Mediocre,
    /// Heavily degraded signal.
    Poor,
}

impl QualityTier {
    /// Classify a (THD%, SINAD dB) pair.
    pub fn classify(thd_percent: f32, sinad_db: f32) -> Self {
        if thd_percent < 0.01 && sinad_db > 90.0 {
            QualityTier::Excellent
        } else if thd_percent < 0.1 && sinad_db > 70.0 {
            QualityTier::Good
        } else if thd_percent < 1.0 && sinad_db > 50.0 {
            QualityTier::Fair
        } else if thd_percent < 5.0 && sinad_db > 30.0 {
            QualityTier::Mediocre
        } else {
            QualityTier::Poor
        }
    }
}

/// One-shot signal quality analyzer.
///
/// # Example
///
/// ```rust
/// use senal_analysis::{QualityAnalyzer, generate_test_tone};
///
/// let analyzer = QualityAnalyzer::new(48000.0).unwrap();
/// let tone = generate_test_tone(48000.0, 1000.0, 1.0, 0.5);
/// let report = analyzer.analyze(&tone).unwrap();
///
/// assert!(report.thd_percent < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    sample_rate: f32,
    max_harmonics: usize,
    offline: OfflineFftSpectrum,
}

impl QualityAnalyzer {
    /// Create an analyzer bound to `sample_rate`.
    pub fn new(sample_rate: f32) -> Result<Self, AnalysisError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            sample_rate,
            max_harmonics: 10,
            offline: OfflineFftSpectrum::new(),
        })
    }

    /// Set the number of harmonics to extract (at least 1, default 10).
    pub fn with_max_harmonics(mut self, max: usize) -> Self {
        self.max_harmonics = max.max(1);
        self
    }

    /// Analyze a buffer using the offline FFT spectrum.
    ///
    /// The fundamental is estimated by autocorrelation; use
    /// [`analyze_with_fundamental`](QualityAnalyzer::analyze_with_fundamental)
    /// when it is already known.
    pub fn analyze(&self, signal: &[f32]) -> Result<QualityReport, AnalysisError> {
        self.run(signal, None, None)
    }

    /// Analyze a buffer with a caller-supplied fundamental frequency.
    ///
    /// Skips the autocorrelation search entirely. This is the right
    /// entry point when the stimulus is known (test tones) or its
    /// fundamental falls outside the detector's 50-2000 Hz search
    /// range, where detection would lock onto a subharmonic.
    pub fn analyze_with_fundamental(
        &self,
        signal: &[f32],
        fundamental_hz: f32,
    ) -> Result<QualityReport, AnalysisError> {
        self.run(signal, None, Some(fundamental_hz))
    }

    /// Analyze a buffer, preferring an engine-provided spectrum.
    ///
    /// Falls back to the offline FFT when the live source yields no
    /// usable frame.
    pub fn analyze_with_live(
        &self,
        signal: &[f32],
        live: &dyn SpectrumSource,
    ) -> Result<QualityReport, AnalysisError> {
        self.run(signal, Some(live), None)
    }

    fn run(
        &self,
        signal: &[f32],
        live: Option<&dyn SpectrumSource>,
        known_fundamental: Option<f32>,
    ) -> Result<QualityReport, AnalysisError> {
        if signal.is_empty() {
            return Err(AnalysisError::EmptyBuffer);
        }

        let frame = match live.and_then(|source| source.half_spectrum(signal)) {
            Some(frame) => {
                debug!(fft_size = frame.fft_size, source = "live", "spectrum ready");
                frame
            }
            None => {
                let frame = self
                    .offline
                    .half_spectrum(signal)
                    .ok_or(AnalysisError::EmptyBuffer)?;
                debug!(fft_size = frame.fft_size, source = "offline", "spectrum ready");
                frame
            }
        };

        let fundamental_hz = match known_fundamental {
            Some(hz) => {
                debug!(fundamental_hz = hz, "using caller-supplied fundamental");
                hz
            }
            None => {
                let hz = detect_fundamental(signal, self.sample_rate);
                debug!(fundamental_hz = hz, "estimated fundamental");
                hz
            }
        };

        let harmonics =
            harmonic_magnitudes(signal, fundamental_hz, self.sample_rate, self.max_harmonics);
        debug!(count = harmonics.len(), "extracted harmonics");

        let noise_floor_db = self.noise_floor_db(&frame, fundamental_hz);

        let fundamental_mag = harmonics[0];
        let harmonic_power: f32 = harmonics[1..].iter().map(|m| m * m).sum();
        let thd_ratio = harmonic_power.sqrt() / fundamental_mag;

        let noise_linear = db_to_linear(noise_floor_db);
        let sinad_db =
            linear_to_db(fundamental_mag / (noise_linear + fundamental_mag * thd_ratio));
        let snr_db = linear_to_db(fundamental_mag) - noise_floor_db;

        let peak_level = peak(signal);
        let rms_level = rms(signal);
        let dynamic_range_db = linear_to_db(peak_level) - noise_floor_db;

        let harmonic_levels_db = harmonics
            .iter()
            .map(|&m| linear_to_db(m).max(SILENCE_FLOOR_DB))
            .collect();

        Ok(QualityReport {
            thd_percent: thd_ratio * 100.0,
            sinad_db,
            snr_db,
            dynamic_range_db,
            fundamental_hz,
            harmonic_levels_db,
            noise_floor_db,
            peak_db: linear_to_db(peak_level),
            rms_db: linear_to_db(rms_level),
        })
    }

    /// RMS over the spectral bins that belong to neither a harmonic nor
    /// the DC region, in dB.
    fn noise_floor_db(&self, frame: &SpectralFrame, fundamental_hz: f32) -> f32 {
        let bin_width = frame.bin_width(self.sample_rate);
        let nyquist = self.sample_rate / 2.0;

        let harmonic_bins: Vec<i32> = (1..=self.max_harmonics)
            .map(|h| fundamental_hz * h as f32)
            .take_while(|&freq| freq > 0.0 && freq < nyquist)
            .map(|freq| frame.nearest_bin(freq, self.sample_rate) as i32)
            .collect();

        let mut sum_sq = 0.0f32;
        let mut count = 0usize;

        for (i, &mag) in frame.magnitudes.iter().enumerate() {
            let freq = i as f32 * bin_width;
            if freq <= DC_CUTOFF_HZ {
                continue;
            }
            let near_harmonic = harmonic_bins
                .iter()
                .any(|&hb| (i as i32 - hb).abs() <= HARMONIC_EXCLUSION_BINS);
            if near_harmonic {
                continue;
            }
            sum_sq += mag * mag;
            count += 1;
        }

        if count == 0 {
            return SILENCE_FLOOR_DB;
        }
        linear_to_db((sum_sq / count as f32).sqrt())
    }
}

/// Generate a test tone for quality measurement
///
/// # Arguments
/// * `sample_rate` - Sample rate in Hz
/// * `frequency` - Tone frequency in Hz
/// * `duration_secs` - Duration in seconds
/// * `amplitude` - Peak amplitude (0.0 to 1.0)
pub fn generate_test_tone(
    sample_rate: f32,
    frequency: f32,
    duration_secs: f32,
    amplitude: f32,
) -> Vec<f32> {
    let num_samples = (duration_secs * sample_rate) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}
