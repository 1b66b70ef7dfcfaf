//! Señal Analysis - offline signal quality measurement.
//!
//! One-shot analysis of complete audio buffers producing a structured
//! quality report: THD, SINAD, SNR, dynamic range, per-harmonic levels,
//! noise floor, and peak/RMS.
//!
//! - [`quality`] - The [`QualityAnalyzer`] and its report types
//! - [`pitch`] - Autocorrelation fundamental estimation
//! - [`goertzel`] - Single-bin harmonic extraction
//! - [`spectrum`] - Magnitude spectrum sources (live or offline FFT)
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`level`] - Peak and RMS measurements
//!
//! # Example
//!
//! ```rust
//! use senal_analysis::{QualityAnalyzer, generate_test_tone};
//!
//! let analyzer = QualityAnalyzer::new(48000.0).unwrap();
//! let tone = generate_test_tone(48000.0, 1000.0, 1.0, 0.5);
//!
//! let report = analyzer.analyze(&tone).unwrap();
//! println!(
//!     "THD {:.3}%  SINAD {:.1} dB  fundamental {:.0} Hz",
//!     report.thd_percent, report.sinad_db, report.fundamental_hz
//! );
//! ```
//!
//! # Engine-provided spectra
//!
//! A host that already computed a magnitude spectrum for visualization
//! can hand it over instead of paying for a second FFT:
//!
//! ```rust
//! use senal_analysis::{LiveEngineSpectrum, QualityAnalyzer, generate_test_tone};
//!
//! let analyzer = QualityAnalyzer::new(48000.0).unwrap();
//! let tone = generate_test_tone(48000.0, 1000.0, 0.5, 0.5);
//!
//! // An unusable live frame falls back to the offline FFT
//! let live = LiveEngineSpectrum::new(vec![], 0);
//! let report = analyzer.analyze_with_live(&tone, &live).unwrap();
//! assert!(report.fundamental_hz > 0.0);
//! ```

pub mod error;
pub mod fft;
pub mod goertzel;
pub mod level;
pub mod pitch;
pub mod quality;
pub mod spectrum;

pub use error::AnalysisError;
pub use goertzel::{goertzel_magnitude, harmonic_magnitudes};
pub use level::{peak, peak_db, rms, rms_db};
pub use pitch::detect_fundamental;
pub use quality::{QualityAnalyzer, QualityReport, QualityTier, generate_test_tone};
pub use spectrum::{LiveEngineSpectrum, OfflineFftSpectrum, SpectralFrame, SpectrumSource};
