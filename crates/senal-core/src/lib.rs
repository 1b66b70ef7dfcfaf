//! Señal Core - DSP primitives shared by the analysis and dynamics crates.
//!
//! Provides the foundational building blocks both halves of the workspace
//! rely on, designed for real-time audio processing with zero allocation in
//! the audio path.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`SILENCE_FLOOR_DB`] - The −120 dB sentinel for "no meaningful signal"
//!
//! # Dynamics
//!
//! - [`EnvelopeFollower`] - Attack/release level smoother for gain processors
//!
//! # Utilities
//!
//! - [`flush_denormal`] - Hard-zero sub-denormal values in feedback paths
//! - [`wet_dry_mix`] - Parallel-processing crossfade
//! - [`ms_to_samples`] - Time-constant unit conversion
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! senal-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod envelope;
pub mod math;

pub use envelope::EnvelopeFollower;
pub use math::{
    SILENCE_FLOOR_DB, db_to_linear, flush_denormal, linear_to_db, ms_to_samples, wet_dry_mix,
};
