//! Señal Dynamics - streaming stereo compressor.
//!
//! A feed-forward, stereo-linked soft-knee compressor designed for the
//! real-time audio path: no allocation, no locking, no logging while
//! processing. The block processor works in place on a pair of channel
//! slices and exposes a peak-hold gain-reduction meter for UI polling.
//!
//! # Signal Flow
//!
//! ```text
//! L/R In → max(|L|,|R|) → Envelope Follower → Gain Computer → Gain
//!                                                   ↓
//!              L/R Out ← Wet/Dry Mix ← Makeup Gain ←┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use senal_dynamics::StereoCompressor;
//!
//! let mut comp = StereoCompressor::new(48000.0);
//! comp.set_threshold_db(-18.0);
//! comp.set_ratio(4.0);
//!
//! let mut left = vec![0.5f32; 256];
//! let mut right = vec![0.5f32; 256];
//! comp.process_block(&mut left, &mut right);
//!
//! assert!(comp.gain_reduction_db() >= 0.0);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! senal-dynamics = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod compressor;

pub use compressor::StereoCompressor;
