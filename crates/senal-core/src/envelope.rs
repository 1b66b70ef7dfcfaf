//! Envelope follower for tracking signal level.
//!
//! The detection front end of the dynamics compressor: a one-pole smoother
//! with separate attack and release time constants.

use crate::math::ms_to_samples;
use libm::expf;

/// One-pole envelope follower with separate attack and release times.
///
/// The caller supplies a non-negative detection level per sample (for a
/// stereo-linked detector this is `max(|left|, |right|)`); the follower
/// smooths it with the attack coefficient while the level rises and the
/// release coefficient while it falls.
///
/// # Example
///
/// ```rust
/// use senal_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::new(48000.0);
/// env.set_attack_ms(10.0);
/// env.set_release_ms(100.0);
///
/// let level = env.process(0.5);
/// assert!(level > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear, always >= 0)
    envelope: f32,
    /// Attack coefficient
    attack_coeff: f32,
    /// Release coefficient
    release_coeff: f32,
    /// Sample rate
    sample_rate: f32,
    /// Attack time in ms (for recalculation)
    attack_ms: f32,
    /// Release time in ms (for recalculation)
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Create a new envelope follower with default times (10 ms / 100 ms).
    pub fn new(sample_rate: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms: 10.0,
            release_ms: 100.0,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Set the attack time in milliseconds, clamped to [0.1, 100].
    ///
    /// Attack is how quickly the envelope rises to match the input level.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.clamp(0.1, 100.0);
        self.recalculate_coefficients();
    }

    /// Get current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set the release time in milliseconds, clamped to [10, 2000].
    ///
    /// Release is how quickly the envelope falls after the input decreases.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms.clamp(10.0, 2000.0);
        self.recalculate_coefficients();
    }

    /// Get current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Process one detection level and return the smoothed envelope.
    ///
    /// `detect` must be non-negative (a rectified or peak-linked level).
    #[inline]
    pub fn process(&mut self, detect: f32) -> f32 {
        // Attack while the signal rises, release while it falls
        let coeff = if detect > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        // Exponential smoothing: y[n] = coeff * y[n-1] + (1 - coeff) * x[n]
        self.envelope = coeff * self.envelope + (1.0 - coeff) * detect;
        self.envelope
    }

    /// Get current envelope level without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero. Times and coefficients persist.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        // coeff = exp(-1 / time_constant_in_samples)
        self.attack_coeff = expf(-1.0 / ms_to_samples(self.attack_ms, self.sample_rate));
        self.release_coeff = expf(-1.0 / ms_to_samples(self.release_ms, self.sample_rate));
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_attack() {
        let mut env = EnvelopeFollower::new(48000.0);
        env.set_attack_ms(1.0); // Fast attack
        env.reset();

        // Feed constant level
        let mut envelope = 0.0;
        for _ in 0..500 {
            envelope = env.process(1.0);
        }

        // Should have risen close to 1.0
        assert!(envelope > 0.9, "Envelope should rise, got {}", envelope);
    }

    #[test]
    fn test_envelope_release() {
        let mut env = EnvelopeFollower::new(48000.0);
        env.set_attack_ms(1.0);
        env.set_release_ms(10.0);

        // Fill with signal
        for _ in 0..500 {
            env.process(1.0);
        }

        // Now silence
        let mut envelope = 0.0;
        for _ in 0..1000 {
            envelope = env.process(0.0);
        }

        // After ~2 time constants, expect e^-2 ≈ 0.135
        assert!(envelope < 0.15, "Envelope should fall, got {}", envelope);
    }

    #[test]
    fn test_envelope_time_clamps() {
        let mut env = EnvelopeFollower::new(48000.0);
        env.set_attack_ms(0.0);
        assert_eq!(env.attack_ms(), 0.1);
        env.set_attack_ms(500.0);
        assert_eq!(env.attack_ms(), 100.0);
        env.set_release_ms(1.0);
        assert_eq!(env.release_ms(), 10.0);
        env.set_release_ms(10000.0);
        assert_eq!(env.release_ms(), 2000.0);
    }

    #[test]
    fn test_envelope_reset() {
        let mut env = EnvelopeFollower::new(48000.0);

        for _ in 0..100 {
            env.process(1.0);
        }

        env.reset();
        assert_eq!(env.level(), 0.0);
    }
}
