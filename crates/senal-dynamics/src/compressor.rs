//! Stereo-linked dynamics compressor with soft-knee characteristics.
//!
//! A feed-forward compressor that reduces dynamic range by attenuating
//! signals above a threshold. Both channels share one detector
//! (`max(|L|, |R|)`) and receive identical gain, so the stereo image
//! never shifts.
//!
//! # Parameters
//!
//! | Parameter | Range | Default | Description |
//! |-----------|-------|---------|-------------|
//! | Threshold | -60 to 0 dB | -18.0 | Level where compression begins |
//! | Ratio | 1:1 to 100:1 | 4.0 | Compression strength |
//! | Attack | 0.1-100 ms | 10.0 | How fast gain reduction engages |
//! | Release | 10-2000 ms | 100.0 | How fast gain reduction releases |
//! | Knee | 0-24 dB | 6.0 | Width of the soft transition |
//! | Makeup | 0-24 dB | 0.0 | Output level compensation |
//! | Mix | 0.0-1.0 | 1.0 | Parallel compression blend |

use senal_core::{EnvelopeFollower, db_to_linear, flush_denormal, linear_to_db, wet_dry_mix};

/// Envelope levels below this are treated as silence by the detector.
const ENVELOPE_EPSILON: f32 = 1e-10;

/// dB value substituted for a silent envelope, keeping the gain
/// computer out of the -120 sentinel region.
const ENVELOPE_FLOOR_DB: f32 = -100.0;

/// Per-sample multiplicative decay of the gain-reduction meter.
const METER_DECAY: f32 = 0.9995;

/// Reference input level for automatic makeup gain.
const AUTO_MAKEUP_REF_DB: f32 = -18.0;

/// Fraction of the reference-level reduction compensated by auto-makeup.
/// Full compensation overshoots perceptually on program material.
const AUTO_MAKEUP_SCALE: f32 = 0.7;

/// Gain computer for calculating the compression curve.
#[derive(Debug, Clone)]
struct GainComputer {
    threshold_db: f32,
    ratio: f32,
    knee_db: f32,
}

impl GainComputer {
    fn new() -> Self {
        Self {
            threshold_db: -18.0,
            ratio: 4.0,
            knee_db: 6.0,
        }
    }

    /// Gain reduction in dB (always >= 0) for a given input level in dB.
    ///
    /// Three regions: unity below the knee, a quadratic transition inside
    /// it, and the straight ratio line above. A zero-width knee makes the
    /// middle region empty, degenerating to a hard knee.
    #[inline]
    fn reduction_db(&self, input_db: f32) -> f32 {
        let half_knee = self.knee_db / 2.0;

        if input_db < self.threshold_db - half_knee {
            0.0
        } else if input_db >= self.threshold_db + half_knee {
            (input_db - self.threshold_db) * (1.0 - 1.0 / self.ratio)
        } else {
            let x = input_db - self.threshold_db + half_knee;
            x * x / (2.0 * self.knee_db) * (1.0 - 1.0 / self.ratio)
        }
    }
}

/// Stereo-linked soft-knee compressor with peak-hold metering.
///
/// Long-lived stateful processor bound to one sample rate. Parameter
/// setters clamp silently and take effect at the next
/// [`process_block`](StereoCompressor::process_block) call; changing
/// parameters from another thread during a block is not supported.
///
/// # Example
///
/// ```rust
/// use senal_dynamics::StereoCompressor;
///
/// let mut comp = StereoCompressor::new(48000.0);
/// comp.set_threshold_db(-20.0);
/// comp.set_ratio(4.0);
/// comp.set_attack_ms(5.0);
/// comp.set_release_ms(50.0);
///
/// let mut left = [0.5f32; 64];
/// let mut right = [0.5f32; 64];
/// comp.process_block(&mut left, &mut right);
/// ```
#[derive(Debug, Clone)]
pub struct StereoCompressor {
    envelope: EnvelopeFollower,
    gain_computer: GainComputer,
    /// Manual makeup gain in dB.
    makeup_db: f32,
    /// Whether auto-makeup is folded into the cached factor.
    auto_makeup: bool,
    /// Cached linear makeup factor (manual + auto contribution).
    makeup_linear: f32,
    /// Parallel compression blend, 0.0 = dry, 1.0 = wet.
    mix: f32,
    /// Peak-hold gain reduction meter in dB (always >= 0).
    meter_db: f32,
    sample_rate: f32,
}

impl StereoCompressor {
    /// Create a compressor bound to `sample_rate`.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is not positive.
    pub fn new(sample_rate: f32) -> Self {
        assert!(sample_rate > 0.0, "sample rate must be positive");
        let mut comp = Self {
            envelope: EnvelopeFollower::new(sample_rate),
            gain_computer: GainComputer::new(),
            makeup_db: 0.0,
            auto_makeup: false,
            makeup_linear: 1.0,
            mix: 1.0,
            meter_db: 0.0,
            sample_rate,
        };
        comp.recalculate_makeup();
        comp
    }

    /// Set threshold in dB, clamped to [-60, 0].
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.gain_computer.threshold_db = threshold_db.clamp(-60.0, 0.0);
        self.recalculate_makeup();
    }

    /// Get current threshold in dB.
    pub fn threshold_db(&self) -> f32 {
        self.gain_computer.threshold_db
    }

    /// Set compression ratio, clamped to [1, 100].
    pub fn set_ratio(&mut self, ratio: f32) {
        self.gain_computer.ratio = ratio.clamp(1.0, 100.0);
        self.recalculate_makeup();
    }

    /// Get current compression ratio.
    pub fn ratio(&self) -> f32 {
        self.gain_computer.ratio
    }

    /// Set attack time in milliseconds, clamped to [0.1, 100].
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.envelope.set_attack_ms(attack_ms);
    }

    /// Get current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.envelope.attack_ms()
    }

    /// Set release time in milliseconds, clamped to [10, 2000].
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.envelope.set_release_ms(release_ms);
    }

    /// Get current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.envelope.release_ms()
    }

    /// Set knee width in dB, clamped to [0, 24].
    pub fn set_knee_db(&mut self, knee_db: f32) {
        self.gain_computer.knee_db = knee_db.clamp(0.0, 24.0);
        self.recalculate_makeup();
    }

    /// Get current knee width in dB.
    pub fn knee_db(&self) -> f32 {
        self.gain_computer.knee_db
    }

    /// Set manual makeup gain in dB, clamped to [0, 24].
    pub fn set_makeup_db(&mut self, makeup_db: f32) {
        self.makeup_db = makeup_db.clamp(0.0, 24.0);
        self.recalculate_makeup();
    }

    /// Get current manual makeup gain in dB.
    pub fn makeup_db(&self) -> f32 {
        self.makeup_db
    }

    /// Enable or disable automatic makeup gain.
    ///
    /// When enabled, the reduction the current curve would apply at a
    /// -18 dB reference level, scaled by 0.7, is added to the manual
    /// makeup gain.
    pub fn set_auto_makeup(&mut self, enabled: bool) {
        self.auto_makeup = enabled;
        self.recalculate_makeup();
    }

    /// Whether automatic makeup gain is enabled.
    pub fn auto_makeup(&self) -> bool {
        self.auto_makeup
    }

    /// Set wet/dry mix, clamped to [0, 1]. 1.0 is fully compressed.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Get current wet/dry mix.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Get the sample rate this compressor is bound to.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current peak-hold gain reduction in dB (always >= 0).
    ///
    /// The meter jumps up to any larger instantaneous reduction and
    /// otherwise decays by a factor of 0.9995 per processed sample. Poll
    /// it between [`process_block`](StereoCompressor::process_block)
    /// calls on the thread that owns the compressor.
    pub fn gain_reduction_db(&self) -> f32 {
        self.meter_db
    }

    /// Process one stereo block in place.
    ///
    /// Both channels are scaled by the same gain derived from the linked
    /// detector `max(|L|, |R|)`, then denormal-flushed and blended with
    /// the dry signal per the mix setting.
    ///
    /// # Panics
    ///
    /// Panics if the channel slices have different lengths.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        assert_eq!(
            left.len(),
            right.len(),
            "channel buffers must have equal length"
        );

        // Hoist gain computer constants out of the loop
        let threshold_db = self.gain_computer.threshold_db;
        let knee_db = self.gain_computer.knee_db;
        let half_knee = knee_db / 2.0;
        let inv_ratio_complement = 1.0 - 1.0 / self.gain_computer.ratio;
        let makeup = self.makeup_linear;
        let mix = self.mix;
        let mut meter_db = self.meter_db;

        for i in 0..left.len() {
            let dry_l = left[i];
            let dry_r = right[i];

            // Linked stereo detection: peak of both channels
            let detect = dry_l.abs().max(dry_r.abs());
            let env = self.envelope.process(detect);

            let env_db = if env < ENVELOPE_EPSILON {
                ENVELOPE_FLOOR_DB
            } else {
                linear_to_db(env)
            };

            // Gain computer (inlined from GainComputer::reduction_db)
            let reduction_db = if env_db < threshold_db - half_knee {
                0.0
            } else if env_db >= threshold_db + half_knee {
                (env_db - threshold_db) * inv_ratio_complement
            } else {
                let x = env_db - threshold_db + half_knee;
                x * x / (2.0 * knee_db) * inv_ratio_complement
            };

            let gain = db_to_linear(-reduction_db) * makeup;

            let wet_l = flush_denormal(dry_l * gain);
            let wet_r = flush_denormal(dry_r * gain);

            left[i] = wet_dry_mix(dry_l, wet_l, mix);
            right[i] = wet_dry_mix(dry_r, wet_r, mix);

            // Peak-hold meter: jump up, decay multiplicatively
            if reduction_db > meter_db {
                meter_db = reduction_db;
            } else {
                meter_db *= METER_DECAY;
            }
        }

        self.meter_db = meter_db;
    }

    /// Reset envelope and meter state. Parameters persist. Idempotent.
    pub fn reset(&mut self) {
        self.envelope.reset();
        self.meter_db = 0.0;
    }

    fn recalculate_makeup(&mut self) {
        let mut makeup_db = self.makeup_db;
        if self.auto_makeup {
            makeup_db += self.gain_computer.reduction_db(AUTO_MAKEUP_REF_DB) * AUTO_MAKEUP_SCALE;
        }
        self.makeup_linear = db_to_linear(makeup_db);
    }
}
