//! Synth parameter types.
//!
//! These map directly to the JSON shape the front-end sends
//! (`{"waveform": "sine", "frequencyHz": 440, ...}`).

use serde::{Deserialize, Serialize};

use crate::error::MogSynthError;

/// Fixed render sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

// ── Parameter domains ───────────────────────────────────────

pub const FREQUENCY_RANGE: (f64, f64) = (20.0, 20000.0);
pub const ATTACK_RANGE: (f64, f64) = (0.0, 2.0);
pub const DECAY_RANGE: (f64, f64) = (0.0, 2.0);
pub const SUSTAIN_RANGE: (f64, f64) = (0.0, 1.0);
pub const RELEASE_RANGE: (f64, f64) = (0.0, 5.0);
pub const DURATION_RANGE: (f64, f64) = (0.1, 5.0);

/// Shortest duration the renderer accepts: a single sample. Anything below
/// the UI minimum but above this is still rendered as asked.
pub const MIN_RENDER_SECONDS: f64 = 1.0 / SAMPLE_RATE as f64;

// ── Waveform ────────────────────────────────────────────────

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

// ── Bit depth ───────────────────────────────────────────────

/// Quantization depth. Serialized as a plain integer (8, 16, 24, 32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitDepth {
    Eight,
    #[default]
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

impl BitDepth {
    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
            BitDepth::ThirtyTwo => 32,
        }
    }

    /// Largest positive quantized value: `2^(bits-1) - 1`.
    pub fn max_value(self) -> i64 {
        (1i64 << (self.bits() - 1)) - 1
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = MogSynthError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            24 => Ok(BitDepth::TwentyFour),
            32 => Ok(BitDepth::ThirtyTwo),
            other => Err(MogSynthError::invalid_input(format!(
                "bit depth must be 8, 16, 24 or 32, got {other}"
            ))),
        }
    }
}

impl From<BitDepth> for u32 {
    fn from(depth: BitDepth) -> u32 {
        depth.bits()
    }
}

// ── SynthParameters ─────────────────────────────────────────

/// Everything one render needs. Immutable per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynthParameters {
    pub waveform: Waveform,
    /// Oscillator frequency, [20, 20000] Hz.
    pub frequency_hz: f64,
    /// [0, 2] seconds.
    pub attack_seconds: f64,
    /// [0, 2] seconds.
    pub decay_seconds: f64,
    /// Gain held between decay end and release start, [0, 1].
    pub sustain_level: f64,
    /// [0, 5] seconds.
    pub release_seconds: f64,
    /// Total rendered length, [0.1, 5] seconds.
    pub duration_seconds: f64,
    pub bit_depth: BitDepth,
}

impl Default for SynthParameters {
    fn default() -> Self {
        SynthParameters {
            waveform: Waveform::Sine,
            frequency_hz: 440.0,
            attack_seconds: 0.1,
            decay_seconds: 0.1,
            sustain_level: 0.7,
            release_seconds: 0.5,
            duration_seconds: 1.0,
            bit_depth: BitDepth::Sixteen,
        }
    }
}

impl SynthParameters {
    /// Copy of `self` with every numeric field forced into its domain.
    /// Non-finite values fall back to the default for that field.
    ///
    /// Envelope ordering (`attack + decay <= duration`) is deliberately
    /// left alone; overlapping segments are valid input.
    pub fn clamped(&self) -> Self {
        let d = SynthParameters::default();
        SynthParameters {
            waveform: self.waveform,
            frequency_hz: clamp_or(self.frequency_hz, FREQUENCY_RANGE, d.frequency_hz),
            attack_seconds: clamp_or(self.attack_seconds, ATTACK_RANGE, d.attack_seconds),
            decay_seconds: clamp_or(self.decay_seconds, DECAY_RANGE, d.decay_seconds),
            sustain_level: clamp_or(self.sustain_level, SUSTAIN_RANGE, d.sustain_level),
            release_seconds: clamp_or(self.release_seconds, RELEASE_RANGE, d.release_seconds),
            duration_seconds: clamp_or(
                self.duration_seconds,
                (MIN_RENDER_SECONDS, DURATION_RANGE.1),
                d.duration_seconds,
            ),
            bit_depth: self.bit_depth,
        }
    }

    /// Number of samples a render of these parameters produces.
    pub fn sample_count(&self) -> usize {
        (SAMPLE_RATE as f64 * self.duration_seconds).round() as usize
    }

    /// Parse parameters from the front-end's JSON shape.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MogSynthError::invalid_input(format!("invalid synth parameters: {e}")))
    }
}

fn clamp_or(value: f64, (lo, hi): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}
