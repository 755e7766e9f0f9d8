//! Unit-amplitude periodic oscillator.
//!
//! Shapes follow WebAudio's phase conventions so rendered payloads match
//! what the browser's `OscillatorNode` produced: every shape except square
//! starts at 0, square starts at +1.

use std::f64::consts::PI;

use crate::params::Waveform;

/// Naive (non-band-limited) oscillator starting at zero phase.
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f64,
    /// Position within the current cycle, [0, 1).
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        Oscillator {
            waveform,
            frequency,
            phase: 0.0,
            sample_rate,
        }
    }

    /// Phase increment per sample.
    fn phase_inc(&self) -> f64 {
        self.frequency / self.sample_rate
    }

    /// Generate the next sample in [-1, 1].
    pub fn next_sample(&mut self) -> f64 {
        let sample = shape(self.waveform, self.phase);

        self.phase += self.phase_inc();
        self.phase -= self.phase.floor();

        sample
    }

    /// Reset oscillator phase.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Evaluate one cycle of `waveform` at `phase` ∈ [0, 1).
pub fn shape(waveform: Waveform, phase: f64) -> f64 {
    match waveform {
        Waveform::Sine => (2.0 * PI * phase).sin(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        // Rises 0 → 1 over the first half, wraps to -1, rises back to 0.
        Waveform::Sawtooth => {
            if phase < 0.5 {
                2.0 * phase
            } else {
                2.0 * phase - 2.0
            }
        }
        Waveform::Triangle => {
            if phase < 0.25 {
                4.0 * phase
            } else if phase < 0.75 {
                2.0 - 4.0 * phase
            } else {
                4.0 * phase - 4.0
            }
        }
    }
}
