//! Offline renderer — turns `SynthParameters` into a mono float signal.

use super::envelope::Envelope;
use super::oscillator::Oscillator;
use crate::error::Result;
use crate::params::{SAMPLE_RATE, SynthParameters};

/// Rendered mono audio at `SAMPLE_RATE`, every sample in [-1, 1].
pub type RenderedSignal = Vec<f32>;

/// Something that can render a parameter set to audio.
///
/// The built-in [`OfflineRenderer`] never fails; hosts that defer to an
/// external audio facility report its unavailability as
/// `MogSynthError::RenderFailure`.
pub trait RenderBackend {
    fn render(&self, params: &SynthParameters) -> Result<RenderedSignal>;
}

/// Pure-Rust offline renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRenderer;

impl RenderBackend for OfflineRenderer {
    fn render(&self, params: &SynthParameters) -> Result<RenderedSignal> {
        Ok(render(params))
    }
}

/// Render one oscillator shaped by the ADSR envelope.
///
/// Parameters are clamped into their domains first. The output length is
/// always `round(44100 × duration)`.
pub fn render(params: &SynthParameters) -> RenderedSignal {
    let params = params.clamped();
    let sample_rate = SAMPLE_RATE as f64;
    let len = params.sample_count();

    let envelope = Envelope::new(
        params.attack_seconds,
        params.decay_seconds,
        params.sustain_level,
        params.release_seconds,
        params.duration_seconds,
    );
    let gain = envelope.render(len, sample_rate);

    let mut osc = Oscillator::new(params.waveform, params.frequency_hz, sample_rate);
    let signal: RenderedSignal = gain
        .iter()
        .map(|&g| (osc.next_sample() * g).clamp(-1.0, 1.0) as f32)
        .collect();

    log::debug!(
        "rendered {} samples ({:?} @ {} Hz)",
        signal.len(),
        params.waveform,
        params.frequency_hz
    );
    signal
}

/// Size of the canonical RIFF/WAVE header written by [`encode_wav`].
pub const WAV_HEADER_BYTES: usize = 44;

/// Wrap a rendered signal, already quantized to 16-bit PCM, in a mono WAV
/// container. Used by the controller's "download last render" export.
pub fn encode_wav(pcm: &[i16], sample_rate: u32) -> Vec<u8> {
    const BYTES_PER_SAMPLE: u16 = 2;
    let data_len = (pcm.len() * BYTES_PER_SAMPLE as usize) as u32;

    let mut wav = Vec::with_capacity(WAV_HEADER_BYTES + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(WAV_HEADER_BYTES as u32 - 8 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    // Integer PCM, one channel.
    for word in [1u16, 1u16] {
        wav.extend_from_slice(&word.to_le_bytes());
    }
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * BYTES_PER_SAMPLE as u32).to_le_bytes());
    wav.extend_from_slice(&BYTES_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(&(BYTES_PER_SAMPLE * 8).to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend(pcm.iter().flat_map(|s| s.to_le_bytes()));
    wav
}
