//! Voice — playback of a generated buffer, one voice at a time.
//!
//! The host's audio callback pulls samples through [`Player::fill`]
//! (AudioWorklet-style). The playback context is created on the first
//! `play` and a new `play` always stops the running voice first, so at most
//! one voice is ever audible.

use std::sync::Arc;

/// A single playing buffer.
#[derive(Debug, Clone)]
pub struct BufferVoice {
    buffer: Arc<[f32]>,
    position: usize,
    /// Wrap to the start instead of finishing.
    pub looped: bool,
    finished: bool,
}

impl BufferVoice {
    pub fn new(buffer: Arc<[f32]>, looped: bool) -> Self {
        let finished = buffer.is_empty();
        BufferVoice {
            buffer,
            position: 0,
            looped,
            finished,
        }
    }

    /// Generate the next sample; silence once finished.
    pub fn next_sample(&mut self) -> f32 {
        if self.finished {
            return 0.0;
        }
        let sample = self.buffer[self.position];
        self.position += 1;
        if self.position >= self.buffer.len() {
            if self.looped {
                self.position = 0;
            } else {
                self.finished = true;
            }
        }
        sample
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Playback context state, created lazily.
#[derive(Debug, Default)]
struct PlaybackContext {
    voice: Option<BufferVoice>,
}

/// Single-owner, single-voice player.
#[derive(Debug, Default)]
pub struct Player {
    context: Option<PlaybackContext>,
}

impl Player {
    pub fn new() -> Self {
        Player::default()
    }

    /// Start `buffer`, stopping whatever was playing.
    pub fn play(&mut self, buffer: Arc<[f32]>, looped: bool) {
        self.stop();
        let context = self.context.get_or_insert_with(|| {
            log::debug!("playback context created");
            PlaybackContext::default()
        });
        log::info!("playback started ({} samples, looped: {looped})", buffer.len());
        context.voice = Some(BufferVoice::new(buffer, looped));
    }

    /// Stop and drop the active voice, if any.
    pub fn stop(&mut self) {
        if let Some(voice) = self.context.as_mut().and_then(|c| c.voice.take()) {
            log::info!("playback stopped at sample {}", voice.position);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.context
            .as_ref()
            .and_then(|c| c.voice.as_ref())
            .is_some_and(|v| !v.is_finished())
    }

    /// Whether a playback context has been acquired.
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Fill `out` with the active voice's samples (silence when idle).
    /// A one-shot voice is released once it runs out.
    pub fn fill(&mut self, out: &mut [f32]) {
        let Some(context) = self.context.as_mut() else {
            out.fill(0.0);
            return;
        };
        match context.voice.as_mut() {
            Some(voice) => {
                for s in out.iter_mut() {
                    *s = voice.next_sample();
                }
                if voice.is_finished() {
                    context.voice = None;
                }
            }
            None => out.fill(0.0),
        }
    }
}
