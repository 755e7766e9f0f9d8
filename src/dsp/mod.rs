//! DSP — oscillator rendering, envelope shaping, quantization, playback.
//!
//! Everything here is synchronous and deterministic: identical parameters
//! always produce identical samples, on native targets and in WASM alike.

pub mod envelope;
pub mod oscillator;
pub mod quantizer;
pub mod renderer;
pub mod voice;
