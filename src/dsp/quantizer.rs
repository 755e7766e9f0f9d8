//! Float → fixed-point PCM conversion.

use serde::{Deserialize, Serialize};

use crate::params::BitDepth;

/// How wide each quantized sample is stored and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadWidth {
    /// Scale by the requested bit depth but store every sample in a 16-bit
    /// container, wrapping like a JS `Int16Array` assignment. This is the
    /// format existing on-chain payloads were written in.
    #[default]
    Fixed16,
    /// Store at the requested bit depth with no wrap-around.
    MatchBitDepth,
}

/// Clamp, scale by the bit depth, and truncate one sample.
fn scaled(sample: f32, depth: BitDepth) -> i64 {
    let clamped = (sample as f64).clamp(-1.0, 1.0);
    // `as` truncates toward zero.
    (clamped * depth.max_value() as f64) as i64
}

/// Quantize into 16-bit storage.
///
/// For depths above 16 bits the scaled value is truncated and then only
/// its low 16 bits are kept (two's-complement wrap).
pub fn quantize_fixed16(signal: &[f32], depth: BitDepth) -> Vec<i16> {
    signal.iter().map(|&s| scaled(s, depth) as i16).collect()
}

/// Quantize at native width; values lie in `[-(2^(N-1)-1), 2^(N-1)-1]`.
pub fn quantize_native(signal: &[f32], depth: BitDepth) -> Vec<i32> {
    signal.iter().map(|&s| scaled(s, depth) as i32).collect()
}
