//! Hex payload encoding for sound bytecode.
//!
//! Payloads are `"0x"` followed by fixed-width lowercase hex groups, one per
//! sample, negative samples written as their two's-complement bit pattern.
//! The string is handed to the contract layer as an opaque argument.

use std::fmt::Write;

use crate::dsp::quantizer::{self, PayloadWidth};
use crate::dsp::renderer::RenderedSignal;
use crate::error::{MogSynthError, Result};
use crate::params::BitDepth;

pub const HEX_PREFIX: &str = "0x";

/// Hex digits per sample in the default 16-bit layout.
pub const FIXED16_DIGITS: usize = 4;

/// Encode 16-bit samples: 4 hex digits each, `"0x"`-prefixed.
pub fn encode_hex(samples: &[i16]) -> String {
    let mut out = String::with_capacity(HEX_PREFIX.len() + samples.len() * FIXED16_DIGITS);
    out.push_str(HEX_PREFIX);
    for &sample in samples {
        // Reinterpreting as u16 is the +65536 wrap for negatives.
        let _ = write!(out, "{:04x}", sample as u16);
    }
    out
}

/// Inverse of [`encode_hex`].
pub fn decode_hex(payload: &str) -> Result<Vec<i16>> {
    let groups = hex_groups(payload, FIXED16_DIGITS)?;
    groups
        .into_iter()
        .map(|group| {
            u16::from_str_radix(group, 16)
                .map(|v| v as i16)
                .map_err(|_| MogSynthError::invalid_input(format!("invalid hex group '{group}'")))
        })
        .collect()
}

/// Encode native-width samples: `bits / 4` hex digits each.
pub fn encode_hex_wide(samples: &[i32], depth: BitDepth) -> String {
    let digits = (depth.bits() / 4) as usize;
    let mask: u64 = (1u64 << depth.bits()) - 1;
    let mut out = String::with_capacity(HEX_PREFIX.len() + samples.len() * digits);
    out.push_str(HEX_PREFIX);
    for &sample in samples {
        let unsigned = (sample as i64 as u64) & mask;
        let _ = write!(out, "{unsigned:0digits$x}");
    }
    out
}

/// Inverse of [`encode_hex_wide`].
pub fn decode_hex_wide(payload: &str, depth: BitDepth) -> Result<Vec<i32>> {
    let bits = depth.bits();
    let groups = hex_groups(payload, (bits / 4) as usize)?;
    groups
        .into_iter()
        .map(|group| {
            let unsigned = u64::from_str_radix(group, 16)
                .map_err(|_| MogSynthError::invalid_input(format!("invalid hex group '{group}'")))?;
            // Sign-extend from `bits`.
            let shift = 64 - bits;
            Ok((((unsigned << shift) as i64) >> shift) as i32)
        })
        .collect()
}

/// Quantize and encode a rendered signal in one step.
pub fn encode_signal(signal: &RenderedSignal, depth: BitDepth, width: PayloadWidth) -> String {
    match width {
        PayloadWidth::Fixed16 => encode_hex(&quantizer::quantize_fixed16(signal, depth)),
        PayloadWidth::MatchBitDepth => {
            encode_hex_wide(&quantizer::quantize_native(signal, depth), depth)
        }
    }
}

/// Decode a `"0x"` hex string into raw bytes (two hex digits each).
pub fn hex_to_bytes(payload: &str) -> Result<Vec<u8>> {
    hex_groups(payload, 2)?
        .into_iter()
        .map(|pair| {
            u8::from_str_radix(pair, 16)
                .map_err(|_| MogSynthError::invalid_input(format!("invalid hex byte '{pair}'")))
        })
        .collect()
}

/// `"0x"` + two lowercase hex digits per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(HEX_PREFIX.len() + bytes.len() * 2);
    out.push_str(HEX_PREFIX);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

fn hex_groups(payload: &str, digits: usize) -> Result<Vec<&str>> {
    let body = payload
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| MogSynthError::invalid_input("payload must start with 0x"))?;
    if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MogSynthError::invalid_input("payload contains non-hex characters"));
    }
    if body.len() % digits != 0 {
        return Err(MogSynthError::invalid_input(format!(
            "payload length {} is not a multiple of {digits} hex digits",
            body.len()
        )));
    }
    Ok((0..body.len())
        .step_by(digits)
        .map(|i| &body[i..i + digits])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::renderer::render;
    use crate::params::{SynthParameters, Waveform};
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_sample() {
        assert_eq!(encode_hex(&[0]), "0x0000");
    }

    #[test]
    fn full_scale_samples() {
        assert_eq!(encode_hex(&[32767]), "0x7fff");
        // -32767 + 65536 = 32769 = 0x8001
        assert_eq!(encode_hex(&[-32767]), "0x8001");
        assert_eq!(encode_hex(&[-1, i16::MIN]), "0xffff8000");
    }

    #[test]
    fn empty_sequence_is_prefix_only() {
        assert_eq!(encode_hex(&[]), "0x");
        assert_eq!(decode_hex("0x").unwrap(), Vec::<i16>::new());
    }

    #[test]
    fn decode_reverses_encode() {
        let samples = [0, 1, -1, 32767, -32767, -32768, 12345, -4321];
        assert_eq!(decode_hex(&encode_hex(&samples)).unwrap(), samples.to_vec());
    }

    #[test]
    fn decode_rejects_malformed() {
        assert!(decode_hex("0000").is_err(), "missing prefix");
        assert!(decode_hex("0x000").is_err(), "partial group");
        assert!(decode_hex("0xzzzz").is_err(), "non-hex digits");
        assert!(decode_hex("0x00é0").is_err(), "non-ascii");
        assert!(decode_hex("0x+fff").is_err(), "sign character");
    }

    #[test]
    fn rendered_payload_length_and_round_trip() {
        let params = SynthParameters {
            waveform: Waveform::Sawtooth,
            duration_seconds: 0.1,
            ..SynthParameters::default()
        };
        let signal = render(&params);
        let payload = encode_signal(&signal, params.bit_depth, PayloadWidth::Fixed16);
        assert_eq!(payload.len(), 2 + 4 * signal.len());

        let expected = quantizer::quantize_fixed16(&signal, params.bit_depth);
        assert_eq!(decode_hex(&payload).unwrap(), expected);
    }

    #[test]
    fn silent_single_sample_encodes_to_zero() {
        let params = SynthParameters {
            waveform: Waveform::Sine,
            frequency_hz: 440.0,
            attack_seconds: 0.0,
            decay_seconds: 0.0,
            sustain_level: 1.0,
            release_seconds: 0.0,
            duration_seconds: 1.0 / 44100.0,
            bit_depth: BitDepth::Sixteen,
        };
        let signal = render(&params);
        assert_eq!(
            encode_signal(&signal, params.bit_depth, PayloadWidth::Fixed16),
            "0x0000"
        );
    }

    #[test]
    fn wide_encoding_tracks_bit_depth() {
        assert_eq!(encode_hex_wide(&[127, -127], BitDepth::Eight), "0x7f81");
        assert_eq!(
            encode_hex_wide(&[8_388_607, -8_388_607], BitDepth::TwentyFour),
            "0x7fffff800001"
        );
        assert_eq!(encode_hex_wide(&[-1], BitDepth::ThirtyTwo), "0xffffffff");
    }

    #[test]
    fn wide_decode_sign_extends() {
        let samples = vec![i32::MAX, -i32::MAX, 0, -5];
        let payload = encode_hex_wide(&samples, BitDepth::ThirtyTwo);
        assert_eq!(decode_hex_wide(&payload, BitDepth::ThirtyTwo).unwrap(), samples);

        let samples = vec![-8_388_607, 42];
        let payload = encode_hex_wide(&samples, BitDepth::TwentyFour);
        assert_eq!(decode_hex_wide(&payload, BitDepth::TwentyFour).unwrap(), samples);
    }

    #[test]
    fn byte_hex_helpers() {
        assert_eq!(bytes_to_hex(&[0x00, 0xab, 0x10]), "0x00ab10");
        assert_eq!(hex_to_bytes("0x00ab10").unwrap(), vec![0x00, 0xab, 0x10]);
        assert!(hex_to_bytes("0xabc").is_err());
    }
}
