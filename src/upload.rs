//! Raw-file upload payloads.
//!
//! A small `.wav`/`.raw` file is deflated (zlib container) and hex-encoded
//! with the same `"0x"` convention as synth payloads, ready for the sound
//! library's `addSound` call. Unrelated to the synthesis pipeline.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{MogSynthError, Result};
use crate::payload::{bytes_to_hex, hex_to_bytes};

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 1024;

/// Accepted file extensions (case-insensitive).
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["wav", "raw"];

/// Read, size-check, compress, and hex-encode a file from disk.
///
/// The size check uses file metadata, so an oversized file is rejected
/// before its contents are read.
pub fn prepare_upload(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(MogSynthError::invalid_input(
            "Unsupported file type. Use a .wav or .raw file.",
        ));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_UPLOAD_BYTES as u64 {
        log::info!("rejected upload {}: {size} bytes", path.display());
        return Err(oversized());
    }

    let bytes = fs::read(path)?;
    encode_upload(&bytes)
}

/// Compress and hex-encode at most [`MAX_UPLOAD_BYTES`] of raw bytes.
pub fn encode_upload(bytes: &[u8]) -> Result<String> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(oversized());
    }

    let compressed = deflate(bytes)?;
    log::debug!(
        "compressed upload {} -> {} bytes",
        bytes.len(),
        compressed.len()
    );
    Ok(bytes_to_hex(&compressed))
}

/// Inverse of [`encode_upload`]: hex-decode and inflate.
pub fn decode_upload(payload: &str) -> Result<Vec<u8>> {
    let compressed = hex_to_bytes(payload)?;
    let mut out = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut out)
        .map_err(|e| MogSynthError::invalid_input(format!("payload is not zlib data: {e}")))?;
    Ok(out)
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| MogSynthError::CompressionFailure(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| MogSynthError::CompressionFailure(e.to_string()))
}

fn oversized() -> MogSynthError {
    MogSynthError::invalid_input("File size exceeds 1KB.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(suffix: &str, len: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(&vec![0x5a; len]).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn one_byte_succeeds() {
        let hex = encode_upload(&[7]).unwrap();
        assert!(hex.starts_with("0x"));
        let body = &hex[2..];
        assert!(!body.is_empty());
        assert_eq!(body.len() % 2, 0, "hex body should be even length");
    }

    #[test]
    fn rejects_oversized_bytes() {
        let err = encode_upload(&[0u8; 1025]).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 1KB.");
    }

    #[test]
    fn accepts_exact_limit() {
        assert!(encode_upload(&[1u8; 1024]).is_ok());
    }

    #[test]
    fn zlib_header_present() {
        let hex = encode_upload(b"hello").unwrap();
        // Default-level zlib streams start with 0x78 0x9c.
        assert!(hex.starts_with("0x789c"), "got {hex}");
    }

    #[test]
    fn decode_reverses_encode() {
        let data: Vec<u8> = (0..=255u8).cycle().take(900).collect();
        let hex = encode_upload(&data).unwrap();
        assert_eq!(decode_upload(&hex).unwrap(), data);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_upload("0xdeadbeef").is_err());
    }

    #[test]
    fn file_path_round_trip() {
        let file = temp_file(".wav", 64);
        let hex = prepare_upload(file.path()).unwrap();
        assert_eq!(decode_upload(&hex).unwrap(), vec![0x5a; 64]);
    }

    #[test]
    fn file_over_limit_rejected() {
        let file = temp_file(".raw", 1025);
        let err = prepare_upload(file.path()).unwrap_err();
        assert!(matches!(err, MogSynthError::InvalidInput(_)), "got {err:?}");
    }

    #[test]
    fn extension_checked_case_insensitively() {
        let file = temp_file(".WAV", 4);
        assert!(prepare_upload(file.path()).is_ok());

        let file = temp_file(".mp3", 4);
        assert!(prepare_upload(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = prepare_upload(Path::new("/definitely/not/here.wav")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to read file.");
    }
}
