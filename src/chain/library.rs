//! SoundLibrary contract helpers.

use serde::{Deserialize, Serialize};

use super::{Contract, ContractCall, ContractClient, ContractQuery, Receipt, submit_and_confirm};
use crate::error::{MogSynthError, Result};
use crate::payload::{HEX_PREFIX, hex_to_bytes};

/// A sound stored in a library, as returned by `getSound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySound {
    /// `0x`-prefixed hex payload.
    pub data: String,
    /// The library's configured bit depth.
    pub bit_depth: u32,
}

impl LibrarySound {
    /// Raw payload bytes, for the byte-waveform preview.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        hex_to_bytes(&self.data)
    }
}

/// Upper bound on sounds read from one library. `getTotalSounds` is
/// contract-reported and only trusted up to this many reads.
pub const MAX_FETCHED_SOUNDS: u64 = 1024;

/// Store `payload` in the library at `library_address` via `addSound`.
pub fn add_sound<C: ContractClient + ?Sized>(
    client: &C,
    library_address: &str,
    payload: &str,
) -> Result<Receipt> {
    if !payload.starts_with(HEX_PREFIX) {
        return Err(MogSynthError::invalid_input("sound payload must start with 0x"));
    }
    submit_and_confirm(
        client,
        ContractCall {
            contract: Contract::SoundLibrary,
            address: library_address.to_string(),
            function_name: "addSound".to_string(),
            args: vec![payload.into()],
            value_wei: None,
        },
    )
}

/// Read every sound in a library along with its bit depth.
///
/// Reads that come back malformed are skipped, matching how the preview
/// list only shows successful results.
pub fn fetch_sounds<C: ContractClient + ?Sized>(
    client: &C,
    library_address: &str,
) -> Result<Vec<LibrarySound>> {
    let query = |name: &str| ContractQuery::new(Contract::SoundLibrary, library_address, name);

    let total = read_u64(client, &query("getTotalSounds"))?;
    let raw_depth = read_u64(client, &query("bitDepth"))?;
    let bit_depth = u32::try_from(raw_depth)
        .map_err(|_| MogSynthError::network(format!("bitDepth out of range: {raw_depth}")))?;

    if total > MAX_FETCHED_SOUNDS {
        log::warn!("library reports {total} sounds; reading the first {MAX_FETCHED_SOUNDS}");
    }
    let mut sounds = Vec::new();
    for index in 0..total.min(MAX_FETCHED_SOUNDS) {
        match client.read(&query("getSound").arg(index)) {
            Ok(serde_json::Value::String(data)) => sounds.push(LibrarySound { data, bit_depth }),
            Ok(other) => log::warn!("getSound({index}) returned non-string {other}"),
            Err(e) => log::warn!("getSound({index}) failed: {e}"),
        }
    }
    log::debug!("fetched {}/{total} sounds from {library_address}", sounds.len());
    Ok(sounds)
}

/// Integer read; accepts JSON numbers or decimal strings (bigints).
fn read_u64<C: ContractClient + ?Sized>(client: &C, query: &ContractQuery) -> Result<u64> {
    let value = client.read(query)?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| {
            MogSynthError::network(format!(
                "{} returned a non-integer: {value}",
                query.function_name
            ))
        })
}
