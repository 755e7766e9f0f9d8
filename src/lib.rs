pub mod chain;
pub mod config;
pub mod controller;
pub mod dsp;
pub mod error;
pub mod params;
pub mod payload;
pub mod resolver;
pub mod upload;
pub mod visualizer;

use crate::dsp::quantizer::PayloadWidth;
use crate::params::SynthParameters;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the mogsynth-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Render parameters and encode them as a 16-bit hex payload.
pub fn generate_hex(params: &SynthParameters) -> String {
    let signal = dsp::renderer::render(params);
    payload::encode_signal(&signal, params.bit_depth, PayloadWidth::Fixed16)
}

fn params_from_js(params: JsValue) -> Result<SynthParameters, JsValue> {
    serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render + quantize + encode in one call.
#[wasm_bindgen]
pub fn generate_sound_hex(params: JsValue) -> Result<String, JsValue> {
    let params = params_from_js(params)?;
    Ok(generate_hex(&params))
}

/// WASM-exposed: rendered mono f32 samples, for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_sound_samples(params: JsValue) -> Result<Vec<f32>, JsValue> {
    let params = params_from_js(params)?;
    Ok(dsp::renderer::render(&params))
}

/// WASM-exposed: preview polyline (`[{x, y}, ...]`) for a rendered signal.
#[wasm_bindgen]
pub fn preview_points(samples: &[f32], width: usize, height: f64) -> Result<JsValue, JsValue> {
    let points = visualizer::waveform_points(samples, width, height);
    serde_wasm_bindgen::to_value(&points).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: preview polyline for a library sound's hex payload.
#[wasm_bindgen]
pub fn library_sound_points(payload: &str, width: f64, height: f64) -> Result<JsValue, JsValue> {
    let bytes = payload::hex_to_bytes(payload).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let points = visualizer::byte_waveform_points(&bytes, width, height);
    serde_wasm_bindgen::to_value(&points).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: deflate + hex-encode an uploaded file's bytes.
#[wasm_bindgen]
pub fn encode_upload_hex(bytes: &[u8]) -> Result<String, JsValue> {
    upload::encode_upload(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}
