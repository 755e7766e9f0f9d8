//! Synth controller — the state behind the "Generate" / play / stop UI.
//!
//! Holds the current parameters, the last rendered signal and payload, and
//! the player. One generate may be in flight at a time; a failed generate
//! leaves the previous signal and payload untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::dsp::quantizer::{self, PayloadWidth};
use crate::dsp::renderer::{OfflineRenderer, RenderBackend, encode_wav};
use crate::dsp::voice::Player;
use crate::error::{MogSynthError, Result};
use crate::params::{BitDepth, SAMPLE_RATE, SynthParameters};
use crate::payload::encode_signal;
use crate::visualizer::{Point, waveform_points};

struct ControllerState {
    params: SynthParameters,
    signal: Option<Arc<[f32]>>,
    payload: Option<String>,
    player: Player,
}

/// Clears the busy flag when a generate finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SynthController<B: RenderBackend = OfflineRenderer> {
    backend: B,
    payload_width: PayloadWidth,
    busy: AtomicBool,
    state: Mutex<ControllerState>,
}

impl SynthController<OfflineRenderer> {
    pub fn new(params: SynthParameters) -> Self {
        SynthController::with_backend(OfflineRenderer, params, PayloadWidth::Fixed16)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        SynthController::with_backend(
            OfflineRenderer,
            config.default_parameters.clone(),
            config.payload_width,
        )
    }
}

impl<B: RenderBackend> SynthController<B> {
    pub fn with_backend(backend: B, params: SynthParameters, payload_width: PayloadWidth) -> Self {
        SynthController {
            backend,
            payload_width,
            busy: AtomicBool::new(false),
            state: Mutex::new(ControllerState {
                params,
                signal: None,
                payload: None,
                player: Player::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn parameters(&self) -> SynthParameters {
        self.state().params.clone()
    }

    pub fn set_parameters(&self, params: SynthParameters) {
        self.state().params = params;
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Render, quantize, and encode the current parameters.
    ///
    /// Fails with `RenderFailure` if another generate is still running or
    /// the backend fails; state is only updated on success.
    pub fn generate(&self) -> Result<String> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("generate ignored: render already in progress");
            return Err(MogSynthError::render("render already in progress"));
        }
        let _busy = BusyGuard(&self.busy);

        let params = self.parameters();
        log::info!("generating {:?} at {} Hz", params.waveform, params.frequency_hz);

        let signal = self.backend.render(&params).inspect_err(|e| {
            log::warn!("generate failed: {e}");
        })?;
        let payload = encode_signal(&signal, params.bit_depth, self.payload_width);

        let mut state = self.state();
        state.signal = Some(Arc::from(signal));
        state.payload = Some(payload.clone());
        log::info!("generated payload of {} hex chars", payload.len());
        Ok(payload)
    }

    /// Last successfully generated payload.
    pub fn payload(&self) -> Option<String> {
        self.state().payload.clone()
    }

    /// Last successfully rendered signal.
    pub fn signal(&self) -> Option<Arc<[f32]>> {
        self.state().signal.clone()
    }

    /// Preview polyline for the last render.
    pub fn preview(&self, width: usize, height: f64) -> Vec<Point> {
        self.signal()
            .map(|s| waveform_points(&s, width, height))
            .unwrap_or_default()
    }

    /// Last render as a 16-bit mono WAV file.
    pub fn export_wav(&self) -> Option<Vec<u8>> {
        let signal = self.signal()?;
        let pcm = quantizer::quantize_fixed16(&signal, BitDepth::Sixteen);
        Some(encode_wav(&pcm, SAMPLE_RATE))
    }

    /// Play the last render; a no-op before the first generate.
    pub fn play(&self, looped: bool) {
        let mut state = self.state();
        match state.signal.clone() {
            Some(signal) => state.player.play(signal, looped),
            None => log::info!("No audio buffer to play. Generate sound first."),
        }
    }

    pub fn stop(&self) {
        self.state().player.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.state().player.is_playing()
    }

    /// Pull playback samples for the host's audio callback.
    pub fn fill(&self, out: &mut [f32]) {
        self.state().player.fill(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::renderer::RenderedSignal;
    use crate::params::Waveform;
    use crate::payload::decode_hex;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;

    fn short_params() -> SynthParameters {
        SynthParameters {
            duration_seconds: 0.1,
            ..SynthParameters::default()
        }
    }

    struct FailingBackend;

    impl RenderBackend for FailingBackend {
        fn render(&self, _params: &SynthParameters) -> Result<RenderedSignal> {
            Err(MogSynthError::render("offline audio unsupported"))
        }
    }

    /// Renders once, then fails every later call.
    #[derive(Default)]
    struct FailsAfterFirst {
        calls: AtomicUsize,
    }

    impl RenderBackend for FailsAfterFirst {
        fn render(&self, params: &SynthParameters) -> Result<RenderedSignal> {
            match self.calls.fetch_add(1, Ordering::SeqCst) {
                0 => OfflineRenderer.render(params),
                _ => Err(MogSynthError::render("audio context lost")),
            }
        }
    }

    /// Blocks inside `render` until released.
    struct GatedBackend {
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl RenderBackend for GatedBackend {
        fn render(&self, params: &SynthParameters) -> Result<RenderedSignal> {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            OfflineRenderer.render(params)
        }
    }

    #[test]
    fn generate_produces_payload() {
        let controller = SynthController::new(short_params());
        let payload = controller.generate().unwrap();
        assert_eq!(payload.len(), 2 + 4 * 4410);
        assert_eq!(controller.payload(), Some(payload.clone()));
        assert_eq!(decode_hex(&payload).unwrap().len(), 4410);
        assert!(!controller.is_busy());
    }

    #[test]
    fn identical_parameters_identical_payload() {
        let a = SynthController::new(short_params()).generate().unwrap();
        let b = SynthController::new(short_params()).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn failed_render_keeps_previous_state() {
        let controller = SynthController::with_backend(
            FailsAfterFirst::default(),
            short_params(),
            PayloadWidth::Fixed16,
        );
        let first = controller.generate().unwrap();
        let first_signal = controller.signal().unwrap();

        controller.set_parameters(SynthParameters {
            waveform: Waveform::Square,
            ..short_params()
        });
        let err = controller.generate().unwrap_err();
        assert!(matches!(err, MogSynthError::RenderFailure(_)), "got {err:?}");

        assert_eq!(controller.payload(), Some(first));
        assert_eq!(controller.signal().unwrap(), first_signal);
        assert!(!controller.is_busy(), "busy flag cleared after failure");
    }

    #[test]
    fn failing_backend_never_stores_payload() {
        let controller =
            SynthController::with_backend(FailingBackend, short_params(), PayloadWidth::Fixed16);
        assert!(controller.generate().is_err());
        assert_eq!(controller.payload(), None);
        assert!(controller.signal().is_none());
    }

    #[test]
    fn concurrent_generate_is_rejected() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let controller = Arc::new(SynthController::with_backend(
            GatedBackend {
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
            },
            short_params(),
            PayloadWidth::Fixed16,
        ));

        let worker = {
            let controller = Arc::clone(&controller);
            std::thread::spawn(move || controller.generate())
        };
        entered_rx.recv().unwrap();
        assert!(controller.is_busy());

        let err = controller.generate().unwrap_err();
        assert!(matches!(err, MogSynthError::RenderFailure(_)), "got {err:?}");

        release_tx.send(()).unwrap();
        assert!(worker.join().unwrap().is_ok());
        assert!(!controller.is_busy());
        assert!(controller.payload().is_some());
    }

    #[test]
    fn wide_payload_from_config() {
        let config = AppConfig {
            payload_width: PayloadWidth::MatchBitDepth,
            default_parameters: SynthParameters {
                bit_depth: BitDepth::TwentyFour,
                ..short_params()
            },
            ..AppConfig::default()
        };
        let payload = SynthController::from_config(&config).generate().unwrap();
        assert_eq!(payload.len(), 2 + 6 * 4410);
    }

    #[test]
    fn play_before_generate_is_noop() {
        let controller = SynthController::new(short_params());
        controller.play(true);
        assert!(!controller.is_playing());
    }

    #[test]
    fn play_streams_rendered_signal() {
        let controller = SynthController::new(short_params());
        controller.generate().unwrap();
        controller.play(false);
        assert!(controller.is_playing());

        let signal = controller.signal().unwrap();
        let mut out = vec![0.0f32; 64];
        controller.fill(&mut out);
        assert_eq!(&out[..], &signal[..64]);

        controller.stop();
        assert!(!controller.is_playing());
    }

    #[test]
    fn preview_and_wav_follow_last_render() {
        let controller = SynthController::new(short_params());
        assert!(controller.preview(300, 100.0).is_empty());
        assert!(controller.export_wav().is_none());

        controller.generate().unwrap();
        assert_eq!(controller.preview(300, 100.0).len(), 300);
        let wav = controller.export_wav().unwrap();
        assert_eq!(wav.len(), 44 + 2 * 4410);
    }
}
