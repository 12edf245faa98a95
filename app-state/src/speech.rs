/// Text-to-speech capability of the runtime. Not every browser has one;
/// callers check [`SpeechOutput::is_available`] and stay silent otherwise.
pub trait SpeechOutput {
    fn is_available(&self) -> bool;

    /// Queue `text` for playback
    fn speak(&self, text: &str);
}

/// Runtime without speech synthesis
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SpeechOutput for Silent {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&self, _text: &str) {}
}
