use app_state::speech::Silent;
use app_state::{SpeechConfig, SpeechOutput};
use std::rc::Rc;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

/// Reads the character's replies aloud with the Web Speech API
pub struct BrowserSpeech {
    synth: SpeechSynthesis,
    config: SpeechConfig,
}

impl BrowserSpeech {
    /// `None` when the browser has no speech synthesis
    pub fn detect(config: &SpeechConfig) -> Option<Self> {
        let synth = web_sys::window()?.speech_synthesis().ok()?;
        Some(Self { synth, config: config.clone() })
    }
}

impl SpeechOutput for BrowserSpeech {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&self, text: &str) {
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                utterance.set_lang(&self.config.lang);
                utterance.set_rate(self.config.rate);
                utterance.set_pitch(self.config.pitch);
                self.synth.speak(&utterance);
            }
            Err(_) => log::warn!("Could not create speech utterance"),
        }
    }
}

pub fn speech_output(config: &SpeechConfig) -> Rc<dyn SpeechOutput> {
    match BrowserSpeech::detect(config) {
        Some(speech) => Rc::new(speech),
        None => {
            log::info!("Speech synthesis not supported, replies will not be read aloud");
            Rc::new(Silent)
        }
    }
}
