const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Client settings. The browser build fills `api_base_url` from the
/// `DAILY_STAMP_API_URL` variable at compile time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// How long the stage-up celebration stays on screen
    pub celebration_ms: u32,
    pub speech: SpeechConfig,
}

/// Voice used when the character's replies are read aloud
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            celebration_ms: 3000,
            speech: SpeechConfig::default(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            lang: "ja-JP".to_string(),
            rate: 0.9,
            pitch: 1.2,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL overridden when one was provided at build time
    pub fn from_build_env(api_base_url: Option<&str>) -> Self {
        match api_base_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::default().with_api_base_url(url),
            None => Self::default(),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.celebration_ms, 3000);
        assert_eq!(config.speech.lang, "ja-JP");
        assert_eq!(config.speech.rate, 0.9);
        assert_eq!(config.speech.pitch, 1.2);
    }

    #[test]
    fn test_build_env_override_trims_trailing_slash() {
        let config = ClientConfig::from_build_env(Some("https://api.example.com/"));
        assert_eq!(config.api_base_url, "https://api.example.com");

        let config = ClientConfig::from_build_env(Some("  "));
        assert_eq!(config.api_base_url, "http://localhost:8000");

        let config = ClientConfig::from_build_env(None);
        assert_eq!(config, ClientConfig::default());
    }
}
