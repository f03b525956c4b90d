use crate::services::voice::{self, AvailableVoice, VoiceInfo};

/// Default speech rate relative to normal speed
pub const DEFAULT_SPEECH_RATE: f32 = 0.9;

/// Text sent to the platform synthesizer.
///
/// With no resolved voice the synthesizer should pick its own voice for
/// `language_tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Option<VoiceInfo>,
    pub language_tag: String,
    pub rate: f32,
}

impl SpeechRequest {
    /// Build a request, resolving the voice against the current catalog.
    pub fn resolve(
        text: impl Into<String>,
        stored_voice: Option<&str>,
        voices: &[AvailableVoice],
        language_prefix: &str,
        fallback_tag: &str,
        rate: f32,
    ) -> Self {
        let voice = voice::resolve(stored_voice, voices, language_prefix);
        let language_tag = voice
            .as_ref()
            .map(|v| v.language_tag.clone())
            .unwrap_or_else(|| fallback_tag.to_string());

        Self {
            text: text.into(),
            voice,
            language_tag,
            rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_voice_language() {
        let voices = vec![AvailableVoice::new("Amélie", "fr-CA")];
        let request = SpeechRequest::resolve("bonjour", None, &voices, "fr", "fr-FR", DEFAULT_SPEECH_RATE);

        assert_eq!(request.voice.as_ref().unwrap().name, "Amélie");
        assert_eq!(request.language_tag, "fr-CA");
        assert_eq!(request.text, "bonjour");
    }

    #[test]
    fn test_request_degrades_to_language_tag() {
        let voices = vec![AvailableVoice::new("Google US English", "en-US")];
        let request = SpeechRequest::resolve("merci", Some("Thomas"), &voices, "fr", "fr-FR", 0.9);

        assert!(request.voice.is_none());
        assert_eq!(request.language_tag, "fr-FR");
    }
}
