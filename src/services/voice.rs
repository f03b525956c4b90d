//! Voice ranking and resolution.
//!
//! Voice catalogs come from the caller and may change at any time, so every function
//! here is a pure query over the list it is given. Calling them again with the same
//! inputs yields the same selection.

use serde::{Deserialize, Serialize};

/// A voice as reported by the platform catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableVoice {
    pub name: String,
    pub language_tag: String,
}

impl AvailableVoice {
    pub fn new(name: impl Into<String>, language_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language_tag: language_tag.into(),
        }
    }
}

/// A catalog voice with its preference score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub name: String,
    pub language_tag: String,
    pub score: i32,
}

impl From<&AvailableVoice> for VoiceInfo {
    fn from(voice: &AvailableVoice) -> Self {
        Self {
            name: voice.name.clone(),
            language_tag: voice.language_tag.clone(),
            score: score(&voice.name),
        }
    }
}

/// Heuristic quality score from a voice name.
///
/// Favors network/neural voices, with a slight bump for regional ("ca") voices.
pub fn score(voice_name: &str) -> i32 {
    let name = voice_name.to_lowercase();
    let mut s = 0;
    if name.contains("google") {
        s += 10;
    }
    if name.contains("natural") {
        s += 8;
    }
    if name.contains("online") {
        s += 5;
    }
    if name.contains("ca") {
        s += 2;
    }
    s
}

/// Voices for the target language, best first. Equal scores keep catalog order.
pub fn ranked(voices: &[AvailableVoice], language_prefix: &str) -> Vec<VoiceInfo> {
    let mut infos: Vec<VoiceInfo> = voices
        .iter()
        .filter(|v| v.language_tag.starts_with(language_prefix))
        .map(VoiceInfo::from)
        .collect();
    infos.sort_by(|a, b| b.score.cmp(&a.score));
    infos
}

/// Highest-scoring voice for the target language; the earliest wins a tie.
pub fn select_default(voices: &[AvailableVoice], language_prefix: &str) -> Option<VoiceInfo> {
    let mut best: Option<VoiceInfo> = None;
    for voice in voices.iter().filter(|v| v.language_tag.starts_with(language_prefix)) {
        let candidate = VoiceInfo::from(voice);
        if best.as_ref().is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// Voice to use for speech right now.
///
/// The stored preference wins while the catalog still offers it; otherwise the best
/// default for the language. `None` means speak with a bare language tag.
pub fn resolve(
    stored_name: Option<&str>,
    voices: &[AvailableVoice],
    language_prefix: &str,
) -> Option<VoiceInfo> {
    if let Some(name) = stored_name {
        if let Some(voice) = voices.iter().find(|v| v.name == name) {
            return Some(VoiceInfo::from(voice));
        }
        tracing::debug!("Preferred voice '{}' not in catalog, using default", name);
    }
    select_default(voices, language_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<AvailableVoice> {
        vec![
            AvailableVoice::new("Thomas", "fr-FR"),
            AvailableVoice::new("Microsoft Denise Online (Natural)", "fr-FR"),
            AvailableVoice::new("Google US English", "en-US"),
            AvailableVoice::new("Google français", "fr-FR"),
            AvailableVoice::new("Amélie", "fr-CA"),
        ]
    }

    #[test]
    fn test_score_heuristics() {
        assert_eq!(score("Thomas"), 0);
        assert_eq!(score("Google français"), 10);
        assert_eq!(score("Google Canada"), 12);
        assert_eq!(score("Microsoft Denise Online (Natural)"), 13);
        assert_eq!(score("GOOGLE"), 10);
        assert_eq!(score("Canadian"), 2);
    }

    #[test]
    fn test_select_default_prefers_highest_score() {
        let voice = select_default(&catalog(), "fr").unwrap();
        assert_eq!(voice.name, "Microsoft Denise Online (Natural)");
        assert_eq!(voice.score, 13);
    }

    #[test]
    fn test_select_default_tie_keeps_first() {
        let voices = vec![
            AvailableVoice::new("Thomas", "fr-FR"),
            AvailableVoice::new("Amélie", "fr-CA"),
        ];
        assert_eq!(select_default(&voices, "fr").unwrap().name, "Thomas");
    }

    #[test]
    fn test_select_default_no_language_match() {
        let voices = vec![AvailableVoice::new("Google US English", "en-US")];
        assert_eq!(select_default(&voices, "fr"), None);
        assert_eq!(select_default(&[], "fr"), None);
    }

    #[test]
    fn test_resolve_uses_stored_voice() {
        let voice = resolve(Some("Thomas"), &catalog(), "fr").unwrap();
        assert_eq!(voice.name, "Thomas");
    }

    #[test]
    fn test_resolve_falls_back_when_stored_missing() {
        let voice = resolve(Some("Hortense"), &catalog(), "fr").unwrap();
        assert_eq!(voice.name, "Microsoft Denise Online (Natural)");

        assert_eq!(resolve(Some("Hortense"), &[], "fr"), None);
        assert_eq!(resolve(None, &catalog(), "fr").unwrap().score, 13);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let voices = catalog();
        let first = resolve(None, &voices, "fr");
        let second = resolve(None, &voices, "fr");
        assert_eq!(first, second);
    }

    #[test]
    fn test_ranked_order() {
        let names: Vec<String> = ranked(&catalog(), "fr").into_iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            vec!["Microsoft Denise Online (Natural)", "Google français", "Thomas", "Amélie"]
        );
    }
}
