use crate::services::voice::AvailableVoice;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application settings from `settings.yaml`, layered with `FLASHDECK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: Utf8PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: Utf8PathBuf,

    #[serde(default)]
    pub debug_mode: bool,

    #[serde(default)]
    pub console_log: bool,

    /// Language prefix voices must match (e.g. "fr" matches "fr-FR" and "fr-CA")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Language tag used when no voice matches the target language
    #[serde(default = "default_fallback_language_tag")]
    pub fallback_language_tag: String,

    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,

    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,

    #[serde(default = "default_auto_advance_delay_ms")]
    pub auto_advance_delay_ms: u64,

    /// Static voice catalog offered to the terminal frontend
    #[serde(default)]
    pub voices: Vec<AvailableVoice>,
}

impl Settings {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            log_dir: default_log_dir(),
            debug_mode: false,
            console_log: false,
            target_language: default_target_language(),
            fallback_language_tag: default_fallback_language_tag(),
            speech_rate: default_speech_rate(),
            transition_delay_ms: default_transition_delay_ms(),
            auto_advance_delay_ms: default_auto_advance_delay_ms(),
            voices: Vec::new(),
        }
    }
}

fn default_dataset_path() -> Utf8PathBuf {
    Utf8PathBuf::from("vocabulario.json")
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("logs")
}

fn default_target_language() -> String {
    "fr".to_string()
}

fn default_fallback_language_tag() -> String {
    "fr-FR".to_string()
}

fn default_speech_rate() -> f32 {
    0.9
}

fn default_transition_delay_ms() -> u64 {
    400
}

fn default_auto_advance_delay_ms() -> u64 {
    1200
}

/// Color theme of the card display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// User preferences persisted in `preferences.yaml` across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_voice_name: Option<String>,

    #[serde(default)]
    pub theme: Theme,
}
