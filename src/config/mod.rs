use crate::models::{Preferences, Settings};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::fs;

/// Prefix of environment variables that override `settings.yaml`
pub const ENV_PREFIX: &str = "FLASHDECK";

/// Persistent storage for user preferences.
///
/// The session controller writes through this trait whenever the learner changes
/// the theme or voice.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send {
    fn load_preferences(&self) -> Result<Preferences>;
    fn save_preferences(&self, preferences: &Preferences) -> Result<()>;
}

/// Configuration manager for settings and preferences files.
///
/// Manages two files in the configuration directory:
/// - `settings.yaml`: application settings, read-only, layered with `FLASHDECK_*` environment variables
/// - `preferences.yaml`: theme and preferred voice, rewritten whenever the learner changes them
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
    preferences_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager, creating the configuration directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("settings.yaml"),
            preferences_path: config_dir.join("preferences.yaml"),
            config_dir,
        })
    }

    /// Load settings: defaults, then `settings.yaml`, then `FLASHDECK_*` environment variables.
    pub fn load_settings(&self) -> Result<Settings> {
        self.load_settings_from(None)
    }

    /// Load settings with an explicit environment instead of the process environment.
    pub fn load_settings_with_env(&self, env: HashMap<String, String>) -> Result<Settings> {
        self.load_settings_from(Some(env))
    }

    fn load_settings_from(&self, env: Option<HashMap<String, String>>) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings: Settings = Config::builder()
            .add_source(
                File::from(self.settings_path.as_std_path())
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!(
            "Loaded settings: dataset={}, transition={}ms, voices={}",
            settings.dataset_path,
            settings.transition_delay_ms,
            settings.voices.len()
        );
        Ok(settings)
    }

    /// Save settings to `settings.yaml`.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn preferences_path(&self) -> &Utf8Path {
        &self.preferences_path
    }
}

impl PreferenceStore for ConfigManager {
    /// Load preferences, or defaults if the file doesn't exist yet.
    fn load_preferences(&self) -> Result<Preferences> {
        if !self.preferences_path.exists() {
            tracing::info!(
                "Preferences file not found at {}, using defaults",
                self.preferences_path
            );
            return Ok(Preferences::default());
        }

        let file_contents = fs::read_to_string(&self.preferences_path).with_context(|| {
            format!("Failed to read preferences: {}", self.preferences_path)
        })?;

        let preferences: Preferences = serde_yaml_ng::from_str(&file_contents).with_context(|| {
            format!("Failed to parse preferences: {}", self.preferences_path)
        })?;

        tracing::info!("Loaded preferences from {}", self.preferences_path);
        Ok(preferences)
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        let yaml_string = serde_yaml_ng::to_string(preferences)
            .context("Failed to serialize preferences to YAML")?;

        fs::write(&self.preferences_path, yaml_string).with_context(|| {
            format!("Failed to write preferences: {}", self.preferences_path)
        })?;

        tracing::debug!("Saved preferences to {}", self.preferences_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = manager.load_settings_with_env(HashMap::new()).unwrap();
        assert_eq!(settings, Settings::default());

        let prefs = manager.load_preferences().unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_save_load_preferences() {
        let (manager, _temp_dir) = create_test_config_manager();

        let prefs = Preferences {
            preferred_voice_name: Some("Amélie".to_string()),
            theme: Theme::Dark,
        };
        manager.save_preferences(&prefs).unwrap();

        assert_eq!(manager.load_preferences().unwrap(), prefs);
    }

    #[test]
    fn test_corrupt_preferences_is_error() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.preferences_path(), "theme: [not, a, theme]").unwrap();

        assert!(manager.load_preferences().is_err());
    }
}
