use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

fn default_lang() -> String {
    "en".to_string()
}

/// Top-level configuration stored on disk.
///
/// Holds the provider credential, the response locale, and the last city a
/// lookup succeeded for. The last city is owned by the CLI layer: it is
/// written after a successful fetch and replayed on a bare `show`; the
/// client itself never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key for the weather provider.
    pub api_key: Option<String>,

    /// Response language passed to the provider, e.g. "en" or "pt_br".
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Name of the last city successfully looked up.
    pub last_city: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            lang: default_lang(),
            last_city: None,
        }
    }
}

impl Config {
    /// Return the configured API key, or a hint to run `configure`.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and enter your provider API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Record the last successfully looked-up city.
    pub fn remember_city(&mut self, city: impl Into<String>) {
        self.last_city = Some(city.into());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn set_and_read_api_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        assert_eq!(cfg.api_key().expect("key must exist"), "KEY");
    }

    #[test]
    fn lang_defaults_to_english() {
        let cfg: Config = toml::from_str("").expect("empty config must parse");
        assert_eq!(cfg.lang, "en");
        assert!(cfg.api_key.is_none());
        assert!(cfg.last_city.is_none());
    }

    #[test]
    fn remember_city_overwrites_previous() {
        let mut cfg = Config::default();

        cfg.remember_city("Lisbon");
        assert_eq!(cfg.last_city.as_deref(), Some("Lisbon"));

        cfg.remember_city("Porto");
        assert_eq!(cfg.last_city.as_deref(), Some("Porto"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.lang = "pt_br".to_string();
        cfg.remember_city("Recife");

        let toml = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&toml).expect("config must parse back");

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert_eq!(parsed.lang, "pt_br");
        assert_eq!(parsed.last_city.as_deref(), Some("Recife"));
    }
}
