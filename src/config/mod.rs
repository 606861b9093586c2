use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Caption languages in order of preference
    pub languages: Vec<String>,

    /// YouTube endpoint settings
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// Watch page URL, the video identifier is appended
    pub watch_url: String,

    /// Innertube player endpoint
    pub innertube_url: String,

    /// Innertube client identity sent with player requests
    pub client_name: String,
    pub client_version: String,

    /// Value of the Accept-Language header
    pub accept_language: String,

    /// Value of the User-Agent header
    pub user_agent: String,

    /// Route requests through proxies named by the environment
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

fn default_system_proxy() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "hi".to_string()],
            youtube: YoutubeConfig::default(),
        }
    }
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch?v=".to_string(),
            innertube_url: "https://www.youtube.com/youtubei/v1/player".to_string(),
            client_name: "ANDROID".to_string(),
            client_version: "20.10.38".to_string(),
            accept_language: "en-US".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            system_proxy: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// Library API for callers embedding the fetcher. The `get_transcript`
    /// binary always runs with [`Config::default`] and never touches a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file (library API, unused by the binary)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            anyhow::bail!("At least one caption language must be configured");
        }

        if let Some(code) = self.languages.iter().find(|code| code.trim().is_empty()) {
            anyhow::bail!("Invalid caption language code: {:?}", code);
        }

        url::Url::parse(&self.youtube.innertube_url)
            .with_context(|| format!("Invalid innertube URL: {}", self.youtube.innertube_url))?;

        url::Url::parse(&self.youtube.watch_url)
            .with_context(|| format!("Invalid watch URL: {}", self.youtube.watch_url))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_languages() {
        let config = Config::default();
        assert_eq!(config.languages, vec!["en", "hi"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.languages = vec!["hi".to_string()];
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_empty_languages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.languages.clear();
        config.save(&path).unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("caption language"));
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.youtube.innertube_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_system_proxy_defaults_on() {
        let yaml = r#"
languages: [en, hi]
youtube:
  watch_url: "https://www.youtube.com/watch?v="
  innertube_url: "https://www.youtube.com/youtubei/v1/player"
  client_name: ANDROID
  client_version: "20.10.38"
  accept_language: en-US
  user_agent: test-agent
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.youtube.system_proxy);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("absent.yaml")).is_err());
    }
}
