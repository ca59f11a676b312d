//! Run configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! (or absent) file is a valid configuration. The search API key is read from
//! the file or, failing that, from the environment variable it names.

use crate::gather::GNewsClient;
use crate::llm::{LlmError, OllamaClient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file holding every table
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

/// News search provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_url")]
    pub base_url: String,
    /// Takes precedence over the environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            language: default_language(),
            country: default_country(),
        }
    }
}

impl SearchConfig {
    /// The configured key, else the value of `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn client(&self) -> GNewsClient {
        GNewsClient::new(self.resolve_api_key())
            .with_base_url(self.base_url.as_str())
            .with_api_key_env(self.api_key_env.as_str())
            .with_language(self.language.as_str())
            .with_country(self.country.as_str())
    }
}

/// Chat model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_host")]
    pub host: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: default_llm_host(),
            model: default_llm_model(),
        }
    }
}

impl LlmConfig {
    pub fn client(&self) -> Result<OllamaClient, LlmError> {
        OllamaClient::new(self.host.as_str(), self.model.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Parent of the per-run chart directories
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir() }
    }
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// `<data dir>/looksatwords/data.db`, e.g. `~/.local/share/looksatwords/data.db`.
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("looksatwords").join("data.db")
}

fn default_search_url() -> String {
    GNewsClient::DEFAULT_BASE_URL.to_string()
}
fn default_api_key_env() -> String {
    "GNEWS_API_KEY".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_country() -> String {
    "us".to_string()
}
fn default_llm_host() -> String {
    "http://localhost:11434".to_string()
}
fn default_llm_model() -> String {
    "llama3.1".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = PipelineConfig::from_yaml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.search.base_url, "https://gnews.io/api/v4");
        assert_eq!(config.llm.host, "http://localhost:11434");
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert!(config.store.path.ends_with("looksatwords/data.db"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = PipelineConfig::from_yaml(
            "search:\n  country: gb\nllm:\n  model: mistral\noutput:\n  dir: charts\n",
        )
        .unwrap();
        assert_eq!(config.search.country, "gb");
        assert_eq!(config.search.language, "en");
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.host, "http://localhost:11434");
        assert_eq!(config.output.dir, PathBuf::from("charts"));
    }

    #[test]
    fn api_key_from_file_beats_environment() {
        let search = SearchConfig {
            api_key: Some("from-file".into()),
            api_key_env: "LOOKSATWORDS_TEST_KEY_UNUSED".into(),
            ..Default::default()
        };
        assert_eq!(search.resolve_api_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn api_key_from_environment() {
        std::env::set_var("LOOKSATWORDS_TEST_KEY_SET", "from-env");
        let search = SearchConfig {
            api_key_env: "LOOKSATWORDS_TEST_KEY_SET".into(),
            ..Default::default()
        };
        assert_eq!(search.resolve_api_key().as_deref(), Some("from-env"));

        let missing = SearchConfig {
            api_key_env: "LOOKSATWORDS_TEST_KEY_MISSING".into(),
            ..Default::default()
        };
        assert_eq!(missing.resolve_api_key(), None);
    }

    #[test]
    fn file_round_trip_and_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store:\n  path: /tmp/news.db").unwrap();
        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/news.db"));

        let reparsed = PipelineConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed, config);

        assert!(matches!(
            PipelineConfig::from_file("/definitely/not/here.yaml"),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            PipelineConfig::from_yaml("store: [unclosed"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(PipelineConfig::load(None).unwrap(), PipelineConfig::default());
    }
}
