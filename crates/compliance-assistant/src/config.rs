//! Configuration for the compliance assistant

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini (oracle) configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Local extractive QA model configuration
    #[serde(default)]
    pub qa_model: QaModelConfig,
    /// Upload storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AssistantConfig {
    /// Load configuration: defaults, then an optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = key;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT: {}", port)))?;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("QA_MODEL_DIR") {
            self.qa_model.model_dir = PathBuf::from(dir);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
    /// Origins allowed for cross-origin requests
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_size: 25 * 1024 * 1024,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://localhost:8000".to_string(),
            ],
        }
    }
}

/// Gemini configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,
    /// REST base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Output token cap
    pub max_output_tokens: u32,
    /// Request timeout in seconds (none: wait indefinitely)
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.4,
            max_output_tokens: 1024,
            timeout_secs: None,
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Local extractive QA model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaModelConfig {
    /// Load the model at startup
    pub enabled: bool,
    /// Directory holding `model.onnx` and `tokenizer.json`
    pub model_dir: PathBuf,
    /// Maximum encoded length of question + context
    pub max_length: usize,
    /// Longest answer span in tokens
    pub max_answer_len: usize,
    /// Request the CUDA execution provider (needs the `cuda` feature)
    pub use_gpu: bool,
}

impl Default for QaModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: PathBuf::from("models").join("fine_tuned_tinyroberta"),
            max_length: 384,
            max_answer_len: 15,
            use_gpu: true,
        }
    }
}

impl QaModelConfig {
    /// Path of the ONNX graph
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join("model.onnx")
    }

    /// Path of the HuggingFace tokenizer
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory uploaded files are written to (created on demand)
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.upload_dir, PathBuf::from("uploads"));
        assert!(config.gemini.timeout_secs.is_none());
        assert!(config
            .server
            .cors_origins
            .contains(&"http://localhost:5173".to_string()));
    }

    #[test]
    fn test_partial_toml() {
        let config: AssistantConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [gemini]
            model = "gemini-pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.qa_model.max_length, 384);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", "secret"),
            ("PORT", "8181"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]);
        let mut config = AssistantConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.gemini.api_key, "secret");
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.server.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!format!("{:?}", config.gemini).contains("secret"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = AssistantConfig::default();
        let result = config.apply_env(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
