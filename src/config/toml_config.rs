use crate::adapters::gemini::DEFAULT_ENDPOINT;
use crate::core::gateway::GatewaySettings;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_required_field,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Treat missing required fields in model output as a contract violation.
    pub strict_schema: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl GatewayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Configuration from the process environment alone.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `GEMINI_API_KEY`, `PORT`, `GEMINI_MODEL` and `GEMINI_ENDPOINT`
    /// through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.model.api_key = lookup("GEMINI_API_KEY");

        if let Some(port) = lookup("PORT") {
            config.server.port = port.parse().map_err(|_| GatewayError::InvalidConfigValueError {
                field: "PORT".to_string(),
                value: port.clone(),
                reason: "Port must be a number between 1 and 65535".to_string(),
            })?;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model.model = model;
        }
        if let Some(endpoint) = lookup("GEMINI_ENDPOINT") {
            config.model.endpoint = endpoint;
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The API key, unless it is absent or an unresolved `${VAR}` placeholder.
    pub fn api_key(&self) -> Result<&str> {
        let key = validate_required_field("model.api_key", &self.model.api_key)?;
        validate_non_empty_string("model.api_key", key)?;
        if key.starts_with("${") {
            return Err(GatewayError::MissingConfigError {
                field: "model.api_key".to_string(),
            });
        }
        Ok(key)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            model: self.model.model.clone(),
            timeout: Duration::from_secs(self.model.timeout_seconds),
            strict_schema: self.generation.strict_schema,
        }
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        self.api_key()?;
        validate_url("model.endpoint", &self.model.endpoint)?;
        validate_non_empty_string("model.model", &self.model.model)?;
        validate_positive_number("model.timeout_seconds", self.model.timeout_seconds, 1)?;
        validate_positive_number("server.port", u64::from(self.server.port), 1)?;
        validate_positive_number(
            "server.body_limit_bytes",
            self.server.body_limit_bytes as u64,
            1,
        )?;
        validate_path("server.static_dir", &self.server.static_dir)?;
        Ok(())
    }
}
