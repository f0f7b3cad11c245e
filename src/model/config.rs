use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "LOGIC_AGENT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_HOST: &str = "HOST";
const ENV_PORT: &str = "PORT";
const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
const ENV_MODEL: &str = "REASONING_MODEL";
const ENV_BASE_URL: &str = "REASONING_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "REASONING_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default model used for argument analysis
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default OpenAI-compatible completion endpoint (OpenRouter)
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Reasoning service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Bearer credential; only ever taken from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Model identifier sent with every completion request
    pub model: String,
    /// Base URL of the chat-completion API (without `/chat/completions`)
    pub base_url: String,
    /// Upper bound on a single outbound call
    pub timeout_secs: u64,
    /// Value of the `HTTP-Referer` attribution header
    pub referer: String,
    /// Value of the `X-Title` attribution header
    pub title: String,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            referer: "http://localhost".to_string(),
            title: "Logic Chatbot".to_string(),
        }
    }
}

impl ReasoningConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Request size limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum argument length in characters, after trimming
    pub max_input_chars: usize,
    /// Maximum accepted JSON body size in bytes
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 8000,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub reasoning: ReasoningConfig,
    pub limits: LimitsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            reasoning: ReasoningConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config file and environment
    ///
    /// Environment variables take precedence over the file.
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let mut config = Self {
            reasoning: file.reasoning,
            limits: file.limits,
            ..Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
            }
        }

        if let Some(api_key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.reasoning.api_key = Some(api_key);
        }

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            self.reasoning.model = model;
        }

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.reasoning.base_url = base_url;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse() {
                Ok(secs) if secs > 0 => self.reasoning.timeout_secs = secs,
                _ => {
                    tracing::warn!(value = %timeout, "Ignoring invalid REASONING_TIMEOUT_SECS")
                }
            }
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config_file(&contents).or_else(|| {
                tracing::warn!(path = %path.display(), "Failed to parse config file, using defaults");
                None
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config_file(contents: &str) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str::<ConfigFile>(contents) {
            Ok(mut config) => {
                if config.reasoning.timeout_secs == 0 {
                    tracing::warn!("Ignoring reasoning.timeout_secs of 0, using default");
                    config.reasoning.timeout_secs = DEFAULT_TIMEOUT_SECS;
                }
                Some(config)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Invalid config file contents");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.reasoning.model, DEFAULT_MODEL);
        assert_eq!(config.reasoning.base_url, DEFAULT_BASE_URL);
        assert!(config.reasoning.api_key.is_none());
        assert_eq!(config.reasoning.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8081"),
            ("OPENROUTER_API_KEY", "sk-test"),
            ("REASONING_MODEL", "openai/gpt-4o"),
            ("REASONING_TIMEOUT_SECS", "5"),
        ]));

        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
        assert_eq!(config.reasoning.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.reasoning.model, "openai/gpt-4o");
        assert_eq!(config.reasoning.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("PORT", "not-a-port"),
            ("OPENROUTER_API_KEY", "   "),
            ("REASONING_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(config.port, 3000);
        assert!(config.reasoning.api_key.is_none());
        assert_eq!(config.reasoning.timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("REASONING_TIMEOUT_SECS", "0")]));
        assert_eq!(config.reasoning.timeout_secs, 30);

        let file = Config::parse_config_file("reasoning:\n  timeout_secs: 0\n").unwrap();
        assert_eq!(file.reasoning.timeout_secs, 30);

        let file = Config::parse_config_file("reasoning:\n  timeout_secs: 7\n").unwrap();
        assert_eq!(file.reasoning.timeout_secs, 7);
    }

    #[test]
    fn test_parse_partial_config_file() {
        let file = Config::parse_config_file(
            "reasoning:\n  model: anthropic/claude-3.5-haiku\nlimits:\n  max_input_chars: 100\n",
        )
        .unwrap();

        assert_eq!(file.reasoning.model, "anthropic/claude-3.5-haiku");
        assert_eq!(file.reasoning.base_url, DEFAULT_BASE_URL);
        assert_eq!(file.limits.max_input_chars, 100);
        assert_eq!(file.limits.max_body_bytes, 64 * 1024);
    }

    #[test]
    fn test_parse_empty_and_invalid_config_file() {
        let empty = Config::parse_config_file("   \n").unwrap();
        assert_eq!(empty.reasoning.model, DEFAULT_MODEL);

        assert!(Config::parse_config_file("reasoning: [not, a, map]").is_none());
    }
}
