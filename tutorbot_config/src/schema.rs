use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tutorbot_core::{DEFAULT_MAX_TOKENS, DEFAULT_STOP_SEQUENCE, GenerationParams};

const CONFIG_DIR: &str = "tutorbot";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_model")]
    pub model: String,
    #[serde(default = "BotConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub frequency_penalty: f32,
    #[serde(default)]
    pub presence_penalty: f32,
    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            request_timeout: None,
            system_prompt: None,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl BotConfig {
    fn default_model() -> String {
        "llama3-groq-70b-8192-tool-use-preview".to_string()
    }

    const fn default_temperature() -> f32 {
        0.9
    }
}

/// How failed completion calls are retried.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Retry every failure immediately.
    #[default]
    Uniform,
    /// Back off on rate limits and timeouts, give up on connection errors.
    StatusAware,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub groq: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub allow_from: Vec<String>,
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE);

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'tutorbot init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        tracing::debug!("Loaded config: model={}", config.bot.model);
        Ok(config)
    }

    /// Generation parameters sent with every completion request.
    ///
    /// `max_tokens` and the stop sequence are fixed, not configurable.
    #[must_use]
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.bot.temperature,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: 1.0,
            frequency_penalty: self.bot.frequency_penalty,
            presence_penalty: self.bot.presence_penalty,
            stop: vec![DEFAULT_STOP_SEQUENCE.to_string()],
            timeout: self.bot.request_timeout.map(Duration::from_secs),
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Groq API key");
        println!("   2. Run 'tutorbot chat' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - model: Groq model to use");
        println!("   - temperature: sampling temperature in [0, 1]");
        println!("   - frequency_penalty / presence_penalty: values in [-2, 2]");
        println!("   - retry_policy: \"uniform\" or \"status_aware\"");
        println!();
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "bot": {
    "model": "llama3-groq-70b-8192-tool-use-preview",
    "temperature": 0.9,
    "frequency_penalty": 0.0,
    "presence_penalty": 0.0,
    "system_prompt": "You are L-Tutor, a patient language tutor. Answer clearly and correct the learner's mistakes gently.",
    "retry_policy": "uniform"
  },
  "providers": {
    "groq": {
      "api_key": "your-groq-api-key-here"
    }
  },
  "telegram": {
    "enabled": false,
    "token": "",
    "allow_from": []
  }
}"#;
