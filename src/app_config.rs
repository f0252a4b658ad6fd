use anyhow::{anyhow, Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation server connection
    #[serde(default)]
    pub server: ServerConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation engine selected for every request
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationEngine {
    Baidu,
    Google,
    #[default]
    GoogleFree,
    DeepL,
    OpenAi,
    /// Any engine name this build does not recognise
    #[serde(other)]
    Unknown,
}

impl TranslationEngine {
    /// Engines that can actually be addressed
    pub const SUPPORTED: [TranslationEngine; 5] = [
        Self::Baidu,
        Self::Google,
        Self::GoogleFree,
        Self::DeepL,
        Self::OpenAi,
    ];

    // @returns: Engine identifier sent to the translation server
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baidu => "Baidu",
            Self::Google => "Google",
            Self::GoogleFree => "GoogleFree",
            Self::DeepL => "DeepL",
            Self::OpenAi => "OpenAi",
            Self::Unknown => "Unknown",
        }
    }

    // @returns: Human readable engine name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Baidu => "Baidu",
            Self::Google => "Google",
            Self::GoogleFree => "Google (free)",
            Self::DeepL => "DeepL",
            Self::OpenAi => "OpenAI",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TranslationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TranslationEngine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "baidu" => Ok(Self::Baidu),
            "google" => Ok(Self::Google),
            "googlefree" | "google-free" => Ok(Self::GoogleFree),
            "deepl" => Ok(Self::DeepL),
            "openai" => Ok(Self::OpenAi),
            _ => Err(anyhow!("Invalid translation engine: {}", s)),
        }
    }
}

/// Set of optional fields eligible for translation.
///
/// Only fields that can be switched off live here; director, genres, maker,
/// label and series are always translated when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TranslationMode(u8);

impl TranslationMode {
    pub const NONE: Self = Self(0);
    pub const TITLE: Self = Self(1);
    pub const SUMMARY: Self = Self(1 << 1);
    pub const ALL: Self = Self(Self::TITLE.0 | Self::SUMMARY.0);

    const NAMES: [(&'static str, TranslationMode); 2] =
        [("title", Self::TITLE), ("summary", Self::SUMMARY)];

    /// Whether every flag in `other` is set
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for TranslationMode {
    fn default() -> Self {
        Self::TITLE
    }
}

impl BitOr for TranslationMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TranslationMode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TryFrom<Vec<String>> for TranslationMode {
    type Error = String;

    fn try_from(names: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let mut mode = Self::NONE;
        for name in names {
            let flag = Self::NAMES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(name.trim()))
                .map(|(_, flag)| *flag)
                .ok_or_else(|| format!("unknown translation mode flag: {}", name))?;
            mode |= flag;
        }
        Ok(mode)
    }
}

impl From<TranslationMode> for Vec<String> {
    fn from(mode: TranslationMode) -> Self {
        TranslationMode::NAMES
            .iter()
            .filter(|(_, flag)| mode.contains(*flag))
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// Credentials for every engine; only the selected engine's entries are sent
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderCredentials {
    #[serde(default)]
    pub baidu_app_id: String,

    #[serde(default)]
    pub baidu_app_key: String,

    #[serde(default)]
    pub google_api_key: String,

    #[serde(default)]
    pub deepl_api_key: String,

    #[serde(default)]
    pub openai_api_key: String,
}

/// Connection settings for the translation server
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Base URL of the MetaTube server
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Bearer token, empty when the server is open
    #[serde(default)]
    pub token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Engine used for every request
    #[serde(default)]
    pub engine: TranslationEngine,

    /// Optional fields to translate
    #[serde(default)]
    pub mode: TranslationMode,

    /// Also translate the actor list embedded in movie records
    #[serde(default)]
    pub translate_actors: bool,

    /// Per-engine credentials
    #[serde(default)]
    pub credentials: ProviderCredentials,
}

/// Configuration handle shared between the caller and the translation service.
///
/// Readers take a fresh snapshot for every request, so updates apply from the
/// next field onwards.
pub type SharedTranslationConfig = Arc<RwLock<TranslationConfig>>;

impl TranslationConfig {
    /// Wrap this configuration in a shared handle
    pub fn into_shared(self) -> SharedTranslationConfig {
        Arc::new(RwLock::new(self))
    }

    /// Credentials the selected engine cannot work without, as (name, value)
    fn required_credentials(&self) -> Vec<(&'static str, &str)> {
        let credentials = &self.credentials;
        match self.engine {
            TranslationEngine::Baidu => vec![
                ("baidu_app_id", credentials.baidu_app_id.as_str()),
                ("baidu_app_key", credentials.baidu_app_key.as_str()),
            ],
            TranslationEngine::Google => {
                vec![("google_api_key", credentials.google_api_key.as_str())]
            }
            TranslationEngine::DeepL => {
                vec![("deepl_api_key", credentials.deepl_api_key.as_str())]
            }
            TranslationEngine::OpenAi => {
                vec![("openai_api_key", credentials.openai_api_key.as_str())]
            }
            TranslationEngine::GoogleFree | TranslationEngine::Unknown => Vec::new(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write this configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.server.url)
            .with_context(|| format!("Invalid server url: {}", self.server.url))?;

        if self.server.timeout_secs == 0 {
            return Err(anyhow!("Server timeout must be greater than zero"));
        }

        if self.translation.engine == TranslationEngine::Unknown {
            return Err(anyhow!("Unsupported translation engine in configuration"));
        }

        for (name, value) in self.translation.required_credentials() {
            if value.trim().is_empty() {
                return Err(anyhow!(
                    "Credential '{}' is required for the {} engine",
                    name,
                    self.translation.engine.display_name()
                ));
            }
        }

        Ok(())
    }
}
