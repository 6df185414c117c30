use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::{
    AUTO_DETECT, DEFAULT_BASE_DELAY, DEFAULT_LINE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT,
    Discipline, PayloadFormat, Provider, RetryPolicy, TranslatorConfig, validate_language,
    validate_source_language,
};

/// Base URL of the public deep-translator API used by the built-in providers.
pub const DEEP_TRANSLATOR_URL: &str = "https://deep-translator-api.azurewebsites.net";

/// Default settings in the `[qtr]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QtrConfig {
    /// Default source language (`auto` when unset).
    pub from: Option<String>,
    /// Default target language.
    pub to: Option<String>,
    /// Line scheduling.
    pub discipline: Option<Discipline>,
    /// Attempts per provider for each line.
    pub max_attempts: Option<u32>,
    /// Backoff unit in milliseconds.
    pub base_delay_ms: Option<u64>,
    /// Pause between lines in milliseconds (sequential only).
    pub line_delay_ms: Option<u64>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration for a translation provider.
///
/// Providers are tried in the order they appear in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    /// URL the JSON request is POSTed to.
    pub endpoint: String,
    /// Request body layout.
    #[serde(default)]
    pub format: PayloadFormat,
    /// Model identifier, sent by formats that carry one.
    #[serde(default)]
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Header for the raw key; `Authorization: Bearer` when unset.
    #[serde(default)]
    pub api_key_header: Option<String>,
    /// What to send instead of `auto` as the source language.
    #[serde(default)]
    pub auto_source: Option<String>,
}

impl ProviderConfig {
    /// A keyless provider with the default payload format.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            format: PayloadFormat::default(),
            model: None,
            api_key: None,
            api_key_env: None,
            api_key_header: None,
            auto_source: None,
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider is configured with an API key source.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }

    /// Turns this entry into a runtime provider, reading its API key.
    ///
    /// A missing key is not an error here; the backend rejects the request.
    pub fn to_provider(&self) -> Provider {
        Provider {
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            format: self.format,
            model: self.model.clone(),
            api_key: self.get_api_key(),
            api_key_header: self.api_key_header.clone(),
            auto_source: self.auto_source.clone(),
        }
    }
}

/// Providers used when the config file lists none.
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("google", format!("{DEEP_TRANSLATOR_URL}/google/")),
        ProviderConfig::new("mymemory", format!("{DEEP_TRANSLATOR_URL}/mymemory/")),
    ]
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/qtr/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub qtr: QtrConfig,
    /// Provider chain in fallback order.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl ConfigFile {
    /// Configured providers, or the built-in chain if there are none.
    pub fn provider_chain(&self) -> Vec<ProviderConfig> {
        if self.providers.is_empty() {
            default_providers()
        } else {
            self.providers.clone()
        }
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Source language code as given (possibly `auto`).
    pub source_language: String,
    /// Target language code as given.
    pub target_language: String,
    /// Orchestrator settings.
    pub translator: TranslatorConfig,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Source language code override.
    pub from: Option<String>,
    /// Target language code override.
    pub to: Option<String>,
    /// Provider names to use, in order. Empty means the whole chain.
    pub providers: Vec<String>,
    /// Discipline override.
    pub discipline: Option<Discipline>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns an error if the target language is missing, a language code is
/// invalid, a requested provider is not configured, or `max_attempts` is 0.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.qtr;

    let source_language = options
        .from
        .as_ref()
        .or(defaults.from.as_ref())
        .cloned()
        .unwrap_or_else(|| AUTO_DETECT.to_string());
    validate_source_language(&source_language)?;

    let target_language = options
        .to
        .as_ref()
        .or(defaults.to.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: qtr --to <lang>\n  \
                 - Config file: ~/.config/qtr/config.toml"
            )
        })?;
    validate_language(&target_language)?;

    let chain = config_file.provider_chain();
    let selected = if options.providers.is_empty() {
        chain
    } else {
        options
            .providers
            .iter()
            .map(|name| find_provider(&chain, name).cloned())
            .collect::<Result<Vec<_>>>()?
    };

    let max_attempts = defaults.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
    if max_attempts == 0 {
        bail!("Invalid configuration: 'max_attempts' must be at least 1");
    }

    let base_delay = defaults
        .base_delay_ms
        .map_or(DEFAULT_BASE_DELAY, Duration::from_millis);
    let line_delay = defaults
        .line_delay_ms
        .map_or(DEFAULT_LINE_DELAY, Duration::from_millis);
    let timeout = defaults
        .timeout_secs
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    let discipline = options
        .discipline
        .or(defaults.discipline)
        .unwrap_or_default();

    Ok(ResolvedConfig {
        source_language,
        target_language,
        translator: TranslatorConfig {
            providers: selected.iter().map(ProviderConfig::to_provider).collect(),
            retry: RetryPolicy::new(max_attempts, base_delay),
            discipline,
            line_delay,
            timeout,
        },
    })
}

fn find_provider<'a>(chain: &'a [ProviderConfig], name: &str) -> Result<&'a ProviderConfig> {
    chain.iter().find(|p| p.name == name).ok_or_else(|| {
        anyhow::anyhow!(
            "Provider '{name}' not found\n\n\
             Available providers:\n  \
             - {}\n\n\
             Add providers to ~/.config/qtr/config.toml",
            chain
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join("\n  - ")
        )
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/qtr/config.toml`
    /// or `~/.config/qtr/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a config manager for an explicit file.
    pub const fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::at(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut sarvam = ProviderConfig::new("sarvam", "https://api.sarvam.ai/translate");
        sarvam.format = PayloadFormat::Input;
        sarvam.model = Some("mayura:v1".to_string());
        sarvam.api_key_env = Some("SARVAM_API_KEY".to_string());

        let config = ConfigFile {
            qtr: QtrConfig {
                from: Some("en-IN".to_string()),
                to: Some("hi-IN".to_string()),
                discipline: Some(Discipline::Concurrent),
                max_attempts: Some(3),
                ..QtrConfig::default()
            },
            providers: vec![ProviderConfig::new("local", "http://localhost:5000/"), sarvam],
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.qtr.to, Some("hi-IN".to_string()));
        assert_eq!(loaded.qtr.discipline, Some(Discipline::Concurrent));
        assert_eq!(loaded.qtr.max_attempts, Some(3));
        assert_eq!(loaded.providers, config.providers);
    }

    #[test]
    fn test_parse_documented_layout() {
        let contents = r#"
            [qtr]
            to = "ta-IN"
            discipline = "concurrent"
            base_delay_ms = 250

            [[providers]]
            name = "google"
            endpoint = "https://example.com/google/"

            [[providers]]
            name = "sarvam"
            endpoint = "https://example.com/translate"
            format = "input"
            model = "mayura:v1"
            api_key_header = "api-subscription-key"
            auto_source = "auto"
        "#;

        let config: ConfigFile = toml::from_str(contents).unwrap();

        assert_eq!(config.qtr.base_delay_ms, Some(250));
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].format, PayloadFormat::Text);
        assert_eq!(config.providers[1].format, PayloadFormat::Input);
        assert_eq!(
            config.providers[1].api_key_header.as_deref(),
            Some("api-subscription-key")
        );
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().providers.is_empty());
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[[providers]]\nname = 1").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::set_var("QTR_TEST_API_KEY", "test-key-value");
        }

        let mut provider = ProviderConfig::new("p", "https://api.example.com");
        provider.api_key = Some("fallback-key".to_string());
        provider.api_key_env = Some("QTR_TEST_API_KEY".to_string());

        // Environment variable takes priority
        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));
        assert_eq!(
            provider.to_provider().api_key,
            Some("test-key-value".to_string())
        );

        // SAFETY: Cleanup test env var
        unsafe {
            std::env::remove_var("QTR_TEST_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_fallback() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::remove_var("QTR_NONEXISTENT_KEY");
        }

        let mut provider = ProviderConfig::new("p", "https://api.example.com");
        provider.api_key = Some("fallback-key".to_string());
        provider.api_key_env = Some("QTR_NONEXISTENT_KEY".to_string());

        // Falls back to api_key when env var not set
        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_provider_requires_api_key() {
        let mut provider = ProviderConfig::new("p", "https://api.example.com");
        assert!(!provider.requires_api_key());

        provider.api_key_env = Some("API_KEY".to_string());
        assert!(provider.requires_api_key());
    }

    #[test]
    fn test_to_provider_copies_fields() {
        let mut entry = ProviderConfig::new("sarvam", "https://api.sarvam.ai/translate");
        entry.format = PayloadFormat::Input;
        entry.model = Some("mayura:v1".to_string());
        entry.api_key = Some("k".to_string());
        entry.api_key_header = Some("api-subscription-key".to_string());
        entry.auto_source = Some("auto-detect".to_string());

        let provider = entry.to_provider();

        assert_eq!(provider.name, "sarvam");
        assert_eq!(provider.format, PayloadFormat::Input);
        assert_eq!(provider.model.as_deref(), Some("mayura:v1"));
        assert_eq!(provider.api_key.as_deref(), Some("k"));
        assert_eq!(provider.source_code("auto"), "auto-detect");
    }

    // resolve_config tests

    fn create_test_config() -> ConfigFile {
        ConfigFile {
            qtr: QtrConfig {
                to: Some("hi-IN".to_string()),
                ..QtrConfig::default()
            },
            providers: vec![
                ProviderConfig::new("google", "http://localhost:5000/google/"),
                ProviderConfig::new("mymemory", "http://localhost:5000/mymemory/"),
            ],
        }
    }

    #[test]
    fn test_resolve_config_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        assert_eq!(resolved.source_language, "auto");
        assert_eq!(resolved.target_language, "hi-IN");

        let translator = resolved.translator;
        assert_eq!(translator.discipline, Discipline::Sequential);
        assert_eq!(translator.retry, RetryPolicy::default());
        assert_eq!(translator.line_delay, Duration::from_millis(500));
        assert_eq!(translator.timeout, Duration::from_secs(30));
        let names: Vec<_> = translator.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["google", "mymemory"]);
    }

    #[test]
    fn test_resolve_config_uses_builtin_providers() {
        let config = ConfigFile {
            qtr: QtrConfig {
                to: Some("hi".to_string()),
                ..QtrConfig::default()
            },
            providers: Vec::new(),
        };

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

        let endpoints: Vec<_> = resolved
            .translator
            .providers
            .iter()
            .map(|p| p.endpoint.as_str())
            .collect();
        assert_eq!(
            endpoints,
            [
                "https://deep-translator-api.azurewebsites.net/google/",
                "https://deep-translator-api.azurewebsites.net/mymemory/"
            ]
        );
    }

    #[test]
    fn test_resolve_config_file_timings() {
        let mut config = create_test_config();
        config.qtr.max_attempts = Some(2);
        config.qtr.base_delay_ms = Some(100);
        config.qtr.line_delay_ms = Some(0);
        config.qtr.timeout_secs = Some(5);
        config.qtr.discipline = Some(Discipline::Concurrent);

        let translator = resolve_config(&ResolveOptions::default(), &config)
            .unwrap()
            .translator;

        assert_eq!(
            translator.retry,
            RetryPolicy::new(2, Duration::from_millis(100))
        );
        assert_eq!(translator.line_delay, Duration::ZERO);
        assert_eq!(translator.timeout, Duration::from_secs(5));
        assert_eq!(translator.discipline, Discipline::Concurrent);
    }

    #[test]
    fn test_resolve_config_provider_selection_orders_chain() {
        let options = ResolveOptions {
            providers: vec!["mymemory".to_string(), "google".to_string()],
            ..ResolveOptions::default()
        };

        let resolved = resolve_config(&options, &create_test_config()).unwrap();

        let names: Vec<_> = resolved
            .translator
            .providers
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["mymemory", "google"]);
    }

    #[test]
    fn test_resolve_config_provider_not_found() {
        let options = ResolveOptions {
            providers: vec!["nonexistent".to_string()],
            ..ResolveOptions::default()
        };

        let result = resolve_config(&options, &create_test_config());

        let message = result.unwrap_err().to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("google"));
    }

    #[test]
    fn test_resolve_config_missing_target_language() {
        let mut config = create_test_config();
        config.qtr.to = None;

        let result = resolve_config(&ResolveOptions::default(), &config);

        assert!(result.unwrap_err().to_string().contains("'to'"));
    }

    #[test]
    fn test_resolve_config_invalid_languages() {
        let options = ResolveOptions {
            to: Some("klingon".to_string()),
            ..ResolveOptions::default()
        };
        assert!(resolve_config(&options, &create_test_config()).is_err());

        let options = ResolveOptions {
            to: Some("auto".to_string()),
            ..ResolveOptions::default()
        };
        assert!(resolve_config(&options, &create_test_config()).is_err());
    }

    #[test]
    fn test_resolve_config_zero_attempts() {
        let mut config = create_test_config();
        config.qtr.max_attempts = Some(0);

        let result = resolve_config(&ResolveOptions::default(), &config);

        assert!(result.unwrap_err().to_string().contains("max_attempts"));
    }

    #[test]
    fn test_resolve_config_missing_api_key_is_not_an_error() {
        let mut config = create_test_config();
        config.providers[0].api_key_env = Some("QTR_TEST_UNSET_API_KEY".to_string());

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

        assert!(resolved.translator.providers[0].api_key.is_none());
    }
}
