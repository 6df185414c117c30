mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEEP_TRANSLATOR_URL, ProviderConfig, QtrConfig, ResolveOptions,
    ResolvedConfig, default_providers, resolve_config,
};
