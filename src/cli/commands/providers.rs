//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigManager, ProviderConfig};
use crate::ui::Style;

/// Prints the provider fallback chain to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists every provider in the order they are tried.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    let chain = config.provider_chain();
    let built_in = config.providers.is_empty();

    if let Some(provider_name) = specific_provider {
        let Some(provider) = chain.iter().find(|p| p.name == provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };
        print_details(provider);
        return Ok(());
    }

    println!("{}", Style::header("Provider fallback chain"));
    if built_in {
        println!(
            "{}",
            Style::hint("(built-in; add [[providers]] to ~/.config/qtr/config.toml to change it)")
        );
    }
    println!();

    for (index, provider) in chain.iter().enumerate() {
        println!(
            "  {} {}  {}",
            Style::position(index),
            Style::value(&provider.name),
            Style::secondary(&provider.endpoint)
        );
    }

    Ok(())
}

fn print_details(provider: &ProviderConfig) {
    println!("{} {}", Style::header("Provider:"), Style::value(&provider.name));
    println!("  {} = {}", Style::label("endpoint"), provider.endpoint);
    println!(
        "  {} = {}",
        Style::label("format  "),
        provider.format.as_str()
    );
    if let Some(model) = &provider.model {
        println!("  {} = {model}", Style::label("model   "));
    }
    if provider.requires_api_key() {
        let has_key = provider.get_api_key().is_some();
        println!(
            "  {} = {}",
            Style::label("api_key "),
            if has_key { "(set)" } else { "(not set)" }
        );
    }
    if let Some(sentinel) = &provider.auto_source {
        println!("  {} = {sentinel:?}", Style::label("auto    "));
    }
}
