//! Provider listing command handler.

use anyhow::{Result, bail};

use crate::config::{ConfigManager, ProviderConfig};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// With a name, shows that provider in detail. Otherwise lists all of them.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    if config.providers.is_empty() {
        println!("No providers configured.");
        println!(
            "Add providers to {}",
            Style::secondary(manager.config_path().display())
        );
        return Ok(());
    }

    let default_provider = config.assist.provider.as_deref();
    let marker = |name: &str| {
        if default_provider == Some(name) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.providers.get(provider_name) else {
            bail!("Provider '{provider_name}' not found");
        };
        println!(
            "{} {}{}",
            Style::header("Provider:"),
            Style::value(provider_name),
            marker(provider_name)
        );
        print_details(provider);
        return Ok(());
    }

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort_unstable();

    println!("{}\n", Style::header("Configured providers"));
    for name in names {
        let provider = &config.providers[name];
        println!("  {}{}", Style::value(name), marker(name));
        println!(
            "    {} {}",
            Style::label("endpoint:"),
            Style::secondary(&provider.endpoint)
        );
        if !provider.models.is_empty() {
            println!(
                "    {} {}",
                Style::label("models:"),
                provider.models.join(", ")
            );
        }
    }

    Ok(())
}

fn print_details(provider: &ProviderConfig) {
    println!(
        "  {} = {}",
        Style::label("endpoint"),
        Style::secondary(&provider.endpoint)
    );
    if provider.requires_api_key() {
        let state = if provider.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        };
        println!("  {}  = {state}", Style::label("api_key"));
    }
    if provider.models.is_empty() {
        println!("  {}   = {}", Style::label("models"), Style::secondary("(none configured)"));
    } else {
        println!("  {}:", Style::label("models"));
        for model in &provider.models {
            println!("    - {model}");
        }
    }
}
